//! Source file discovery.
//!
//! Paths may be files, directories (searched recursively for the configured
//! extensions) or glob patterns. The result is sorted and deduplicated so the
//! registry's last-write-wins order is reproducible.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

fn walk(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), err);
                continue;
            }
        };
        if path.is_dir() {
            walk(&path, extensions, found)?;
        } else if path.is_file() && has_extension(&path, extensions) {
            found.push(path);
        }
    }
    Ok(())
}

/// Expand `patterns` into a sorted list of source files.
///
/// Explicitly named files are kept regardless of extension.
pub fn find_sources(patterns: &[String], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            walk(path, extensions, &mut files)?;
            continue;
        }
        // Try as glob
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec!["cpp".to_string(), "cc".to_string()]
    }

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn directory_is_searched_recursively() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.cpp");
        let b = touch(dir.path(), "nested/deeper/b.CC");
        touch(dir.path(), "nested/skip.h");
        touch(dir.path(), "notes.txt");

        let found = find_sources(&[dir.path().to_string_lossy().to_string()], &exts()).unwrap();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn explicit_file_kept_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        let header = touch(dir.path(), "api.hpp");
        let arg = header.to_string_lossy().to_string();

        let found = find_sources(&[arg.clone(), arg], &exts()).unwrap();
        assert_eq!(found, vec![header]);
    }

    #[test]
    fn glob_pattern() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "x1.cpp");
        let b = touch(dir.path(), "x2.cpp");
        touch(dir.path(), "y.cpp");

        let pattern = format!("{}/x*.cpp", dir.path().display());
        let found = find_sources(&[pattern], &exts()).unwrap();
        assert_eq!(found, vec![a, b]);
    }

    #[test]
    fn unmatched_pattern_is_empty() {
        let found = find_sources(&["/nonexistent/*.cpp".to_string()], &exts()).unwrap();
        assert!(found.is_empty());
    }
}
