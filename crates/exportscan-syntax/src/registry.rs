//! Export registry — marker detection, per-source scanning and merging.
//!
//! Each source is scanned independently into a [`SourceExports`]. Merging is
//! a separate, explicit step that folds per-source results in caller order:
//! when two declarations share a name, the later source wins.

use crate::error::{BuildError, ScanError, SourceParseFailure};
use crate::model::{Declaration, Source, SourceExports};
use crate::scanner::scan_declaration;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::LazyLock;

static RE_EXPORT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*//\s*\[\[export\]\]").unwrap());

/// Returns true if `line` flags the next declaration for export.
pub fn is_marker_line(line: &str) -> bool {
    RE_EXPORT_MARKER.is_match(line)
}

/// Scan one source text for marked declarations.
///
/// Stops at the first declaration that fails to parse.
pub fn scan_source(id: &str, text: &str) -> Result<SourceExports, SourceParseFailure> {
    tracing::trace!(source = id, "scanning source");
    let chars: Vec<char> = text.chars().collect();

    // (char offset, 1-based line number, text) of every line
    let mut line_starts = Vec::new();
    let mut offset = 0;
    for (i, line) in text.split_inclusive('\n').enumerate() {
        line_starts.push((offset, i + 1, line));
        offset += line.chars().count();
    }

    let mut declarations = Vec::new();
    let mut resume_at = 0;
    for (idx, &(start, _, line)) in line_starts.iter().enumerate() {
        if start < resume_at || !is_marker_line(line) {
            continue;
        }
        let Some(&(decl_start, decl_line, _)) = line_starts.get(idx + 1) else {
            return Err(SourceParseFailure {
                source_id: id.to_string(),
                line: idx + 2,
                error: ScanError::UnterminatedInput,
            });
        };

        let (decl, end) =
            scan_declaration(&chars, decl_start, decl_line).map_err(|error| SourceParseFailure {
                source_id: id.to_string(),
                line: decl_line,
                error,
            })?;
        tracing::debug!(
            source = id,
            line = decl_line,
            name = %decl.name,
            arguments = decl.arguments.len(),
            "parsed export"
        );
        declarations.push(decl);

        // Lines starting before `end` belong to this declaration.
        resume_at = end;
    }

    Ok(SourceExports {
        source_id: id.to_string(),
        declarations,
    })
}

/// Options for scanning several sources.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum number of worker threads.
    pub jobs: NonZeroUsize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            jobs: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Scan `sources` in parallel. Results come back in input order.
pub fn scan_sources(
    sources: &[Source],
    options: &ScanOptions,
) -> Vec<Result<SourceExports, SourceParseFailure>> {
    let scan_all = || {
        sources
            .par_iter()
            .map(|s| scan_source(&s.id, &s.text))
            .collect::<Vec<_>>()
    };
    match rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.get())
        .build()
    {
        Ok(pool) => pool.install(scan_all),
        Err(err) => {
            tracing::warn!(
                "failed to build a {}-thread pool, using the global one: {}",
                options.jobs,
                err
            );
            scan_all()
        }
    }
}

/// A declaration together with the source it was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub source: String,
    #[serde(flatten)]
    pub declaration: Declaration,
}

/// Name-keyed mapping of exported declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    /// Fold per-source results in iteration order. Later sources replace
    /// earlier declarations with the same name.
    pub fn merge(parts: impl IntoIterator<Item = SourceExports>) -> Self {
        let mut registry = Self::default();
        for part in parts {
            registry.insert_all(part);
        }
        registry
    }

    /// Add every declaration of `part`, overwriting same-named entries.
    pub fn insert_all(&mut self, part: SourceExports) {
        for declaration in part.declarations {
            let entry = Entry {
                source: part.source_id.clone(),
                declaration,
            };
            let name = entry.declaration.name.clone();
            if let Some(previous) = self.entries.insert(name.clone(), entry) {
                tracing::warn!(
                    name = %name,
                    replaced = %previous.source,
                    by = %part.source_id,
                    "duplicate export; keeping the later declaration"
                );
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.entries.get(name).map(|e| &e.declaration)
    }

    /// Source identifier of the declaration registered under `name`.
    pub fn origin(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.source.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declarations ordered by name.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.values().map(|e| &e.declaration)
    }

    /// Entries (declaration plus origin) ordered by name.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }
}

/// Scan all sources and merge them in input order.
///
/// Every failing source is reported; none is silently skipped.
pub fn build_registry(sources: &[Source], options: &ScanOptions) -> Result<Registry, BuildError> {
    let mut registry = Registry::default();
    let mut failures = Vec::new();
    for result in scan_sources(sources, options) {
        match result {
            Ok(part) => registry.insert_all(part),
            Err(failure) => failures.push(failure),
        }
    }
    if failures.is_empty() {
        Ok(registry)
    } else {
        Err(BuildError { failures })
    }
}
