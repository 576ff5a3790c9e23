//! Error types for declaration scanning.

use std::fmt;

/// Where in a source text a scan error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number.
    pub line: usize,
    /// Text of that line, without its line terminator.
    pub text: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: '{}'", self.line, self.text.trim_end())
    }
}

/// Failure to parse a single marked declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("reached end of input with an unterminated export")]
    UnterminatedInput,

    #[error("malformed comment at {0}")]
    MalformedComment(Location),

    #[error("imbalanced angle brackets at {0}")]
    ImbalancedAngleBrackets(Location),

    #[error("imbalanced parentheses at {0}")]
    ImbalancedParens(Location),

    #[error("pointer parsing failure for type '{ty}' at {at}")]
    PointerSyntax { ty: String, at: Location },

    #[error("argument without a name at {0}")]
    MalformedArgument(Location),

    #[error("export without a function name at {0}")]
    MissingName(Location),
}

/// A [`ScanError`] tagged with the source it came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to parse export in {source_id} (declaration starting at line {line})")]
pub struct SourceParseFailure {
    /// Caller-supplied identifier of the source, usually a path.
    pub source_id: String,
    /// Line where the failing declaration starts.
    pub line: usize,
    #[source]
    pub error: ScanError,
}

/// One or more sources failed while building a registry.
#[derive(Debug, thiserror::Error)]
#[error("{} source(s) failed to parse: {}", .failures.len(), summarize(.failures))]
pub struct BuildError {
    pub failures: Vec<SourceParseFailure>,
}

fn summarize(failures: &[SourceParseFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.source_id, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}
