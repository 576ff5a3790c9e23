//! exportscan syntax library.
//!
//! Finds `// [[export]]`-marked function declarations in C-family source
//! text and extracts their name, return type and arguments:
//!
//! - [`cursor`] — one-character reader with a single slot of pushback
//! - [`comment`] — comment skipping and `/** tag */` extraction
//! - [`scanner`] — the declaration state machine
//! - [`classify`] — raw type fragments → [`TypeSpec`]
//! - [`registry`] — marker detection, parallel per-source scans, merging

pub mod classify;
pub mod comment;
pub mod cursor;
pub mod error;
pub mod model;
pub mod registry;
pub mod scanner;

pub use error::{BuildError, Location, ScanError, SourceParseFailure};
pub use model::{Argument, Declaration, Reference, Source, SourceExports, TypeSpec};
pub use registry::{build_registry, scan_source, scan_sources, Registry, ScanOptions};
