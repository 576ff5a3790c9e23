//! Data model for exported declarations — consumed by binding generators.

use serde::Serialize;
use std::collections::BTreeSet;

/// Reference marker trailing a type, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reference {
    #[default]
    None,
    /// `T&`
    Lvalue,
    /// `T&&`
    Rvalue,
}

/// A parsed type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSpec {
    #[serde(rename = "full")]
    pub(crate) full_text: String,
    #[serde(rename = "base")]
    pub(crate) base_type: String,
    pub(crate) pointer_depth: usize,
    pub(crate) reference: Reference,
    pub(crate) tags: BTreeSet<String>,
}

impl TypeSpec {
    /// Fragments rejoined with single spaces, qualifiers and stars included.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// The type with `const`, pointer stars and reference markers removed.
    pub fn base_type(&self) -> &str {
        &self.base_type
    }

    pub fn pointer_depth(&self) -> usize {
        self.pointer_depth
    }

    pub fn reference(&self) -> Reference {
        self.reference
    }

    /// Tags from an adjacent `/** ... */` comment.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeSpec,
}

/// A single exported function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    /// Line of the source where the declaration starts.
    pub line: usize,
    pub return_type: TypeSpec,
    /// Arguments in call-site order.
    pub arguments: Vec<Argument>,
}

/// One source text to scan.
#[derive(Debug, Clone)]
pub struct Source {
    /// Identifier used in diagnostics, usually a path.
    pub id: String,
    pub text: String,
}

impl Source {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Declarations found in one source, in source order.
#[derive(Debug, Clone)]
pub struct SourceExports {
    pub source_id: String,
    pub declarations: Vec<Declaration>,
}
