//! Plain-text renderer — one normalized signature per export.
//!
//! ```text
//! make  (src/a.cpp:12)
//!   returns  char*  [base=char ptr=1 tags=owned]
//!   n        int    [base=int ptr=0]
//! ```

use crate::render::Renderer;
use anyhow::Result;
use exportscan_syntax::{Reference, Registry, TypeSpec};
use std::fmt::Write;

pub struct SummaryRenderer;

impl Renderer for SummaryRenderer {
    fn render(&self, registry: &Registry) -> Result<String> {
        let mut out = String::new();
        for entry in registry.entries() {
            let decl = &entry.declaration;
            writeln!(out, "{}  ({}:{})", decl.name, entry.source, decl.line)?;

            let width = decl
                .arguments
                .iter()
                .map(|a| a.name.len())
                .chain(std::iter::once("returns".len()))
                .max()
                .unwrap_or(0);

            writeln!(out, "  {:width$}  {}", "returns", describe(&decl.return_type))?;
            for arg in &decl.arguments {
                writeln!(out, "  {:width$}  {}", arg.name, describe(&arg.ty))?;
            }
        }
        Ok(out)
    }
}

fn describe(ty: &TypeSpec) -> String {
    let full = if ty.full_text().is_empty() {
        "?"
    } else {
        ty.full_text()
    };
    let mut details = format!("base={} ptr={}", ty.base_type(), ty.pointer_depth());
    match ty.reference() {
        Reference::None => {}
        Reference::Lvalue => details.push_str(" ref=&"),
        Reference::Rvalue => details.push_str(" ref=&&"),
    }
    if !ty.tags().is_empty() {
        let tags: Vec<&str> = ty.tags().iter().map(String::as_str).collect();
        details.push_str(&format!(" tags={}", tags.join(",")));
    }
    format!("{}  [{}]", full, details)
}
