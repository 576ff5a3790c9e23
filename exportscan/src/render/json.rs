//! JSON renderer — the hand-off format for binding generators.
//!
//! One object keyed by function name; see `Registry`'s serde derive for the
//! field layout.

use crate::render::Renderer;
use anyhow::{Context, Result};
use exportscan_syntax::Registry;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, registry: &Registry) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(registry).context("failed to serialize registry")?;
        out.push('\n');
        Ok(out)
    }
}
