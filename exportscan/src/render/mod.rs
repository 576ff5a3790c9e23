//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod summary;

use anyhow::{anyhow, Result};
use exportscan_syntax::Registry;

/// Trait for rendering a registry into a specific output format.
pub trait Renderer {
    fn render(&self, registry: &Registry) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "summary" | "text" => Ok(Box::new(summary::SummaryRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use json or summary",
            format
        )),
    }
}
