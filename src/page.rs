//! Page definitions: the input consumed by the `render`/`check` commands.
//!
//! JSON shape (what a CMS endpoint would hand over):
//!
//! {
//!   "blocks": [ ...block descriptors, see `block`... ],
//!   "meta": { "page": "landing", "version": "3" }   // optional
//! }
//!
//! Blocks stay untyped (`Value`) here on purpose: structural validation
//! is the render pass's job, and a partially broken page must still
//! render its healthy blocks.

use crate::Result;

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub blocks: Vec<Value>,

    #[serde(default)]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

impl PageSpec {
    /// Document title: the page name from meta, when present.
    pub fn title(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|meta| meta.page.as_deref())
            .unwrap_or("Untitled page")
    }
}

/// Read and deserialize a page definition file.
pub fn load_page_file(path: &str) -> Result<PageSpec> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read page file {}", path))?;
    let spec: PageSpec =
        serde_json::from_str(&text).with_context(|| format!("parse page file {}", path))?;
    Ok(spec)
}
