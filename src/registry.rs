//! Type registry: maps a block's `type` tag to the renderer for it.
//!
//! The host registers every renderer once at startup and treats the
//! registry as read-only afterwards; render passes only resolve. An
//! unregistered tag is a normal lookup miss (unknown types are data, not
//! bugs), so `resolve` returns an Option rather than an error.

use crate::block::BlockRef;
use crate::render::BlockLoader;

use std::collections::BTreeMap;

/// One renderer capability, selected by type tag.
///
/// Renderers receive the block's id, data, and children through `block`
/// and, if they nest content, hand the children back to `loader`; the
/// loader never recurses on a renderer's behalf. Returning Err (or
/// panicking) marks this block failed without affecting siblings.
pub trait BlockRenderer: Send + Sync {
    /// Produce the HTML fragment for one block.
    fn render(&self, loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String>;
}

/// Mapping from type tag to renderer for one process.
#[derive(Default)]
pub struct Registry {
    renderers: BTreeMap<String, Box<dyn BlockRenderer>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `kind` with `renderer`. Re-registering a tag replaces
    /// the previous renderer (last write wins).
    pub fn register(&mut self, kind: impl Into<String>, renderer: Box<dyn BlockRenderer>) {
        self.renderers.insert(kind.into(), renderer);
    }

    /// Look up the renderer for `kind`. None means "no such type", which
    /// callers surface as an unknown-type placeholder, not a failure.
    pub fn resolve(&self, kind: &str) -> Option<&dyn BlockRenderer> {
        self.renderers.get(kind).map(|renderer| renderer.as_ref())
    }

    /// Registered type tags, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(|kind| kind.as_str())
    }
}
