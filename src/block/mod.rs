//! Block descriptors: the schema for one node of a page tree.
//!
//! A page definition carries a list of block descriptors. Each descriptor
//! is a JSON object:
//!
//! {
//!   "id": "hero-1",        // non-empty, unique within the tree
//!   "type": "hero",        // registry tag selecting the renderer
//!   "data": { ... },       // type-specific config, opaque to the core
//!   "children": [ ... ]    // optional nested descriptors
//! }
//!
//! Descriptors arrive untrusted (hand-written files, CMS payloads), so
//! they stay `serde_json::Value` until a node passes structural
//! validation. [`BlockRef`] is the validated, borrowed view renderers
//! work with; nothing in here copies or mutates the input tree.

pub mod validate;

use serde_json::{Map, Value};

/// Borrowed view of a structurally valid block descriptor.
#[derive(Debug, Clone, Copy)]
pub struct BlockRef<'a> {
    /// Block identifier, carried into placeholders and diagnostics.
    pub id: &'a str,
    /// Type tag used for registry lookup (the JSON `type` field).
    pub kind: &'a str,
    /// Type-specific configuration. The core never looks inside.
    pub data: &'a Map<String, Value>,
    /// Nested descriptors. Empty when `children` is missing, empty, or
    /// not an array.
    pub children: &'a [Value],
}

impl<'a> BlockRef<'a> {
    /// Build a view over `value`, or None unless it holds the required
    /// shape: `id` a non-empty string, `type` a string, `data` an object.
    /// The `children` field never affects the verdict.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id")?.as_str()?;
        if id.is_empty() {
            return None;
        }
        let kind = obj.get("type")?.as_str()?;
        let data = obj.get("data")?.as_object()?;
        let children = match obj.get("children") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };
        Some(BlockRef { id, kind, data, children })
    }

    /// True if the descriptor carries at least one child entry.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
