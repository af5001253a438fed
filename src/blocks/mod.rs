//! Built-in block renderers.
//!
//! Everything in here is presentation detail: each file implements the
//! [`BlockRenderer`](crate::registry::BlockRenderer) contract for a family
//! of type tags and gets wired up in [`builtin_registry`]. The tree walk
//! in `render` knows nothing about any of these.

pub mod content;
pub mod form;
pub mod layout;
pub mod nav;

use crate::registry::Registry;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Registry with every built-in renderer registered. Hosts wanting a
/// different set start from [`Registry::new`] and register their own.
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register("hero", Box::new(content::HeroBlock));
    registry.register("text", Box::new(content::TextBlock));
    registry.register("image", Box::new(content::ImageBlock));
    registry.register("cta", Box::new(content::CtaBlock));
    registry.register("form", Box::new(form::FormBlock));
    registry.register("container", Box::new(layout::ContainerBlock));
    registry.register("grid", Box::new(layout::GridBlock));
    registry.register("columns", Box::new(layout::ColumnsBlock));
    registry.register("navigation", Box::new(nav::NavigationBlock));
    registry
}

/// Decode a block's `data` mapping into a renderer's typed config.
///
/// Renderers own the semantic validation of their data; a shape mismatch
/// here is a contained render failure for that block only.
pub fn parse_data<T: DeserializeOwned>(data: &Map<String, Value>) -> crate::Result<T> {
    Ok(serde_json::from_value(Value::Object(data.clone()))?)
}
