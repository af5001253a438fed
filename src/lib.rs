//! Block-based page rendering: a structurally validated descriptor tree
//! walked recursively through a registry of renderers, with per-block
//! failure containment so one broken block never takes down the page.

pub mod block;
pub mod blocks;
pub mod diagnostics;
pub mod page;
pub mod registry;
pub mod render;

pub type Result<T> = anyhow::Result<T>;
