//! Tree rendering: per-block dispatch, recursion into children, and
//! failure isolation.
//!
//! The loader walks a list of descriptors in order, validates each,
//! resolves its renderer, and invokes it behind a catch-and-substitute
//! guard so one bad node cannot take down the rest of the page. Layout
//! renderers recurse by calling `render` on the loader they were handed;
//! every nesting level is served by a loader one level deeper, which is
//! how the depth cap holds without copying the tree.

pub mod html;

use crate::block::BlockRef;
use crate::block::validate::MAX_BLOCK_DEPTH;
use crate::diagnostics;
use crate::registry::{BlockRenderer, Registry};

use html::{esc, esc_attr};
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};

/// Output for a single block: the rendered fragment, or a visible
/// placeholder naming the block that could not be rendered. Placeholders
/// keep the originating id and type for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
    /// The renderer produced this HTML fragment.
    Rendered { id: String, kind: String, html: String },
    /// No renderer is registered for the block's type tag.
    UnknownType { id: String, kind: String },
    /// The renderer returned an error or panicked.
    Failed { id: String, kind: String, reason: String },
}

impl RenderResult {
    /// Id of the originating block.
    pub fn id(&self) -> &str {
        match self {
            RenderResult::Rendered { id, .. }
            | RenderResult::UnknownType { id, .. }
            | RenderResult::Failed { id, .. } => id,
        }
    }

    /// Type tag of the originating block.
    pub fn kind(&self) -> &str {
        match self {
            RenderResult::Rendered { kind, .. }
            | RenderResult::UnknownType { kind, .. }
            | RenderResult::Failed { kind, .. } => kind,
        }
    }

    /// Final markup: the fragment itself, or visible placeholder markup
    /// for blocks that failed resolution or execution.
    pub fn to_html(&self) -> String {
        match self {
            RenderResult::Rendered { html, .. } => html.clone(),
            RenderResult::UnknownType { id, kind } => format!(
                "<div class=\"block-unknown\" data-block-id=\"{}\"><p>Unknown block type: {}</p></div>",
                esc_attr(id),
                esc(kind),
            ),
            RenderResult::Failed { id, kind, reason } => format!(
                "<div class=\"block-error\" data-block-id=\"{}\"><p>Failed to render block: {}</p><details><summary>Error details</summary><pre>{}</pre></details></div>",
                esc_attr(id),
                esc(kind),
                esc(reason),
            ),
        }
    }
}

/// Orchestrator for one render pass.
///
/// Holds the registry and the nesting depth this instance serves,
/// top-level blocks at depth 1. Renderers receive a loader scoped one
/// level deeper, so recursing through it is all a renderer has to do to
/// stay inside the depth cap.
pub struct BlockLoader<'a> {
    registry: &'a Registry,
    depth: usize,
}

impl<'a> BlockLoader<'a> {
    /// Loader for top-level blocks.
    pub fn new(registry: &'a Registry) -> Self {
        BlockLoader { registry, depth: 1 }
    }

    fn child(&self) -> Self {
        BlockLoader {
            registry: self.registry,
            depth: self.depth + 1,
        }
    }

    /// Render `blocks` in input order. Reentrant: renderers call this on
    /// the loader they were handed to produce nested output.
    ///
    /// Per block: structurally invalid descriptors and blocks nested past
    /// [`MAX_BLOCK_DEPTH`] are dropped with a warning; everything else
    /// yields exactly one result, placeholder or not. Empty input is an
    /// empty output, not an error.
    pub fn render(&self, blocks: &[Value]) -> Vec<RenderResult> {
        blocks
            .iter()
            .filter_map(|block| self.render_block(block))
            .collect()
    }

    fn render_block(&self, block: &Value) -> Option<RenderResult> {
        let Some(b) = BlockRef::from_value(block) else {
            diagnostics::warn(format!("dropping structurally invalid block: {}", block));
            return None;
        };

        if self.depth > MAX_BLOCK_DEPTH {
            diagnostics::warn(format!(
                "dropping block '{}' (type: {}): nested deeper than {} levels",
                b.id, b.kind, MAX_BLOCK_DEPTH
            ));
            return None;
        }

        let Some(renderer) = self.registry.resolve(b.kind) else {
            diagnostics::warn(format!("unknown block type: {} (id '{}')", b.kind, b.id));
            return Some(RenderResult::UnknownType {
                id: b.id.to_string(),
                kind: b.kind.to_string(),
            });
        };

        Some(render_guarded(renderer, self, &b))
    }
}

/// Catch-and-substitute guard around one renderer invocation.
///
/// Both an Err from the renderer and a panic anywhere inside it are
/// contained here: the failure is reported with the block's id and type,
/// and an error placeholder stands in for this block only. Children
/// handed back through the loader get their own guards in the nested
/// pass; a panic in the renderer's own code surfaces here.
fn render_guarded(
    renderer: &dyn BlockRenderer,
    loader: &BlockLoader<'_>,
    block: &BlockRef<'_>,
) -> RenderResult {
    let child_loader = loader.child();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| renderer.render(&child_loader, block)));

    let reason = match outcome {
        Ok(Ok(html)) => {
            return RenderResult::Rendered {
                id: block.id.to_string(),
                kind: block.kind.to_string(),
                html,
            };
        }
        Ok(Err(err)) => format!("{:#}", err),
        Err(payload) => panic_reason(payload),
    };

    diagnostics::warn(format!(
        "error in block '{}' (type: {}): {}",
        block.id, block.kind, reason
    ));

    RenderResult::Failed {
        id: block.id.to_string(),
        kind: block.kind.to_string(),
        reason,
    }
}

/// Best-effort text for a panic payload (panics carry &str or String in
/// practice).
fn panic_reason(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "renderer panicked".to_string()
    }
}
