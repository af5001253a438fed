//! Structural validation for block descriptors.
//!
//! Validation here is shape-only: a block is valid when its `id`, `type`
//! and `data` fields look right, independent of whether anything can
//! render it. Semantic checks on `data` belong to the individual
//! renderers, which keeps the tree walk type-agnostic.

use crate::block::BlockRef;
use crate::registry::Registry;

use serde_json::Value;

/// Maximum allowed nesting depth, root at depth 1. Bounds the recursive
/// render against runaway or hostile descriptor trees.
pub const MAX_BLOCK_DEPTH: usize = 10;

/// Shape check for a single descriptor. Children are not consulted;
/// invalid children are the children's problem, not the parent's.
pub fn is_valid_block(candidate: &Value) -> bool {
    BlockRef::from_value(candidate).is_some()
}

/// Copy `block` with every structurally invalid `children` entry removed,
/// recursively. The input is left untouched; a non-array `children` field
/// is dropped from the copy.
pub fn validate_tree(block: &Value) -> Value {
    let mut out = block.clone();
    let Value::Object(obj) = &mut out else {
        return out;
    };
    match obj.remove("children") {
        Some(Value::Array(items)) => {
            let kept: Vec<Value> = items
                .iter()
                .filter(|child| is_valid_block(child))
                .map(validate_tree)
                .collect();
            obj.insert("children".to_string(), Value::Array(kept));
        }
        // A non-array `children` field carries no descriptors.
        Some(_) | None => {}
    }
    out
}

/// Depth of a descriptor tree: 1 for a childless block, else one more
/// than the deepest child. An empty `children` array counts as childless.
pub fn depth_of(block: &Value) -> usize {
    let children = match block.get("children") {
        Some(Value::Array(items)) => items,
        _ => return 1,
    };
    1 + children.iter().map(depth_of).max().unwrap_or(0)
}

/// True when the tree stays within [`MAX_BLOCK_DEPTH`].
pub fn is_within_max_depth(block: &Value) -> bool {
    depth_of(block) <= MAX_BLOCK_DEPTH
}

/// Audit a top-level block list without rendering it.
///
/// Returns one human-readable finding per problem: structurally invalid
/// descriptors, trees past [`MAX_BLOCK_DEPTH`], and type tags with no
/// registered renderer. The audit is structural only; a block whose
/// `data` fails its renderer's decode still surfaces as a contained
/// failure at render time.
pub fn check_blocks(blocks: &[Value], registry: &Registry) -> Vec<String> {
    let mut findings = Vec::new();
    for (idx, block) in blocks.iter().enumerate() {
        let path = format!("blocks[{}]", idx);

        let depth = depth_of(block);
        if depth > MAX_BLOCK_DEPTH {
            findings.push(format!(
                "{}: {} levels deep, everything past level {} is pruned",
                path, depth, MAX_BLOCK_DEPTH
            ));
        }

        check_block(block, &path, registry, &mut findings);
    }
    findings
}

fn check_block(block: &Value, path: &str, registry: &Registry, findings: &mut Vec<String>) {
    let Some(b) = BlockRef::from_value(block) else {
        findings.push(format!("{}: structurally invalid descriptor", path));
        return;
    };

    if registry.resolve(b.kind).is_none() {
        findings.push(format!("{}: unknown block type '{}' (id '{}')", path, b.kind, b.id));
    }

    for (idx, child) in b.children.iter().enumerate() {
        check_block(child, &format!("{}.children[{}]", path, idx), registry, findings);
    }
}
