//! Layout blocks: container, grid, columns. These are the renderers that
//! recurse, by handing their `children` back to the loader.

use crate::block::BlockRef;
use crate::blocks::parse_data;
use crate::registry::BlockRenderer;
use crate::render::html::esc_attr;
use crate::render::{BlockLoader, RenderResult};

use anyhow::bail;
use regex::Regex;
use serde::Deserialize;

/// Width-constrained wrapper with padding and an optional background.
pub struct ContainerBlock;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContainerData {
    #[serde(default)]
    max_width: Option<String>,
    #[serde(default)]
    padding: Option<String>,
    #[serde(default)]
    background_color: Option<String>,
}

impl BlockRenderer for ContainerBlock {
    fn render(&self, loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String> {
        let data: ContainerData = parse_data(block.data)?;
        let max_width = data.max_width.as_deref().unwrap_or("lg");
        let padding = data.padding.as_deref().unwrap_or("md");

        // backgroundColor lands inside a style attribute; only plain CSS
        // color tokens (hex or named) are accepted so a descriptor cannot
        // smuggle arbitrary style text in.
        let style = match &data.background_color {
            Some(color) => {
                let plain_color = Regex::new(r"^(#[0-9a-fA-F]{3,8}|[a-zA-Z]+)$")?;
                if !plain_color.is_match(color) {
                    bail!("container backgroundColor is not a plain color: {:?}", color);
                }
                format!(" style=\"background-color: {}\"", color)
            }
            None => String::new(),
        };

        Ok(format!(
            "<div id=\"{}\" class=\"container-block container-block--{} container-block--padding-{}\"{}>{}</div>",
            esc_attr(block.id),
            esc_attr(max_width),
            esc_attr(padding),
            style,
            render_children(loader, block)
        ))
    }
}

/// Concatenated child output, empty when there are no children.
fn render_children(loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> String {
    if !block.has_children() {
        return String::new();
    }
    let parts: Vec<String> = loader
        .render(block.children)
        .iter()
        .map(RenderResult::to_html)
        .collect();
    parts.concat()
}

/// Grid of child blocks, fixed column count or responsive breakpoints.
pub struct GridBlock;

#[derive(Debug, Deserialize)]
struct GridData {
    #[serde(default)]
    columns: Option<u32>,
    #[serde(default)]
    gap: Option<String>,
    #[serde(default)]
    responsive: Option<ResponsiveColumns>,
}

#[derive(Debug, Deserialize)]
struct ResponsiveColumns {
    #[serde(default)]
    mobile: Option<u32>,
    #[serde(default)]
    tablet: Option<u32>,
    #[serde(default)]
    desktop: Option<u32>,
}

impl BlockRenderer for GridBlock {
    fn render(&self, loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String> {
        let data: GridData = parse_data(block.data)?;
        let gap = data.gap.as_deref().unwrap_or("md");

        // Responsive settings win over the fixed column count.
        let mut class = format!("grid-block grid-block--gap-{}", esc_attr(gap));
        match &data.responsive {
            Some(responsive) => {
                if let Some(n) = responsive.mobile {
                    class.push_str(&format!(" grid-block--mobile-{}", n));
                }
                if let Some(n) = responsive.tablet {
                    class.push_str(&format!(" grid-block--tablet-{}", n));
                }
                if let Some(n) = responsive.desktop {
                    class.push_str(&format!(" grid-block--desktop-{}", n));
                }
            }
            None => {
                class.push_str(&format!(" grid-block--columns-{}", data.columns.unwrap_or(3)));
            }
        }

        Ok(format!(
            "<div id=\"{}\" class=\"{}\">{}</div>",
            esc_attr(block.id),
            class,
            render_children(loader, block)
        ))
    }
}

/// Side-by-side columns, one child block per column.
pub struct ColumnsBlock;

#[derive(Debug, Deserialize)]
struct ColumnsData {
    #[serde(default)]
    distribution: Option<Distribution>,
    #[serde(default)]
    gap: Option<String>,
}

/// `distribution` is either a keyword or a list of relative weights.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Distribution {
    Keyword(String),
    Weights(Vec<f64>),
}

impl BlockRenderer for ColumnsBlock {
    fn render(&self, loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String> {
        // A columns block without children renders nothing at all.
        if !block.has_children() {
            return Ok(String::new());
        }

        let data: ColumnsData = parse_data(block.data)?;
        let gap = data.gap.as_deref().unwrap_or("md");

        // Only the known keywords earn a modifier class.
        let (flavor, weights) = match &data.distribution {
            None => (Some("equal"), None),
            Some(Distribution::Keyword(word)) => match word.as_str() {
                "equal" | "auto" => (Some(word.as_str()), None),
                _ => (None, None),
            },
            Some(Distribution::Weights(w)) => (Some("custom"), Some(w.as_slice())),
        };

        let total: f64 = weights.map(|w| w.iter().sum()).unwrap_or(0.0);

        let mut columns = String::new();
        for (index, child) in block.children.iter().enumerate() {
            let style = match weights {
                Some(w) if total > 0.0 => {
                    let weight = w.get(index).copied().unwrap_or(0.0);
                    format!(" style=\"flex-basis: {:.2}%\"", weight / total * 100.0)
                }
                _ => String::new(),
            };

            let inner: Vec<String> = loader
                .render(std::slice::from_ref(child))
                .iter()
                .map(RenderResult::to_html)
                .collect();

            columns.push_str(&format!(
                "<div class=\"columns-block__column\"{}>{}</div>",
                style,
                inner.concat()
            ));
        }

        let mut class = String::from("columns-block");
        if let Some(flavor) = flavor {
            class.push_str(&format!(" columns-block--{}", flavor));
        }
        class.push_str(&format!(" columns-block--gap-{}", esc_attr(gap)));

        Ok(format!(
            "<div id=\"{}\" class=\"{}\">{}</div>",
            esc_attr(block.id),
            class,
            columns
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::blocks::testutil::{render_failure, render_one};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn container_wraps_children() {
        let html = render_one(json!({
            "id": "c", "type": "container",
            "data": { "maxWidth": "xl", "padding": "lg" },
            "children": [ { "id": "t", "type": "text", "data": { "content": "x" } } ],
        }));
        assert_eq!(
            html,
            "<div id=\"c\" class=\"container-block container-block--xl container-block--padding-lg\"><div id=\"t\" class=\"text-block text-block--paragraph text-block--align-left\"><p class=\"text-block__paragraph\">x</p></div></div>"
        );
    }

    #[test]
    fn container_defaults_and_empty_children() {
        let bare = render_one(json!({ "id": "c", "type": "container", "data": {} }));
        assert_eq!(
            bare,
            "<div id=\"c\" class=\"container-block container-block--lg container-block--padding-md\"></div>"
        );

        let with_empty =
            render_one(json!({ "id": "c", "type": "container", "data": {}, "children": [] }));
        assert_eq!(with_empty, bare);
    }

    #[test]
    fn container_accepts_plain_background_colors() {
        let html = render_one(json!({
            "id": "c", "type": "container",
            "data": { "backgroundColor": "#f8f9fa" },
        }));
        assert!(html.contains(" style=\"background-color: #f8f9fa\""));
    }

    #[test]
    fn container_rejects_style_smuggling() {
        let reason = render_failure(json!({
            "id": "c", "type": "container",
            "data": { "backgroundColor": "red;} body { display:none" },
        }));
        assert!(reason.contains("backgroundColor"));
    }

    #[test]
    fn grid_fixed_columns() {
        let html = render_one(json!({
            "id": "g", "type": "grid",
            "data": { "columns": 2, "gap": "sm" },
            "children": [
                { "id": "a", "type": "text", "data": { "content": "1" } },
                { "id": "b", "type": "text", "data": { "content": "2" } },
            ],
        }));
        assert!(html.starts_with(
            "<div id=\"g\" class=\"grid-block grid-block--gap-sm grid-block--columns-2\">"
        ));
        assert!(html.contains(">1<"));
        assert!(html.contains(">2<"));
    }

    #[test]
    fn grid_responsive_classes_replace_fixed_columns() {
        let html = render_one(json!({
            "id": "g", "type": "grid",
            "data": { "columns": 4, "responsive": { "mobile": 1, "desktop": 3 } },
        }));
        assert!(html.contains("grid-block--mobile-1"));
        assert!(html.contains("grid-block--desktop-3"));
        assert!(!html.contains("grid-block--columns-4"));
    }

    #[test]
    fn columns_render_one_wrapper_per_child() {
        let html = render_one(json!({
            "id": "cols", "type": "columns", "data": {},
            "children": [
                { "id": "a", "type": "text", "data": { "content": "L" } },
                { "id": "b", "type": "text", "data": { "content": "R" } },
            ],
        }));
        assert!(html.starts_with(
            "<div id=\"cols\" class=\"columns-block columns-block--equal columns-block--gap-md\">"
        ));
        assert_eq!(html.matches("columns-block__column").count(), 2);
    }

    #[test]
    fn columns_distribution_keywords() {
        let auto = render_one(json!({
            "id": "cols", "type": "columns",
            "data": { "distribution": "auto" },
            "children": [ { "id": "a", "type": "text", "data": { "content": "L" } } ],
        }));
        assert!(auto.contains("columns-block--auto"));

        // Unrecognized keywords add no modifier class at all.
        let loose = render_one(json!({
            "id": "cols", "type": "columns",
            "data": { "distribution": "stretch" },
            "children": [ { "id": "a", "type": "text", "data": { "content": "L" } } ],
        }));
        assert!(loose.starts_with("<div id=\"cols\" class=\"columns-block columns-block--gap-md\">"));
    }

    #[test]
    fn columns_custom_weights_become_flex_basis() {
        let html = render_one(json!({
            "id": "cols", "type": "columns",
            "data": { "distribution": [1, 2] },
            "children": [
                { "id": "a", "type": "text", "data": { "content": "L" } },
                { "id": "b", "type": "text", "data": { "content": "R" } },
            ],
        }));
        assert!(html.contains("columns-block--custom"));
        assert!(html.contains("flex-basis: 33.33%"));
        assert!(html.contains("flex-basis: 66.67%"));
    }

    #[test]
    fn childless_columns_render_nothing() {
        let html = render_one(json!({ "id": "cols", "type": "columns", "data": {} }));
        assert_eq!(html, "");
    }
}
