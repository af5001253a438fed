//! Navigation block: brand plus a link row with one level of dropdowns.

use crate::block::BlockRef;
use crate::blocks::parse_data;
use crate::registry::BlockRenderer;
use crate::render::BlockLoader;
use crate::render::html::{esc, esc_attr};

use regex::Regex;
use serde::Deserialize;

pub struct NavigationBlock;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NavData {
    links: Vec<NavLink>,
    #[serde(default)]
    logo_icon: Option<String>,
    #[serde(default)]
    logo_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NavLink {
    text: String,
    url: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    sub_links: Vec<NavLink>,
}

impl BlockRenderer for NavigationBlock {
    fn render(&self, _loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String> {
        let data: NavData = parse_data(block.data)?;

        let mut brand = String::new();
        if let Some(icon) = data.logo_icon.as_deref().and_then(icon_span) {
            brand.push_str(&icon);
        }
        if let Some(text) = &data.logo_text {
            brand.push_str(&format!(
                "<span class=\"navigation-brand-name\">{}</span>",
                esc(text)
            ));
        }

        let mut out = format!("<nav id=\"{}\" class=\"navigation\">", esc_attr(block.id));
        out.push_str(&format!("<div class=\"navigation-brand\">{}</div>", brand));
        out.push_str("<div class=\"navigation-links\">");
        for link in &data.links {
            out.push_str(&render_link(link));
        }
        out.push_str("</div></nav>");
        Ok(out)
    }
}

/// One top-level link; links with sub-links render a dropdown instead.
fn render_link(link: &NavLink) -> String {
    let icon = link.icon.as_deref().and_then(icon_span).unwrap_or_default();

    if link.sub_links.is_empty() {
        return format!(
            "<a href=\"{}\" class=\"navigation-link\">{}<span>{}</span></a>",
            esc_attr(&link.url),
            icon,
            esc(&link.text)
        );
    }

    let mut items = String::new();
    for sub in &link.sub_links {
        let sub_icon = sub.icon.as_deref().and_then(icon_span).unwrap_or_default();
        items.push_str(&format!(
            "<li><a href=\"{}\">{}<span>{}</span></a></li>",
            esc_attr(&sub.url),
            sub_icon,
            esc(&sub.text)
        ));
    }

    format!(
        "<div class=\"navigation-dropdown\"><button type=\"button\">{}<span>{}</span></button><ul>{}</ul></div>",
        icon,
        esc(&link.text),
        items
    )
}

/// Icon names come straight from descriptor data and end up in a class
/// attribute; anything that is not a plain token is skipped.
fn icon_span(name: &str) -> Option<String> {
    let token = Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").ok()?;
    if !token.is_match(name) {
        return None;
    }
    Some(format!(
        "<span class=\"icon icon--{}\" aria-hidden=\"true\"></span>",
        name
    ))
}
