//! Content blocks: hero banner, text, image, call-to-action.

use crate::block::BlockRef;
use crate::blocks::parse_data;
use crate::registry::BlockRenderer;
use crate::render::BlockLoader;
use crate::render::html::{esc, esc_attr};

use anyhow::bail;
use regex::Regex;
use serde::Deserialize;

/// Banner section with a title, optional subtitle and call-to-action.
pub struct HeroBlock;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeroData {
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    background_image: Option<String>,
    #[serde(default)]
    cta_text: Option<String>,
    #[serde(default)]
    cta_link: Option<String>,
    #[serde(default)]
    alignment: Option<String>,
}

impl BlockRenderer for HeroBlock {
    fn render(&self, _loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String> {
        let data: HeroData = parse_data(block.data)?;
        let alignment = data.alignment.as_deref().unwrap_or("center");

        // backgroundImage lands inside a quoted url() in a style attribute;
        // only plain url characters are accepted so a descriptor cannot
        // smuggle extra declarations in.
        let style = match &data.background_image {
            Some(url) => {
                let plain_url = Regex::new(r"^[A-Za-z0-9/:?#&=%+.,_~-]+$")?;
                if !plain_url.is_match(url) {
                    bail!("hero backgroundImage is not a plain url: {:?}", url);
                }
                format!(" style=\"background-image: url('{}')\"", esc_attr(url))
            }
            None => String::new(),
        };

        let mut content = format!("<h1 class=\"hero-block__title\">{}</h1>", esc(&data.title));
        if let Some(subtitle) = &data.subtitle {
            content.push_str(&format!(
                "<p class=\"hero-block__subtitle\">{}</p>",
                esc(subtitle)
            ));
        }
        // The call-to-action needs both its text and its target.
        if let (Some(text), Some(link)) = (&data.cta_text, &data.cta_link) {
            content.push_str(&format!(
                "<a href=\"{}\" class=\"hero-block__cta\">{}</a>",
                esc_attr(link),
                esc(text)
            ));
        }

        Ok(format!(
            "<section id=\"{}\" class=\"hero-block hero-block--{}\"{}><div class=\"hero-block__content\">{}</div></section>",
            esc_attr(block.id),
            esc_attr(alignment),
            style,
            content
        ))
    }
}

/// Text content with paragraph, heading, and quote variants.
pub struct TextBlock;

#[derive(Debug, Deserialize)]
struct TextData {
    content: String,
    #[serde(default)]
    variant: Option<String>,
    #[serde(default)]
    alignment: Option<String>,
}

impl BlockRenderer for TextBlock {
    fn render(&self, _loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String> {
        let data: TextData = parse_data(block.data)?;
        let alignment = data.alignment.as_deref().unwrap_or("left");

        // Unknown variants fall back to a plain paragraph.
        let (variant, inner) = match data.variant.as_deref().unwrap_or("paragraph") {
            "heading" => (
                "heading",
                format!("<h2 class=\"text-block__heading\">{}</h2>", esc(&data.content)),
            ),
            "quote" => (
                "quote",
                format!(
                    "<blockquote class=\"text-block__quote\"><p>{}</p></blockquote>",
                    esc(&data.content)
                ),
            ),
            _ => (
                "paragraph",
                format!("<p class=\"text-block__paragraph\">{}</p>", esc(&data.content)),
            ),
        };

        Ok(format!(
            "<div id=\"{}\" class=\"text-block text-block--{} text-block--align-{}\">{}</div>",
            esc_attr(block.id),
            variant,
            esc_attr(alignment),
            inner
        ))
    }
}

/// Image with an optional caption.
pub struct ImageBlock;

#[derive(Debug, Deserialize)]
struct ImageData {
    src: String,
    alt: String,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

impl BlockRenderer for ImageBlock {
    fn render(&self, _loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String> {
        let data: ImageData = parse_data(block.data)?;

        let mut img = format!(
            "<img src=\"{}\" alt=\"{}\"",
            esc_attr(&data.src),
            esc_attr(&data.alt)
        );
        if let Some(width) = data.width {
            img.push_str(&format!(" width=\"{}\"", width));
        }
        if let Some(height) = data.height {
            img.push_str(&format!(" height=\"{}\"", height));
        }
        img.push_str(" class=\"image-block__img\" loading=\"lazy\">");

        let caption = match &data.caption {
            Some(text) => format!(
                "<figcaption class=\"image-block__caption\">{}</figcaption>",
                esc(text)
            ),
            None => String::new(),
        };

        Ok(format!(
            "<figure id=\"{}\" class=\"image-block\">{}{}</figure>",
            esc_attr(block.id),
            img,
            caption
        ))
    }
}

/// Call-to-action button with variants and sizes.
pub struct CtaBlock;

#[derive(Debug, Deserialize)]
struct CtaData {
    text: String,
    link: String,
    #[serde(default)]
    variant: Option<String>,
    #[serde(default)]
    size: Option<String>,
}

impl BlockRenderer for CtaBlock {
    fn render(&self, _loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String> {
        let data: CtaData = parse_data(block.data)?;
        let variant = data.variant.as_deref().unwrap_or("primary");
        let size = data.size.as_deref().unwrap_or("medium");

        Ok(format!(
            "<div id=\"{}\" class=\"cta-block\"><a href=\"{}\" class=\"cta-block__button cta-block__button--{} cta-block__button--{}\">{}</a></div>",
            esc_attr(block.id),
            esc_attr(&data.link),
            esc_attr(variant),
            esc_attr(size),
            esc(&data.text)
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::blocks::testutil::{render_failure, render_one};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn hero_with_everything() {
        let html = render_one(json!({
            "id": "hero-1",
            "type": "hero",
            "data": {
                "title": "Launch",
                "subtitle": "Now",
                "backgroundImage": "https://example.com/bg.png",
                "ctaText": "Go",
                "ctaLink": "#go",
                "alignment": "left",
            },
        }));

        assert_eq!(
            html,
            "<section id=\"hero-1\" class=\"hero-block hero-block--left\" style=\"background-image: url('https://example.com/bg.png')\"><div class=\"hero-block__content\"><h1 class=\"hero-block__title\">Launch</h1><p class=\"hero-block__subtitle\">Now</p><a href=\"#go\" class=\"hero-block__cta\">Go</a></div></section>"
        );
    }

    #[test]
    fn hero_defaults_center_and_needs_both_cta_fields() {
        let html = render_one(json!({
            "id": "h", "type": "hero",
            "data": { "title": "T", "ctaText": "Go" },
        }));

        assert_eq!(
            html,
            "<section id=\"h\" class=\"hero-block hero-block--center\"><div class=\"hero-block__content\"><h1 class=\"hero-block__title\">T</h1></div></section>"
        );
    }

    #[test]
    fn hero_without_title_fails_contained() {
        let reason = render_failure(json!({ "id": "h", "type": "hero", "data": {} }));
        assert!(reason.contains("title"));
    }

    #[test]
    fn hero_rejects_style_smuggling() {
        let reason = render_failure(json!({
            "id": "h", "type": "hero",
            "data": {
                "title": "T",
                "backgroundImage": "bg.png');background:url('//elsewhere.example/x",
            },
        }));
        assert!(reason.contains("backgroundImage"));
    }

    #[test]
    fn text_variants() {
        let html = render_one(json!({
            "id": "t1", "type": "text",
            "data": { "content": "hi" },
        }));
        assert_eq!(
            html,
            "<div id=\"t1\" class=\"text-block text-block--paragraph text-block--align-left\"><p class=\"text-block__paragraph\">hi</p></div>"
        );

        let html = render_one(json!({
            "id": "t2", "type": "text",
            "data": { "content": "Head", "variant": "heading", "alignment": "center" },
        }));
        assert_eq!(
            html,
            "<div id=\"t2\" class=\"text-block text-block--heading text-block--align-center\"><h2 class=\"text-block__heading\">Head</h2></div>"
        );

        let html = render_one(json!({
            "id": "t3", "type": "text",
            "data": { "content": "Q", "variant": "quote" },
        }));
        assert_eq!(
            html,
            "<div id=\"t3\" class=\"text-block text-block--quote text-block--align-left\"><blockquote class=\"text-block__quote\"><p>Q</p></blockquote></div>"
        );
    }

    #[test]
    fn text_unknown_variant_falls_back_to_paragraph() {
        let html = render_one(json!({
            "id": "t", "type": "text",
            "data": { "content": "x", "variant": "shout" },
        }));
        assert!(html.contains("text-block--paragraph"));
        assert!(html.contains("<p class=\"text-block__paragraph\">x</p>"));
    }

    #[test]
    fn text_escapes_content() {
        let html = render_one(json!({
            "id": "t", "type": "text",
            "data": { "content": "a < b & c" },
        }));
        assert!(html.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn image_with_caption_and_dimensions() {
        let html = render_one(json!({
            "id": "img-1", "type": "image",
            "data": { "src": "/a.png", "alt": "A", "caption": "cap", "width": 640, "height": 480 },
        }));
        assert_eq!(
            html,
            "<figure id=\"img-1\" class=\"image-block\"><img src=\"/a.png\" alt=\"A\" width=\"640\" height=\"480\" class=\"image-block__img\" loading=\"lazy\"><figcaption class=\"image-block__caption\">cap</figcaption></figure>"
        );
    }

    #[test]
    fn image_requires_src_and_alt() {
        let reason = render_failure(json!({ "id": "i", "type": "image", "data": { "src": "/a.png" } }));
        assert!(reason.contains("alt"));
    }

    #[test]
    fn cta_defaults() {
        let html = render_one(json!({
            "id": "cta-1", "type": "cta",
            "data": { "text": "Buy", "link": "/buy" },
        }));
        assert_eq!(
            html,
            "<div id=\"cta-1\" class=\"cta-block\"><a href=\"/buy\" class=\"cta-block__button cta-block__button--primary cta-block__button--medium\">Buy</a></div>"
        );
    }

    #[test]
    fn cta_variant_and_size_classes() {
        let html = render_one(json!({
            "id": "c", "type": "cta",
            "data": { "text": "Docs", "link": "/docs", "variant": "outline", "size": "large" },
        }));
        assert!(html.contains("cta-block__button--outline"));
        assert!(html.contains("cta-block__button--large"));
    }
}
