use crate::render::RenderResult;

use std::borrow::Cow;

/// Escape text for an HTML text position.
pub fn esc(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Escape a value for a double-quoted HTML attribute.
pub fn esc_attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Assemble a self-contained HTML document from one render pass.
///
/// Results are embedded in input order; placeholders stay visible in the
/// output (`block-unknown` / `block-error`). The stylesheet rides along so
/// the result is a single shippable file.
///
/// Important: we avoid `format!()` for the template because its CSS is
/// full of literal `{}`, which would conflict with Rust formatting.
pub fn render_document(title: &str, results: &[RenderResult]) -> String {
    let body: Vec<String> = results.iter().map(RenderResult::to_html).collect();

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; color: #1e2430; }
  .page > * { margin: 0 auto; }

  .block-unknown { margin: 8px auto; max-width: 960px; padding: 10px 14px; border: 1px dashed #d0a000; border-radius: 6px; background: #fff9e6; color: #7a6000; }
  .block-error { margin: 8px auto; max-width: 960px; padding: 10px 14px; border: 1px solid #d9534f; border-radius: 6px; background: #fdf2f2; color: #8a2a27; }
  .block-error details { margin-top: 6px; }
  .block-error pre { margin: 6px 0 0; white-space: pre-wrap; font-size: 13px; }

  .hero-block { padding: 64px 24px; background: #f2f5f9 center / cover no-repeat; }
  .hero-block--left { text-align: left; }
  .hero-block--center { text-align: center; }
  .hero-block--right { text-align: right; }
  .hero-block__content { max-width: 960px; margin: 0 auto; }
  .hero-block__title { margin: 0 0 8px; font-size: 40px; }
  .hero-block__subtitle { margin: 0 0 16px; font-size: 18px; color: #4a5568; }
  .hero-block__cta { display: inline-block; padding: 10px 20px; border-radius: 6px; background: #2b6cb0; color: white; text-decoration: none; }

  .text-block { max-width: 720px; padding: 12px 24px; }
  .text-block--align-left { text-align: left; }
  .text-block--align-center { text-align: center; }
  .text-block--align-right { text-align: right; }
  .text-block--align-justify { text-align: justify; }
  .text-block__heading { margin: 0; font-size: 28px; }
  .text-block__quote { margin: 0; padding-left: 16px; border-left: 3px solid #cbd5e0; color: #4a5568; font-style: italic; }
  .text-block__paragraph { margin: 0; line-height: 1.6; }

  .image-block { max-width: 720px; padding: 12px 24px; margin: 0 auto; }
  .image-block__img { max-width: 100%; height: auto; border-radius: 6px; }
  .image-block__caption { margin-top: 6px; font-size: 13px; color: #718096; }

  .cta-block { padding: 24px; text-align: center; }
  .cta-block__button { display: inline-block; border-radius: 6px; text-decoration: none; }
  .cta-block__button--primary { background: #2b6cb0; color: white; }
  .cta-block__button--secondary { background: #e2e8f0; color: #1e2430; }
  .cta-block__button--outline { border: 1px solid #2b6cb0; color: #2b6cb0; }
  .cta-block__button--small { padding: 6px 12px; font-size: 14px; }
  .cta-block__button--medium { padding: 10px 20px; font-size: 16px; }
  .cta-block__button--large { padding: 14px 28px; font-size: 18px; }

  .form-block { max-width: 560px; padding: 24px; }
  .form-block__title { margin: 0 0 12px; }
  .form-block__field { margin-bottom: 12px; }
  .form-block__label { display: block; margin-bottom: 4px; font-size: 14px; }
  .form-block__required { color: #d9534f; margin-left: 2px; }
  .form-block__input, .form-block__textarea, .form-block__select { width: 100%; padding: 8px 10px; border: 1px solid #cbd5e0; border-radius: 6px; font: inherit; }
  .form-block__textarea { min-height: 96px; }
  .form-block__submit { padding: 10px 20px; border: 0; border-radius: 6px; background: #2b6cb0; color: white; font: inherit; cursor: pointer; }

  .container-block { width: 100%; }
  .container-block--sm { max-width: 480px; }
  .container-block--md { max-width: 720px; }
  .container-block--lg { max-width: 960px; }
  .container-block--xl { max-width: 1200px; }
  .container-block--full { max-width: none; }
  .container-block--padding-none { padding: 0; }
  .container-block--padding-sm { padding: 8px; }
  .container-block--padding-md { padding: 16px; }
  .container-block--padding-lg { padding: 32px; }

  .grid-block { display: grid; max-width: 1200px; }
  .grid-block--gap-sm { gap: 8px; }
  .grid-block--gap-md { gap: 16px; }
  .grid-block--gap-lg { gap: 32px; }
  .grid-block--columns-1 { grid-template-columns: 1fr; }
  .grid-block--columns-2 { grid-template-columns: repeat(2, 1fr); }
  .grid-block--columns-3 { grid-template-columns: repeat(3, 1fr); }
  .grid-block--columns-4 { grid-template-columns: repeat(4, 1fr); }
  .grid-block--mobile-1 { grid-template-columns: 1fr; }
  .grid-block--mobile-2 { grid-template-columns: repeat(2, 1fr); }
  @media (min-width: 720px) {
    .grid-block--tablet-2 { grid-template-columns: repeat(2, 1fr); }
    .grid-block--tablet-3 { grid-template-columns: repeat(3, 1fr); }
  }
  @media (min-width: 1080px) {
    .grid-block--desktop-3 { grid-template-columns: repeat(3, 1fr); }
    .grid-block--desktop-4 { grid-template-columns: repeat(4, 1fr); }
  }

  .columns-block { display: flex; max-width: 1200px; }
  .columns-block--gap-sm { gap: 8px; }
  .columns-block--gap-md { gap: 16px; }
  .columns-block--gap-lg { gap: 32px; }
  .columns-block--equal > .columns-block__column { flex: 1 1 0; }
  .columns-block--auto > .columns-block__column { flex: 0 1 auto; }
  .columns-block--custom > .columns-block__column { flex-grow: 0; flex-shrink: 0; }

  .navigation { display: flex; align-items: center; gap: 24px; padding: 12px 24px; border-bottom: 1px solid #e2e8f0; }
  .navigation-brand { display: flex; align-items: center; gap: 8px; font-weight: 600; }
  .navigation-links { display: flex; align-items: center; gap: 16px; }
  .navigation-link { color: inherit; text-decoration: none; }
  .navigation-dropdown { position: relative; }
  .navigation-dropdown > button { border: 0; background: none; font: inherit; cursor: pointer; }
  .navigation-dropdown > ul { display: none; position: absolute; margin: 4px 0 0; padding: 8px; list-style: none; border: 1px solid #e2e8f0; border-radius: 6px; background: white; }
  .navigation-dropdown:hover > ul, .navigation-dropdown:focus-within > ul { display: block; }
  .icon { display: inline-block; width: 1em; height: 1em; }
</style>
</head>
<body>
<main class="page">
__BODY__
</main>
</body>
</html>
"#;

    // Markers are located in the template only; the spliced-in values are
    // never rescanned, so marker-looking text in a title or a block stays
    // inert.
    let (head, rest) = TEMPLATE.split_once("__TITLE__").unwrap_or((TEMPLATE, ""));
    let (mid, tail) = rest.split_once("__BODY__").unwrap_or((rest, ""));

    let title = esc(title);
    let body = body.join("\n");
    let mut doc = String::with_capacity(TEMPLATE.len() + title.len() + body.len());
    doc.push_str(head);
    doc.push_str(&title);
    doc.push_str(mid);
    doc.push_str(&body);
    doc.push_str(tail);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_embeds_results_in_order() {
        let results = vec![
            RenderResult::Rendered {
                id: "a".into(),
                kind: "text".into(),
                html: "<p>one</p>".into(),
            },
            RenderResult::UnknownType { id: "b".into(), kind: "bogus".into() },
            RenderResult::Rendered {
                id: "c".into(),
                kind: "text".into(),
                html: "<p>two</p>".into(),
            },
        ];

        let doc = render_document("landing", &results);

        assert!(doc.starts_with("<!doctype html>"));
        assert!(doc.contains("<title>landing</title>"));
        let one = doc.find("<p>one</p>").unwrap();
        let unknown = doc.find("Unknown block type: bogus").unwrap();
        let two = doc.find("<p>two</p>").unwrap();
        assert!(one < unknown && unknown < two);
    }

    #[test]
    fn document_escapes_the_title() {
        let doc = render_document("a < b", &[]);
        assert!(doc.contains("<title>a &lt; b</title>"));
    }

    #[test]
    fn marker_like_titles_stay_in_the_title() {
        let results = vec![RenderResult::Rendered {
            id: "a".into(),
            kind: "text".into(),
            html: "<p>only</p>".into(),
        }];

        let doc = render_document("__BODY__", &results);

        assert!(doc.contains("<title>__BODY__</title>"));
        assert_eq!(doc.matches("<p>only</p>").count(), 1);
    }

    #[test]
    fn empty_results_still_make_a_document() {
        let doc = render_document("empty", &[]);
        assert!(doc.contains("<main class=\"page\">"));
        assert!(doc.ends_with("</html>\n"));
    }
}
