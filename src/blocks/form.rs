//! Form block: builds a static form from field descriptions. Submission
//! is the browser's business; `onSubmit` only becomes the form's action
//! URL.

use crate::block::BlockRef;
use crate::blocks::parse_data;
use crate::registry::BlockRenderer;
use crate::render::BlockLoader;
use crate::render::html::{esc, esc_attr};

use anyhow::bail;
use regex::Regex;
use serde::Deserialize;

/// Form with typed fields and a submit button.
pub struct FormBlock;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormData {
    #[serde(default)]
    title: Option<String>,
    fields: Vec<FormField>,
    #[serde(default)]
    submit_text: Option<String>,
    #[serde(default)]
    on_submit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FormField {
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    label: String,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    options: Vec<String>,
}

impl BlockRenderer for FormBlock {
    fn render(&self, _loader: &BlockLoader<'_>, block: &BlockRef<'_>) -> crate::Result<String> {
        let data: FormData = parse_data(block.data)?;

        // Field names become name/id attributes; require plain tokens.
        let name_token = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$")?;
        for field in &data.fields {
            if !name_token.is_match(&field.name) {
                bail!("form field name is not a plain token: {:?}", field.name);
            }
        }

        let mut out = format!("<div id=\"{}\" class=\"form-block\">", esc_attr(block.id));
        if let Some(title) = &data.title {
            out.push_str(&format!("<h2 class=\"form-block__title\">{}</h2>", esc(title)));
        }

        let action = match &data.on_submit {
            Some(url) => format!(" action=\"{}\" method=\"post\"", esc_attr(url)),
            None => String::new(),
        };
        out.push_str(&format!("<form class=\"form-block__form\"{}>", action));

        for field in &data.fields {
            out.push_str(&render_field(block.id, field));
        }

        let submit_text = data.submit_text.as_deref().unwrap_or("Submit");
        out.push_str(&format!(
            "<button type=\"submit\" class=\"form-block__submit\">{}</button>",
            esc(submit_text)
        ));
        out.push_str("</form></div>");
        Ok(out)
    }
}

/// One labelled field. Control ids are namespaced by the block id so two
/// forms on one page cannot collide.
fn render_field(block_id: &str, field: &FormField) -> String {
    let control_id = format!("{}-{}", block_id, field.name);
    let kind = field.kind.as_deref().unwrap_or("text");

    let required_attr = if field.required { " required" } else { "" };
    let required_mark = if field.required {
        "<span class=\"form-block__required\">*</span>"
    } else {
        ""
    };

    let placeholder_attr = match &field.placeholder {
        Some(placeholder) => format!(" placeholder=\"{}\"", esc_attr(placeholder)),
        None => String::new(),
    };

    let control = match kind {
        "textarea" => format!(
            "<textarea id=\"{}\" name=\"{}\"{}{} class=\"form-block__textarea\"></textarea>",
            esc_attr(&control_id),
            esc_attr(&field.name),
            placeholder_attr,
            required_attr
        ),
        "select" => {
            let mut options = format!(
                "<option value=\"\">{}</option>",
                esc(field.placeholder.as_deref().unwrap_or("Select..."))
            );
            for option in &field.options {
                options.push_str(&format!(
                    "<option value=\"{}\">{}</option>",
                    esc_attr(option),
                    esc(option)
                ));
            }
            format!(
                "<select id=\"{}\" name=\"{}\"{} class=\"form-block__select\">{}</select>",
                esc_attr(&control_id),
                esc_attr(&field.name),
                required_attr,
                options
            )
        }
        "checkbox" => format!(
            "<input type=\"checkbox\" id=\"{}\" name=\"{}\"{} class=\"form-block__checkbox\">",
            esc_attr(&control_id),
            esc_attr(&field.name),
            required_attr
        ),
        // Everything else is a typed text input ("text", "email", ...).
        other => format!(
            "<input type=\"{}\" id=\"{}\" name=\"{}\"{}{} class=\"form-block__input\">",
            esc_attr(other),
            esc_attr(&control_id),
            esc_attr(&field.name),
            placeholder_attr,
            required_attr
        ),
    };

    format!(
        "<div class=\"form-block__field\"><label for=\"{}\" class=\"form-block__label\">{}{}</label>{}</div>",
        esc_attr(&control_id),
        esc(&field.label),
        required_mark,
        control
    )
}
