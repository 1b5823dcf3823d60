//! Turns a static HTML snapshot into [`FormField`] descriptions.
//!
//! Parsing is permissive: malformed markup never fails, it just yields fewer
//! (or no) fields.

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::label::resolve_label;
use crate::schema::{FieldOption, FieldTag, FormField};

/// Attributes holding a validation regex, in priority order. The `data-val-*`
/// names come from ASP.NET unobtrusive validation.
const PATTERN_ATTRS: &[&str] = &["pattern", "data-val-regex", "data-val-regex-pattern"];

fn field_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| {
        Selector::parse("input, select, textarea").expect("field selector is valid")
    })
}

fn option_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("option").expect("option selector is valid"))
}

/// Parse `html` and describe every input, select and textarea in document order.
pub fn extract_fields(html: &str) -> Vec<FormField> {
    let document = Html::parse_document(html);
    extract_fields_from_document(&document)
}

pub fn extract_fields_from_document(document: &Html) -> Vec<FormField> {
    document
        .select(field_selector())
        .filter_map(|element| describe_field(document, element))
        .collect()
}

/// Describe a single field element. Returns `None` for anything that is not
/// an input, select or textarea.
pub fn describe_field(document: &Html, element: ElementRef<'_>) -> Option<FormField> {
    let el = element.value();
    let tag = FieldTag::from_tag_name(el.name())?;

    let r#type = match tag {
        FieldTag::Input => el.attr("type").unwrap_or("text").to_string(),
        other => other.as_str().to_string(),
    };
    let id = el.attr("id").map(str::to_string);
    let name = el
        .attr("name")
        .or(el.attr("id"))
        .unwrap_or_default()
        .to_string();
    let required = el.attr("required").is_some()
        || el.attr("aria-required") == Some("true")
        || el.attr("data-val-required").is_some();
    let pattern = PATTERN_ATTRS
        .iter()
        .find_map(|attr| el.attr(attr))
        .map(str::to_string);
    let options = (tag == FieldTag::Select).then(|| select_options(element));

    let field = FormField {
        name,
        id,
        tag,
        r#type,
        label: resolve_label(document, element),
        required,
        pattern,
        maxlength: el.attr("maxlength").map(str::to_string),
        placeholder: el.attr("placeholder").map(str::to_string),
        options,
    };
    debug!(name = %field.name, tag = %field.tag, label = ?field.label, "extracted field");
    Some(field)
}

/// Every `<option>` under a select, in document order.
fn select_options(select: ElementRef<'_>) -> Vec<FieldOption> {
    select
        .select(option_selector())
        .map(|option| FieldOption {
            value: option.value().attr("value").unwrap_or_default().to_string(),
            label: option.text().collect::<String>().trim().to_string(),
        })
        .collect()
}
