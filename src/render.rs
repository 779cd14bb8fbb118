//! Data-driven form rendering.
//!
//! One render function per field kind, dispatched by an exhaustive `match`
//! over [`FieldType`], so adding a kind is a one-place change with
//! compiler-enforced coverage. Each branch owns its own value shape: scalars,
//! option lists, composite sub-objects, booleans, files.
//!
//! [`render_form`] assembles the full widget tree including chrome: form name
//! heading, honeypot, hidden page-URL field, captcha container, submit button
//! and branding footer.

use std::collections::BTreeMap;

use crate::captcha;
use crate::html::{Element, Node};
use crate::session::HONEYPOT_FIELD;
use crate::styles::{FormStyling, LogoPosition};
use crate::types::{
    AddressPart, CaptchaProvider, FieldType, FieldValue, FormField, FormStatusResponse, NamePart,
    SubmitData, ValidationError,
};

/// Default branding footer text
pub const DEFAULT_BRANDING_TEXT: &str = "Powered by Forms Expert";

/// Default branding footer link
pub const DEFAULT_BRANDING_URL: &str = "https://forms.expert";

/// Chrome options for full-form rendering
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Submit button label; styling `buttonText` wins over this
    pub submit_text: Option<String>,
    /// Value of the hidden `pageUrl` field
    pub page_url: Option<String>,
    /// Captcha widget to place above the submit button
    pub captcha: Option<(CaptchaProvider, String)>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = Some(text.into());
        self
    }

    pub fn page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    pub fn captcha(mut self, provider: CaptchaProvider, site_key: impl Into<String>) -> Self {
        self.captcha = Some((provider, site_key.into()));
        self
    }
}

/// Collapse an ordered error list into a field -> message map, last write
/// winning per field.
pub fn errors_to_map(errors: &[ValidationError]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for err in errors {
        map.insert(err.field.clone(), err.message.clone());
    }
    map
}

/// Evaluate a field's `visibleWhen` condition against the current values.
/// Fields without a condition are always visible.
pub fn field_visible(field: &FormField, values: &SubmitData) -> bool {
    let Some(cond) = &field.visible_when else {
        return true;
    };
    let current = values.get(&cond.field).and_then(FieldValue::as_json);
    use crate::types::VisibilityOp::*;
    match cond.operator {
        Eq => current == Some(&cond.value),
        Neq => current != Some(&cond.value),
        Contains => match current {
            Some(serde_json::Value::Array(items)) => items.contains(&cond.value),
            Some(serde_json::Value::String(s)) => cond
                .value
                .as_str()
                .map(|needle| s.contains(needle))
                .unwrap_or(false),
            _ => false,
        },
        Gt => match (current.and_then(|v| v.as_f64()), cond.value.as_f64()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        },
        Lt => match (current.and_then(|v| v.as_f64()), cond.value.as_f64()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
    }
}

fn field_id(name: &str) -> String {
    format!("forms-expert-field-{name}")
}

fn display_value(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::display_string).unwrap_or_default()
}

/// Value of one key of a composite (address/name/dateRange/location) object
fn part_value(value: Option<&FieldValue>, key: &str) -> String {
    value
        .and_then(FieldValue::as_json)
        .and_then(|v| v.get(key))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_default()
}

fn is_truthy(value: Option<&FieldValue>) -> bool {
    matches!(
        value.and_then(FieldValue::as_json),
        Some(serde_json::Value::Bool(true))
    )
}

fn selected_number(value: Option<&FieldValue>) -> Option<i64> {
    value.and_then(FieldValue::as_json).and_then(|v| v.as_i64())
}

fn array_contains(value: Option<&FieldValue>, candidate: &str) -> bool {
    match value.and_then(FieldValue::as_json) {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .any(|v| v.as_str().map(|s| s == candidate).unwrap_or(false)),
        _ => false,
    }
}

fn input(field: &FormField, type_attr: &'static str, value: Option<&FieldValue>, error: bool) -> Element {
    let class = if error {
        "forms-expert-input forms-expert-error"
    } else {
        "forms-expert-input"
    };
    let mut el = Element::new("input")
        .attr("type", type_attr)
        .attr("id", field_id(&field.name))
        .attr("name", field.name.clone())
        .class(class)
        .attr_opt("placeholder", field.placeholder.clone())
        .flag_if("required", field.required);
    let current = display_value(value);
    if !current.is_empty() {
        el = el.attr("value", current);
    }
    el
}

fn numeric_attrs(el: Element, field: &FormField) -> Element {
    el.attr_opt("min", field.min.map(|v| trim_float(v)))
        .attr_opt("max", field.max.map(|v| trim_float(v)))
        .attr_opt("step", field.step.map(|v| trim_float(v)))
}

fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

fn options_of(field: &FormField) -> &[crate::types::FieldOption] {
    field.options.as_deref().unwrap_or(&[])
}

/// Render one field's interactive widget plus its group wrapper, label and
/// inline error. Layout and hidden kinds render without the wrapper.
pub fn render_field(
    field: &FormField,
    value: Option<&FieldValue>,
    error: Option<&str>,
    styling: &FormStyling,
) -> Node {
    let has_error = error.is_some();
    let widget: Node = match field.field_type {
        // layout kinds: no data, no wrapper
        FieldType::Heading => {
            let text = field
                .label
                .as_deref()
                .or(field.content.as_deref())
                .unwrap_or_default();
            return Element::new("h3").class("forms-expert-heading").text(text).into();
        }
        FieldType::Divider => return Element::new("hr").class("forms-expert-divider").into(),
        FieldType::Paragraph => {
            // caller-trusted literal HTML content
            let content = field.content.clone().unwrap_or_default();
            return Element::new("div")
                .class("forms-expert-paragraph")
                .child(Node::raw(content))
                .into();
        }

        FieldType::Hidden => {
            let current = value
                .map(FieldValue::display_string)
                .filter(|s| !s.is_empty())
                .or_else(|| {
                    field.default_value.as_ref().map(|v| match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                })
                .unwrap_or_default();
            return Element::new("input")
                .attr("type", "hidden")
                .attr("name", field.name.clone())
                .attr("value", current)
                .into();
        }

        FieldType::Text => input(field, "text", value, has_error).into(),
        FieldType::Email => input(field, "email", value, has_error).into(),
        FieldType::Phone => input(field, "tel", value, has_error).into(),
        FieldType::Url => input(field, "url", value, has_error).into(),
        FieldType::Password => input(field, "password", value, has_error).into(),
        FieldType::Date => input(field, "date", value, has_error).into(),
        FieldType::Time => input(field, "time", value, has_error).into(),
        FieldType::Datetime => input(field, "datetime-local", value, has_error).into(),
        FieldType::Number => numeric_attrs(input(field, "number", value, has_error), field).into(),
        FieldType::Currency => {
            let el = numeric_attrs(input(field, "number", value, has_error), field);
            let el = if field.step.is_none() {
                el.attr("step", "0.01")
            } else {
                el
            };
            el.attr_opt("data-currency", field.currency_code.clone()).into()
        }
        FieldType::ColorPicker => {
            let current = display_value(value);
            Element::new("input")
                .attr("type", "color")
                .attr("id", field_id(&field.name))
                .attr("name", field.name.clone())
                .class("forms-expert-input")
                .attr("value", if current.is_empty() { "#000000".to_string() } else { current })
                .into()
        }
        FieldType::Slider => {
            let current = display_value(value);
            let el = Element::new("input")
                .attr("type", "range")
                .attr("id", field_id(&field.name))
                .attr("name", field.name.clone())
                .class("forms-expert-slider")
                .attr("min", field.min.map(trim_float).unwrap_or_else(|| "0".to_string()))
                .attr("max", field.max.map(trim_float).unwrap_or_else(|| "100".to_string()))
                .attr("step", field.step.map(trim_float).unwrap_or_else(|| "1".to_string()));
            let el = if current.is_empty() {
                el
            } else {
                el.attr("value", current)
            };
            el.into()
        }

        FieldType::Textarea | FieldType::RichText => {
            let class = if has_error {
                "forms-expert-textarea forms-expert-error"
            } else {
                "forms-expert-textarea"
            };
            Element::new("textarea")
                .attr("id", field_id(&field.name))
                .attr("name", field.name.clone())
                .class(class)
                .attr_opt("placeholder", field.placeholder.clone())
                .attr_opt("maxlength", field.max_length.map(|n| n.to_string()))
                .flag_if("required", field.required)
                .text(display_value(value))
                .into()
        }

        FieldType::Select | FieldType::Dropdown => {
            let class = if has_error {
                "forms-expert-select forms-expert-error"
            } else {
                "forms-expert-select"
            };
            let current = display_value(value);
            let placeholder = field.placeholder.clone().unwrap_or_else(|| "Select...".to_string());
            let mut select = Element::new("select")
                .attr("id", field_id(&field.name))
                .attr("name", field.name.clone())
                .class(class)
                .flag_if("required", field.required)
                .child(Element::new("option").attr("value", "").text(placeholder));
            for option in options_of(field) {
                select = select.child(
                    Element::new("option")
                        .attr("value", option.value().to_string())
                        .flag_if("selected", option.value() == current)
                        .text(option.label().to_string()),
                );
            }
            select.into()
        }

        FieldType::Radio => {
            let current = display_value(value);
            let mut group = Element::new("div").class("forms-expert-radio-group");
            for option in options_of(field) {
                group = group.child(
                    Element::new("label").class("forms-expert-radio-item").child(
                        Element::new("input")
                            .attr("type", "radio")
                            .attr("name", field.name.clone())
                            .attr("value", option.value().to_string())
                            .flag_if("checked", option.value() == current),
                    )
                    .child(Element::new("span").text(option.label().to_string())),
                );
            }
            group.into()
        }

        FieldType::Multiselect => {
            let mut group = Element::new("div").class("forms-expert-multiselect-group");
            for option in options_of(field) {
                group = group.child(
                    Element::new("label").class("forms-expert-checkbox-item").child(
                        Element::new("input")
                            .attr("type", "checkbox")
                            .attr("name", field.name.clone())
                            .attr("value", option.value().to_string())
                            .flag_if("checked", array_contains(value, option.value())),
                    )
                    .child(Element::new("span").text(option.label().to_string())),
                );
            }
            group.into()
        }

        FieldType::Rating => {
            let max = field.rating_max.unwrap_or(5);
            let selected = selected_number(value).unwrap_or(0);
            let mut group = Element::new("div").class("forms-expert-rating");
            for n in 1..=max as i64 {
                let class = if n <= selected {
                    "forms-expert-rating-star active"
                } else {
                    "forms-expert-rating-star"
                };
                group = group.child(
                    Element::new("button")
                        .attr("type", "button")
                        .class(class)
                        .attr("data-value", n.to_string())
                        .text("\u{2605}"),
                );
            }
            group.into()
        }

        FieldType::Scale | FieldType::OpinionScale => {
            let (default_min, default_max) = match field.field_type {
                FieldType::OpinionScale => (0i64, 10i64),
                _ => (1, 5),
            };
            let min = field.min.map(|v| v as i64).unwrap_or(default_min);
            let max = field.max.map(|v| v as i64).unwrap_or(default_max);
            let selected = selected_number(value);
            let mut row = Element::new("div").class("forms-expert-scale");
            for n in min..=max {
                let class = if selected == Some(n) {
                    "forms-expert-scale-btn active"
                } else {
                    "forms-expert-scale-btn"
                };
                row = row.child(
                    Element::new("button")
                        .attr("type", "button")
                        .class(class)
                        .attr("data-value", n.to_string())
                        .text(n.to_string()),
                );
            }
            let mut wrapper = Element::new("div").child(row);
            if field.low_label.is_some() || field.high_label.is_some() {
                wrapper = wrapper.child(
                    Element::new("div")
                        .class("forms-expert-scale-labels")
                        .child(Element::new("span").text(field.low_label.clone().unwrap_or_default()))
                        .child(
                            Element::new("span").text(field.high_label.clone().unwrap_or_default()),
                        ),
                );
            }
            wrapper.into()
        }

        FieldType::ImageChoice => {
            let current = display_value(value);
            let mut group = Element::new("div").class("forms-expert-image-choice");
            for option in options_of(field) {
                let class = if option.value() == current {
                    "forms-expert-image-choice-item active"
                } else {
                    "forms-expert-image-choice-item"
                };
                let mut card = Element::new("div")
                    .class(class)
                    .attr("data-value", option.value().to_string());
                if let Some(url) = option.image_url() {
                    card = card.child(
                        Element::new("img")
                            .attr("src", url.to_string())
                            .attr("alt", option.label().to_string()),
                    );
                }
                group = group.child(card.child(Element::new("span").text(option.label().to_string())));
            }
            group.into()
        }

        FieldType::Ranking => {
            // display-only: current order with position numbers
            let ordered: Vec<String> = match value.and_then(FieldValue::as_json) {
                Some(serde_json::Value::Array(items)) if !items.is_empty() => items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                _ => options_of(field).iter().map(|o| o.value().to_string()).collect(),
            };
            let mut group = Element::new("div").class("forms-expert-ranking");
            for (i, item_value) in ordered.iter().enumerate() {
                let label = options_of(field)
                    .iter()
                    .find(|o| o.value() == item_value)
                    .map(|o| o.label().to_string())
                    .unwrap_or_else(|| item_value.clone());
                group = group.child(
                    Element::new("div")
                        .class("forms-expert-ranking-item")
                        .attr("data-value", item_value.clone())
                        .text(format!("{}. {}", i + 1, label)),
                );
            }
            group.into()
        }

        FieldType::Checkbox | FieldType::Toggle => {
            Element::new("label")
                .class("forms-expert-checkbox-group")
                .child(
                    Element::new("input")
                        .attr("type", "checkbox")
                        .attr("id", field_id(&field.name))
                        .attr("name", field.name.clone())
                        .class("forms-expert-checkbox")
                        .flag_if("checked", is_truthy(value))
                        .flag_if("required", field.required),
                )
                .child(
                    Element::new("span").text(field.label.clone().unwrap_or_else(|| field.name.clone())),
                )
                .into()
        }

        FieldType::Consent => {
            let text = field
                .consent_text
                .clone()
                .or_else(|| field.label.clone())
                .unwrap_or_else(|| "I agree".to_string());
            let mut label = Element::new("label")
                .class("forms-expert-checkbox-group")
                .child(
                    Element::new("input")
                        .attr("type", "checkbox")
                        .attr("id", field_id(&field.name))
                        .attr("name", field.name.clone())
                        .class("forms-expert-checkbox")
                        .flag_if("checked", is_truthy(value))
                        .flag_if("required", field.required),
                )
                .child(Element::new("span").text(text));
            if let Some(url) = &field.consent_url {
                label = label.child(
                    Element::new("a")
                        .attr("href", url.clone())
                        .attr("target", "_blank")
                        .attr("rel", "noopener")
                        .text("View policy"),
                );
            }
            label.into()
        }

        FieldType::File => {
            let mut el = Element::new("input")
                .attr("type", "file")
                .attr("id", field_id(&field.name))
                .attr("name", field.name.clone())
                .class("forms-expert-file")
                .flag_if("multiple", field.multiple)
                .flag_if("required", field.required);
            if let Some(types) = &field.allowed_mime_types {
                el = el.attr("accept", types.join(","));
            }
            el.into()
        }

        FieldType::DateRange => {
            Element::new("div")
                .class("forms-expert-date-range")
                .child(
                    Element::new("input")
                        .attr("type", "date")
                        .attr("name", format!("{}[start]", field.name))
                        .class("forms-expert-input")
                        .attr("value", part_value(value, "start")),
                )
                .child(
                    Element::new("input")
                        .attr("type", "date")
                        .attr("name", format!("{}[end]", field.name))
                        .class("forms-expert-input")
                        .attr("value", part_value(value, "end")),
                )
                .into()
        }

        FieldType::Address => {
            let parts = field.address_fields.as_deref().unwrap_or(AddressPart::defaults());
            let mut group = Element::new("div").class("forms-expert-address");
            for part in parts {
                group = group.child(
                    Element::new("input")
                        .attr("type", "text")
                        .attr("name", format!("{}[{}]", field.name, part.key()))
                        .class("forms-expert-input")
                        .attr("placeholder", part.label())
                        .attr("value", part_value(value, part.key())),
                );
            }
            group.into()
        }

        FieldType::Name => {
            let parts = field.name_fields.as_deref().unwrap_or(NamePart::defaults());
            let mut group = Element::new("div").class("forms-expert-name");
            for part in parts {
                group = group.child(
                    Element::new("input")
                        .attr("type", "text")
                        .attr("name", format!("{}[{}]", field.name, part.key()))
                        .class("forms-expert-input")
                        .attr("placeholder", part.label())
                        .attr("value", part_value(value, part.key())),
                );
            }
            group.into()
        }

        FieldType::Location => {
            Element::new("div")
                .class("forms-expert-location-coords")
                .child(
                    Element::new("input")
                        .attr("type", "number")
                        .attr("name", format!("{}[lat]", field.name))
                        .class("forms-expert-input")
                        .attr("placeholder", "Latitude")
                        .attr("step", "any")
                        .attr("value", part_value(value, "lat")),
                )
                .child(
                    Element::new("input")
                        .attr("type", "number")
                        .attr("name", format!("{}[lng]", field.name))
                        .class("forms-expert-input")
                        .attr("placeholder", "Longitude")
                        .attr("step", "any")
                        .attr("value", part_value(value, "lng")),
                )
                .into()
        }
    };

    // group wrapper with label and inline error
    let mut group = Element::new("div").class("forms-expert-group");
    if let Some(label) = &field.label {
        let mut label_el = Element::new("label")
            .class("forms-expert-label")
            .attr("for", field_id(&field.name))
            .text(label.clone());
        if field.required && styling.hide_required_asterisk != Some(true) {
            label_el = label_el.child(Element::new("span").class("forms-expert-required").text("*"));
        }
        group = group.child(label_el);
    }
    let mut input_wrapper = Element::new("div").class("forms-expert-input-wrapper").child(widget);
    if let Some(message) = error {
        input_wrapper = input_wrapper.child(
            Element::new("div").class("forms-expert-error-message").text(message),
        );
    }
    group.child(input_wrapper).into()
}

/// Render the full form: visible fields, honeypot, hidden page-URL field,
/// captcha container, submit button and branding footer.
pub fn render_form(
    status: &FormStatusResponse,
    values: &SubmitData,
    errors: &BTreeMap<String, String>,
    options: &RenderOptions,
) -> Node {
    let styling = FormStyling::resolved(
        status.schema.as_ref().and_then(|s| s.styling.as_ref()),
        status.styling.as_ref(),
    );
    let mut form = Element::new("form").class("forms-expert").flag("novalidate");

    if let Some(cover) = &styling.cover_image_url {
        form = form.child(
            Element::new("img")
                .class("forms-expert-cover")
                .attr("src", cover.clone())
                .attr("alt", ""),
        );
    }
    if let Some(logo) = &styling.logo_url {
        let position_class = match styling.logo_position {
            Some(LogoPosition::TopLeft) => "forms-expert-logo forms-expert-logo-top-left",
            Some(LogoPosition::TopRight) => "forms-expert-logo forms-expert-logo-top-right",
            _ => "forms-expert-logo forms-expert-logo-top-center",
        };
        form = form.child(
            Element::new("div").class(position_class).child(
                Element::new("img").attr("src", logo.clone()).attr("alt", "Logo"),
            ),
        );
    }

    let show_name = status
        .settings
        .as_ref()
        .and_then(|s| s.show_form_name)
        .or_else(|| status.hosted_config.as_ref().and_then(|h| h.show_form_name))
        .unwrap_or(false);
    if show_name {
        if let Some(name) = &status.name {
            form = form.child(Element::new("h2").class("forms-expert-form-name").text(name.clone()));
        }
    }

    if let Some(schema) = &status.schema {
        for field in &schema.fields {
            if !field_visible(field, values) {
                continue;
            }
            form = form.child(render_field(
                field,
                values.get(&field.name),
                errors.get(&field.name).map(String::as_str),
                &styling,
            ));
        }
    }

    let honeypot = status
        .settings
        .as_ref()
        .map(|s| s.honeypot)
        .unwrap_or(false);
    if honeypot {
        form = form.child(
            Element::new("div").class("forms-expert-honeypot").attr("aria-hidden", "true").child(
                Element::new("input")
                    .attr("type", "text")
                    .attr("name", HONEYPOT_FIELD)
                    .attr("tabindex", "-1")
                    .attr("autocomplete", "off"),
            ),
        );
    }

    if let Some(url) = &options.page_url {
        form = form.child(
            Element::new("input")
                .attr("type", "hidden")
                .attr("name", "pageUrl")
                .attr("value", url.clone()),
        );
    }

    if let Some((provider, site_key)) = &options.captcha {
        form = form.child(captcha::adapter(*provider).render("forms-expert-captcha", site_key));
    }

    let button_text = styling
        .button_text
        .clone()
        .or_else(|| options.submit_text.clone())
        .unwrap_or_else(|| "Submit".to_string());
    form = form.child(
        Element::new("div").class("forms-expert-button-wrapper").child(
            Element::new("button")
                .attr("type", "submit")
                .class("forms-expert-button")
                .text(button_text),
        ),
    );

    let branding_enabled = status.branding.as_ref().map(|b| b.enabled).unwrap_or(true);
    if branding_enabled {
        let text = status
            .branding
            .as_ref()
            .and_then(|b| b.text.clone())
            .unwrap_or_else(|| DEFAULT_BRANDING_TEXT.to_string());
        let url = status
            .branding
            .as_ref()
            .and_then(|b| b.url.clone())
            .unwrap_or_else(|| DEFAULT_BRANDING_URL.to_string());
        form = form.child(
            Element::new("div").class("forms-expert-branding").child(
                Element::new("a")
                    .attr("href", url)
                    .attr("target", "_blank")
                    .attr("rel", "noopener")
                    .text(text),
            ),
        );
    }

    form.into()
}

/// Post-submission success view with check icon and message
pub fn render_success(message: &str) -> Node {
    Element::new("div")
        .class("forms-expert-success")
        .child(Element::new("div").class("forms-expert-success-icon").text("\u{2713}"))
        .child(Element::new("div").class("forms-expert-success-message").text(message))
        .into()
}

/// Spinner view shown while the form config loads
pub fn render_loading() -> Node {
    Element::new("div")
        .class("forms-expert forms-expert-loading")
        .child(Element::new("div").class("forms-expert-spinner"))
        .into()
}

/// View shown for inactive forms or config load failures
pub fn render_unavailable(message: &str) -> Node {
    Element::new("div")
        .class("forms-expert forms-expert-unavailable")
        .child(Element::new("p").text(message))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FormSchema, VisibilityOp, VisibleWhen};

    fn styling() -> FormStyling {
        FormStyling::default()
    }

    fn render(field: &FormField, value: Option<&FieldValue>, error: Option<&str>) -> String {
        render_field(field, value, error, &styling()).to_html()
    }

    #[test]
    fn test_text_field_with_label_and_error() {
        let field = FormField::new("email", FieldType::Email)
            .with_label("Email")
            .required();
        let value = FieldValue::text("a@b.c");
        let html = render(&field, Some(&value), Some("Invalid email"));
        assert!(html.contains("type=\"email\""));
        assert!(html.contains("value=\"a@b.c\""));
        assert!(html.contains("forms-expert-error-message\">Invalid email"));
        assert!(html.contains("forms-expert-required\">*"));
        assert!(html.contains(" required"));
    }

    #[test]
    fn test_hide_required_asterisk() {
        let field = FormField::new("email", FieldType::Email).with_label("Email").required();
        let style = FormStyling {
            hide_required_asterisk: Some(true),
            ..Default::default()
        };
        let html = render_field(&field, None, None, &style).to_html();
        assert!(!html.contains("forms-expert-required"));
    }

    #[test]
    fn test_select_placeholder_and_selection() {
        let field = FormField::new("color", FieldType::Select)
            .with_placeholder("Pick a color")
            .with_options(vec!["red".into(), "blue".into()]);
        let value = FieldValue::text("blue");
        let html = render(&field, Some(&value), None);
        assert!(html.contains("<option value=\"\">Pick a color</option>"));
        assert!(html.contains("<option value=\"blue\" selected>blue</option>"));
        assert!(html.contains("<option value=\"red\">red</option>"));
    }

    #[test]
    fn test_rating_defaults_to_five_stars() {
        let field = FormField::new("stars", FieldType::Rating);
        let value = FieldValue::from(3i64);
        let html = render(&field, Some(&value), None);
        assert_eq!(html.matches("forms-expert-rating-star").count(), 5);
        assert_eq!(html.matches("forms-expert-rating-star active").count(), 3);
    }

    #[test]
    fn test_opinion_scale_zero_to_ten() {
        let field = FormField::new("nps", FieldType::OpinionScale);
        let html = render(&field, None, None);
        assert_eq!(html.matches("forms-expert-scale-btn").count(), 11);
        assert!(html.contains("data-value=\"0\""));
        assert!(html.contains("data-value=\"10\""));
    }

    #[test]
    fn test_scale_labels() {
        let mut field = FormField::new("sat", FieldType::Scale);
        field.low_label = Some("Poor".to_string());
        field.high_label = Some("Great".to_string());
        let html = render(&field, None, None);
        assert_eq!(html.matches("forms-expert-scale-btn").count(), 5);
        assert!(html.contains("<span>Poor</span>"));
        assert!(html.contains("<span>Great</span>"));
    }

    #[test]
    fn test_multiselect_membership() {
        let field = FormField::new("tags", FieldType::Multiselect)
            .with_options(vec!["a".into(), "b".into(), "c".into()]);
        let value = FieldValue::Json(serde_json::json!(["a", "c"]));
        let html = render(&field, Some(&value), None);
        assert_eq!(html.matches(" checked").count(), 2);
    }

    #[test]
    fn test_composite_name_defaults() {
        let field = FormField::new("who", FieldType::Name);
        let value = FieldValue::Json(serde_json::json!({"first": "Ada", "last": "Lovelace"}));
        let html = render(&field, Some(&value), None);
        assert!(html.contains("name=\"who[first]\""));
        assert!(html.contains("name=\"who[last]\""));
        assert!(!html.contains("who[middle]"));
        assert!(html.contains("value=\"Ada\""));
    }

    #[test]
    fn test_address_defaults_five_parts() {
        let field = FormField::new("addr", FieldType::Address);
        let html = render(&field, None, None);
        for key in ["street", "city", "state", "zip", "country"] {
            assert!(html.contains(&format!("name=\"addr[{key}]\"")));
        }
        assert!(!html.contains("addr[street2]"));
    }

    #[test]
    fn test_address_declared_subset() {
        let mut field = FormField::new("addr", FieldType::Address);
        field.address_fields = Some(vec![AddressPart::Street, AddressPart::Zip]);
        let html = render(&field, None, None);
        assert!(html.contains("name=\"addr[street]\""));
        assert!(html.contains("name=\"addr[zip]\""));
        assert!(!html.contains("addr[city]"));
    }

    #[test]
    fn test_hidden_uses_default_value() {
        let mut field = FormField::new("source", FieldType::Hidden);
        field.default_value = Some(serde_json::json!("newsletter"));
        let html = render(&field, None, None);
        assert_eq!(
            html,
            "<input type=\"hidden\" name=\"source\" value=\"newsletter\">"
        );
    }

    #[test]
    fn test_layout_fields_have_no_inputs() {
        let heading = FormField::new("h", FieldType::Heading).with_label("Section");
        let divider = FormField::new("d", FieldType::Divider);
        let paragraph = FormField::new("p", FieldType::Paragraph).with_content("<em>hi</em>");
        assert_eq!(render(&heading, None, None), "<h3 class=\"forms-expert-heading\">Section</h3>");
        assert_eq!(render(&divider, None, None), "<hr class=\"forms-expert-divider\">");
        // paragraph content is caller-trusted literal HTML
        assert!(render(&paragraph, None, None).contains("<em>hi</em>"));
    }

    #[test]
    fn test_consent_policy_link() {
        let mut field = FormField::new("terms", FieldType::Consent);
        field.consent_text = Some("I accept the terms".to_string());
        field.consent_url = Some("https://x/terms".to_string());
        let html = render(&field, None, None);
        assert!(html.contains("I accept the terms"));
        assert!(html.contains("href=\"https://x/terms\""));
        assert!(html.contains(">View policy</a>"));
    }

    #[test]
    fn test_file_accept_and_multiple() {
        let mut field = FormField::new("docs", FieldType::File);
        field.allowed_mime_types = Some(vec!["image/png".to_string(), "application/pdf".to_string()]);
        field.multiple = true;
        let html = render(&field, None, None);
        assert!(html.contains("accept=\"image/png,application/pdf\""));
        assert!(html.contains(" multiple"));
    }

    #[test]
    fn test_ranking_display_order() {
        let field = FormField::new("prefs", FieldType::Ranking)
            .with_options(vec!["x".into(), "y".into()]);
        let value = FieldValue::Json(serde_json::json!(["y", "x"]));
        let html = render(&field, Some(&value), None);
        assert!(html.contains(">1. y<"));
        assert!(html.contains(">2. x<"));
    }

    #[test]
    fn test_label_text_escaped() {
        let field = FormField::new("x", FieldType::Text).with_label("<b>bold</b>");
        let html = render(&field, None, None);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_errors_to_map_last_write_wins() {
        let errors = vec![
            ValidationError { field: "a".to_string(), message: "first".to_string() },
            ValidationError { field: "a".to_string(), message: "second".to_string() },
            ValidationError { field: "b".to_string(), message: "only".to_string() },
        ];
        let map = errors_to_map(&errors);
        assert_eq!(map.get("a").map(String::as_str), Some("second"));
        assert_eq!(map.get("b").map(String::as_str), Some("only"));
    }

    fn visible_when(op: VisibilityOp, value: serde_json::Value) -> FormField {
        let mut field = FormField::new("dependent", FieldType::Text);
        field.visible_when = Some(VisibleWhen {
            field: "controller".to_string(),
            operator: op,
            value,
        });
        field
    }

    #[test]
    fn test_visibility_conditions() {
        let mut values = SubmitData::new();
        values.insert("controller".to_string(), FieldValue::text("yes"));
        assert!(field_visible(&visible_when(VisibilityOp::Eq, serde_json::json!("yes")), &values));
        assert!(!field_visible(&visible_when(VisibilityOp::Eq, serde_json::json!("no")), &values));
        assert!(field_visible(&visible_when(VisibilityOp::Neq, serde_json::json!("no")), &values));

        values.insert("controller".to_string(), FieldValue::from(7i64));
        assert!(field_visible(&visible_when(VisibilityOp::Gt, serde_json::json!(5)), &values));
        assert!(!field_visible(&visible_when(VisibilityOp::Lt, serde_json::json!(5)), &values));

        values.insert(
            "controller".to_string(),
            FieldValue::Json(serde_json::json!(["a", "b"])),
        );
        assert!(field_visible(
            &visible_when(VisibilityOp::Contains, serde_json::json!("a")),
            &values
        ));
        assert!(!field_visible(
            &visible_when(VisibilityOp::Contains, serde_json::json!("z")),
            &values
        ));
    }

    #[test]
    fn test_unconditional_fields_always_visible() {
        let field = FormField::new("plain", FieldType::Text);
        assert!(field_visible(&field, &SubmitData::new()));
    }

    fn status_with_fields(fields: Vec<FormField>) -> FormStatusResponse {
        FormStatusResponse {
            active: true,
            schema: Some(FormSchema { fields, styling: None }),
            ..Default::default()
        }
    }

    #[test]
    fn test_form_chrome() {
        let mut status = status_with_fields(vec![FormField::new("email", FieldType::Email)]);
        status.settings = Some(crate::types::FormSettings {
            honeypot: true,
            ..Default::default()
        });
        let html = render_form(
            &status,
            &SubmitData::new(),
            &BTreeMap::new(),
            &RenderOptions::new().page_url("https://host/p"),
        )
        .to_html();
        assert!(html.starts_with("<form class=\"forms-expert\" novalidate>"));
        assert!(html.contains("name=\"_hp\""));
        assert!(html.contains("tabindex=\"-1\""));
        assert!(html.contains("name=\"pageUrl\" value=\"https://host/p\""));
        assert!(html.contains(">Submit</button>"));
        assert!(html.contains("Powered by Forms Expert"));
    }

    #[test]
    fn test_branding_can_be_disabled() {
        let mut status = status_with_fields(vec![]);
        status.branding = Some(crate::types::FormBranding {
            enabled: false,
            text: None,
            url: None,
        });
        let html =
            render_form(&status, &SubmitData::new(), &BTreeMap::new(), &RenderOptions::new())
                .to_html();
        assert!(!html.contains("forms-expert-branding"));
    }

    #[test]
    fn test_button_text_precedence() {
        let mut status = status_with_fields(vec![]);
        status.styling = Some(FormStyling {
            button_text: Some("Send it".to_string()),
            ..Default::default()
        });
        let html = render_form(
            &status,
            &SubmitData::new(),
            &BTreeMap::new(),
            &RenderOptions::new().submit_text("Go"),
        )
        .to_html();
        assert!(html.contains(">Send it</button>"));
    }

    #[test]
    fn test_logo_and_cover_chrome() {
        let mut status = status_with_fields(vec![]);
        status.styling = Some(FormStyling {
            logo_url: Some("https://x/logo.png".to_string()),
            logo_position: Some(LogoPosition::TopRight),
            cover_image_url: Some("https://x/cover.jpg".to_string()),
            ..Default::default()
        });
        let html =
            render_form(&status, &SubmitData::new(), &BTreeMap::new(), &RenderOptions::new())
                .to_html();
        assert!(html.contains("forms-expert-cover\" src=\"https://x/cover.jpg\""));
        assert!(html.contains("forms-expert-logo forms-expert-logo-top-right"));
        assert!(html.contains("src=\"https://x/logo.png\""));
    }

    #[test]
    fn test_captcha_container_rendered() {
        let status = status_with_fields(vec![]);
        let html = render_form(
            &status,
            &SubmitData::new(),
            &BTreeMap::new(),
            &RenderOptions::new().captcha(CaptchaProvider::Turnstile, "site-key"),
        )
        .to_html();
        assert!(html.contains("class=\"cf-turnstile\""));
        assert!(html.contains("data-sitekey=\"site-key\""));
    }

    #[test]
    fn test_invisible_fields_skipped() {
        let mut controller = FormField::new("controller", FieldType::Text);
        controller.label = Some("Controller".to_string());
        let dependent = visible_when(VisibilityOp::Eq, serde_json::json!("show"));
        let status = status_with_fields(vec![controller, dependent]);
        let html =
            render_form(&status, &SubmitData::new(), &BTreeMap::new(), &RenderOptions::new())
                .to_html();
        assert!(!html.contains("forms-expert-field-dependent"));
    }

    #[test]
    fn test_success_and_service_views() {
        let success = render_success("Thanks!").to_html();
        assert!(success.contains("forms-expert-success-message\">Thanks!"));
        assert!(render_loading().to_html().contains("forms-expert-spinner"));
        assert!(render_unavailable("Form closed").to_html().contains("Form closed"));
    }
}
