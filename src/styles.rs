//! Styling tokens and stylesheet generation.
//!
//! Styling is an enumerated-option configuration, not free-form CSS: every
//! token maps through a total lookup table (all variants plus a default arm)
//! to a concrete measurement, so a partially specified styling object is
//! always renderable.

use serde::{Deserialize, Serialize};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

/// Input corner radius bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderRadius {
    None,
    Sm,
    Md,
    Lg,
}

/// Submit button corner radius bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonRadius {
    None,
    Small,
    Medium,
    Large,
    Full,
}

/// Base font size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Sm,
    Md,
    Lg,
}

/// Placeholder font size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderFontSize {
    Small,
    Medium,
    Large,
}

/// Submit button fill style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Filled,
    Outline,
}

/// Label placement relative to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Top,
    Left,
    Floating,
}

/// Overall form width bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormWidth {
    Narrow,
    Medium,
    Wide,
    Full,
}

/// Field arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLayout {
    Stacked,
    Inline,
}

/// Submit button alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAlign {
    Left,
    Center,
    Right,
}

/// Spacing bucket shared by field spacing and form padding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    Normal,
    Relaxed,
    Spacious,
}

/// Label-to-input spacing bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSpacing {
    Compact,
    Normal,
    Relaxed,
}

/// Logo placement above the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogoPosition {
    #[serde(rename = "top-left")]
    TopLeft,
    #[serde(rename = "top-center")]
    TopCenter,
    #[serde(rename = "top-right")]
    TopRight,
}

/// Enumerated-option styling descriptor.
///
/// Every key is optional; unset keys fall through to the default arm of the
/// corresponding lookup table, so the descriptor merges shallowly across the
/// default/schema/response layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStyling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_style: Option<ButtonStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_position: Option<LabelPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_width: Option<FormWidth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_layout: Option<FieldLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_radius: Option<ButtonRadius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_align: Option<ButtonAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_spacing: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_padding: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_spacing: Option<LabelSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_font_size: Option<PlaceholderFontSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_required_asterisk: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_position: Option<LogoPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_overlay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent_background: Option<bool>,
}

impl FormStyling {
    /// Shallow per-key overlay: keys set in `over` win, everything else keeps
    /// the value from `self`. Order-significant and deliberately not a deep
    /// merge.
    pub fn overlay(&self, over: &FormStyling) -> FormStyling {
        FormStyling {
            theme: over.theme.or(self.theme),
            primary_color: over.primary_color.clone().or_else(|| self.primary_color.clone()),
            background_color: over
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            text_color: over.text_color.clone().or_else(|| self.text_color.clone()),
            error_color: over.error_color.clone().or_else(|| self.error_color.clone()),
            success_color: over.success_color.clone().or_else(|| self.success_color.clone()),
            border_radius: over.border_radius.or(self.border_radius),
            font_size: over.font_size.or(self.font_size),
            button_style: over.button_style.or(self.button_style),
            label_position: over.label_position.or(self.label_position),
            custom_css: over.custom_css.clone().or_else(|| self.custom_css.clone()),
            font_family: over.font_family.clone().or_else(|| self.font_family.clone()),
            form_width: over.form_width.or(self.form_width),
            field_layout: over.field_layout.or(self.field_layout),
            button_color: over.button_color.clone().or_else(|| self.button_color.clone()),
            button_text: over.button_text.clone().or_else(|| self.button_text.clone()),
            button_radius: over.button_radius.or(self.button_radius),
            button_align: over.button_align.or(self.button_align),
            field_spacing: over.field_spacing.or(self.field_spacing),
            form_padding: over.form_padding.or(self.form_padding),
            label_spacing: over.label_spacing.or(self.label_spacing),
            placeholder_font_size: over.placeholder_font_size.or(self.placeholder_font_size),
            hide_required_asterisk: over.hide_required_asterisk.or(self.hide_required_asterisk),
            logo_url: over.logo_url.clone().or_else(|| self.logo_url.clone()),
            logo_position: over.logo_position.or(self.logo_position),
            cover_image_url: over
                .cover_image_url
                .clone()
                .or_else(|| self.cover_image_url.clone()),
            background_image_url: over
                .background_image_url
                .clone()
                .or_else(|| self.background_image_url.clone()),
            background_overlay: over.background_overlay.or(self.background_overlay),
            transparent_background: over.transparent_background.or(self.transparent_background),
        }
    }

    /// Resolve the effective styling for a form: schema-level styling overlaid
    /// by response-level styling, later layers winning per key.
    pub fn resolved(schema: Option<&FormStyling>, response: Option<&FormStyling>) -> FormStyling {
        let base = schema.cloned().unwrap_or_default();
        match response {
            Some(over) => base.overlay(over),
            None => base,
        }
    }
}

/// Input corner radius measurement
pub fn border_radius(radius: Option<BorderRadius>) -> &'static str {
    match radius {
        Some(BorderRadius::None) => "0",
        Some(BorderRadius::Sm) => "0.125rem",
        Some(BorderRadius::Md) => "0.375rem",
        Some(BorderRadius::Lg) => "0.5rem",
        None => "0.375rem",
    }
}

/// Button corner radius measurement
pub fn button_radius(radius: Option<ButtonRadius>) -> &'static str {
    match radius {
        Some(ButtonRadius::None) => "0",
        Some(ButtonRadius::Small) => "4px",
        Some(ButtonRadius::Medium) => "8px",
        Some(ButtonRadius::Large) => "12px",
        Some(ButtonRadius::Full) => "9999px",
        None => "8px",
    }
}

/// Base font size measurement
pub fn font_size(size: Option<FontSize>) -> &'static str {
    match size {
        Some(FontSize::Sm) => "0.875rem",
        Some(FontSize::Md) => "1rem",
        Some(FontSize::Lg) => "1.125rem",
        None => "1rem",
    }
}

/// Placeholder font size measurement
pub fn placeholder_font_size(size: Option<PlaceholderFontSize>) -> &'static str {
    match size {
        Some(PlaceholderFontSize::Small) => "0.75rem",
        Some(PlaceholderFontSize::Medium) => "0.875rem",
        Some(PlaceholderFontSize::Large) => "1rem",
        None => "0.875rem",
    }
}

/// Vertical gap between fields
pub fn field_spacing(spacing: Option<Spacing>) -> &'static str {
    match spacing {
        Some(Spacing::Compact) => "0.5rem",
        Some(Spacing::Normal) => "1rem",
        Some(Spacing::Relaxed) => "1.5rem",
        Some(Spacing::Spacious) => "2rem",
        None => "1rem",
    }
}

/// Padding around the form body
pub fn form_padding(padding: Option<Spacing>) -> &'static str {
    match padding {
        Some(Spacing::Compact) => "1rem",
        Some(Spacing::Normal) => "1.5rem",
        Some(Spacing::Relaxed) => "2.5rem",
        Some(Spacing::Spacious) => "3.5rem",
        None => "1.5rem",
    }
}

/// Gap between a label and its input
pub fn label_spacing(spacing: Option<LabelSpacing>) -> &'static str {
    match spacing {
        Some(LabelSpacing::Compact) => "0.125rem",
        Some(LabelSpacing::Normal) => "0.25rem",
        Some(LabelSpacing::Relaxed) => "0.75rem",
        None => "0.25rem",
    }
}

/// Maximum width of the form
pub fn form_width(width: Option<FormWidth>) -> &'static str {
    match width {
        Some(FormWidth::Narrow) => "28rem",
        Some(FormWidth::Medium) => "36rem",
        Some(FormWidth::Wide) => "48rem",
        Some(FormWidth::Full) => "100%",
        None => "36rem",
    }
}

/// Flexbox alignment for the submit button row
pub fn button_align(align: Option<ButtonAlign>) -> &'static str {
    match align {
        Some(ButtonAlign::Left) => "flex-start",
        Some(ButtonAlign::Center) => "center",
        Some(ButtonAlign::Right) => "flex-end",
        None => "center",
    }
}

fn color_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value.as_deref().unwrap_or(default)
}

/// Generate the scoped stylesheet for a resolved styling descriptor.
pub fn stylesheet(s: &FormStyling) -> String {
    let dark = s.theme == Some(Theme::Dark);
    let primary = color_or(&s.primary_color, "#3b82f6");
    let background = color_or(&s.background_color, "#ffffff");
    let text = color_or(&s.text_color, "#1f2937");
    let error = color_or(&s.error_color, "#ef4444");
    let success = color_or(&s.success_color, "#22c55e");
    let radius = border_radius(s.border_radius);
    let btn_radius = button_radius(s.button_radius);
    let base_font = font_size(s.font_size);
    let ph_font = placeholder_font_size(s.placeholder_font_size);
    let spacing = field_spacing(s.field_spacing);
    let padding = form_padding(s.form_padding);
    let label_gap = label_spacing(s.label_spacing);
    let width = form_width(s.form_width);
    let btn_align = button_align(s.button_align);
    let btn_color = s.button_color.as_deref().unwrap_or(primary);
    let font_family = s
        .font_family
        .as_deref()
        .unwrap_or("system-ui, -apple-system, sans-serif");
    let input_border = if dark { "#4b5563" } else { "#d1d5db" };
    let input_bg = if dark { "#374151" } else { "#ffffff" };
    let muted = if dark { "#9ca3af" } else { "#6b7280" };
    let inline_labels =
        s.label_position == Some(LabelPosition::Left) || s.field_layout == Some(FieldLayout::Inline);

    let wrapper_background = match s.background_image_url.as_deref() {
        Some(url) => format!(
            "background-image: url({url}); background-size: cover; background-position: center;"
        ),
        None => format!("background-color: {background};"),
    };
    let overlay_alpha = s.background_overlay.unwrap_or(0.0);
    let form_background = if s.transparent_background == Some(true) {
        "transparent"
    } else {
        background
    };
    let group_layout = if inline_labels {
        "display: flex; align-items: flex-start; gap: 1rem;"
    } else {
        ""
    };
    let label_layout = if inline_labels {
        "width: 33%; flex-shrink: 0; padding-top: 0.5rem; margin-bottom: 0;".to_string()
    } else {
        format!("margin-bottom: {label_gap};")
    };
    let wrapper_layout = if inline_labels { "flex: 1;" } else { "" };
    let button_face = match s.button_style {
        Some(ButtonStyle::Outline) => format!(
            "background-color: transparent; color: {btn_color}; border: 2px solid {btn_color};"
        ),
        _ => format!("background-color: {btn_color}; color: white; border: none;"),
    };
    let button_width = if s.button_align.is_some() { "" } else { "width: 100%;" };
    let custom_css = s.custom_css.as_deref().unwrap_or("");

    format!(
        r#".forms-expert-wrapper {{
  {wrapper_background}
  position: relative;
}}

.forms-expert-overlay {{
  position: absolute;
  inset: 0;
  background-color: rgba(0,0,0,{overlay_alpha});
  pointer-events: none;
}}

.forms-expert {{
  font-family: {font_family};
  font-size: {base_font};
  color: {text};
  background-color: {form_background};
  padding: {padding};
  border-radius: {radius};
  box-sizing: border-box;
  max-width: {width};
  width: 100%;
  margin: 0 auto;
  position: relative;
}}

.forms-expert * {{ box-sizing: border-box; }}

.forms-expert-logo {{ display: block; max-height: 48px; margin-bottom: 1rem; }}
.forms-expert-logo-top-left {{ text-align: left; }}
.forms-expert-logo-top-center {{ text-align: center; }}
.forms-expert-logo-top-right {{ text-align: right; }}
.forms-expert-logo img {{ max-height: 48px; }}

.forms-expert-cover {{
  width: 100%;
  max-height: 200px;
  object-fit: cover;
  border-radius: {radius} {radius} 0 0;
  margin-bottom: 1rem;
}}

.forms-expert-group {{
  margin-bottom: {spacing};
  {group_layout}
}}

.forms-expert-label {{
  display: block;
  font-weight: 500;
  color: {text};
  {label_layout}
}}

.forms-expert-required {{ color: #ef4444; margin-left: 0.25rem; }}

.forms-expert-input-wrapper {{ {wrapper_layout} }}

.forms-expert-input,
.forms-expert-textarea,
.forms-expert-select {{
  width: 100%;
  padding: 0.5rem 0.75rem;
  border: 1px solid {input_border};
  border-radius: {radius};
  font-size: {base_font};
  font-family: inherit;
  background-color: {input_bg};
  color: {text};
  transition: border-color 0.15s, box-shadow 0.15s;
}}

.forms-expert-input::placeholder,
.forms-expert-textarea::placeholder {{ font-size: {ph_font}; }}

.forms-expert-input:focus,
.forms-expert-textarea:focus,
.forms-expert-select:focus {{
  outline: none;
  border-color: {primary};
  box-shadow: 0 0 0 2px {primary}33;
}}

.forms-expert-input.forms-expert-error,
.forms-expert-textarea.forms-expert-error,
.forms-expert-select.forms-expert-error {{ border-color: #ef4444; }}

.forms-expert-textarea {{ min-height: 100px; resize: vertical; }}

.forms-expert-checkbox-group {{
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin-bottom: {spacing};
}}

.forms-expert-checkbox {{
  width: 1rem;
  height: 1rem;
  accent-color: {primary};
  cursor: pointer;
}}

.forms-expert-file {{
  width: 100%;
  padding: 0.5rem 0.75rem;
  border: 1px solid {input_border};
  border-radius: {radius};
  font-size: {base_font};
  background-color: {input_bg};
  cursor: pointer;
}}

.forms-expert-error-message {{
  color: {error};
  font-size: 0.875rem;
  margin-top: 0.25rem;
}}

.forms-expert-button-wrapper {{
  display: flex;
  justify-content: {btn_align};
  margin-top: 1rem;
}}

.forms-expert-button {{
  {button_width}
  padding: 0.625rem 1.25rem;
  font-weight: 500;
  font-size: {base_font};
  font-family: inherit;
  border-radius: {btn_radius};
  cursor: pointer;
  transition: opacity 0.2s, transform 0.1s;
  {button_face}
}}

.forms-expert-button:hover {{ opacity: 0.9; }}
.forms-expert-button:active {{ transform: scale(0.98); }}
.forms-expert-button:disabled {{ opacity: 0.5; cursor: not-allowed; transform: none; }}

.forms-expert-button-loading {{
  display: inline-flex;
  align-items: center;
  justify-content: center;
  gap: 0.5rem;
}}

.forms-expert-spinner {{
  width: 1rem;
  height: 1rem;
  border: 2px solid transparent;
  border-top-color: currentColor;
  border-radius: 50%;
  animation: forms-expert-spin 0.6s linear infinite;
}}

@keyframes forms-expert-spin {{ to {{ transform: rotate(360deg); }} }}

.forms-expert-honeypot {{ position: absolute; left: -9999px; opacity: 0; }}

.forms-expert-success {{ text-align: center; padding: 2rem; color: {text}; }}

.forms-expert-success-icon {{
  width: 3rem;
  height: 3rem;
  margin: 0 auto 1rem;
  color: {success};
}}

.forms-expert-success-message {{
  font-size: 1.125rem;
  font-weight: 500;
  margin-bottom: 0.5rem;
}}

.forms-expert-branding {{
  text-align: center;
  margin-top: 1rem;
  padding-top: 0.75rem;
  border-top: 1px solid {branding_border};
}}

.forms-expert-branding a {{
  color: {muted};
  text-decoration: none;
  font-size: 0.75rem;
}}

.forms-expert-branding a:hover {{ text-decoration: underline; }}

.forms-expert-rating {{ display: flex; gap: 0.25rem; }}
.forms-expert-rating-star {{
  width: 2rem; height: 2rem; cursor: pointer; border: none;
  background: none; padding: 0; font-size: 1.5rem; color: {input_border};
  transition: color 0.15s;
}}
.forms-expert-rating-star.active {{ color: #f59e0b; }}

.forms-expert-scale {{ display: flex; gap: 0.25rem; flex-wrap: wrap; }}
.forms-expert-scale-labels {{
  display: flex; justify-content: space-between;
  font-size: 0.75rem; color: {muted}; margin-top: 0.25rem;
}}
.forms-expert-scale-btn {{
  min-width: 2.25rem; height: 2.25rem; border-radius: {radius}; cursor: pointer;
  border: 1px solid {input_border};
  background: {input_bg}; color: {text};
  font-size: 0.875rem; transition: all 0.15s;
}}
.forms-expert-scale-btn.active {{
  background-color: {primary}; color: white; border-color: {primary};
}}

.forms-expert-radio-group,
.forms-expert-multiselect-group {{ display: flex; flex-direction: column; gap: 0.5rem; }}
.forms-expert-radio-item,
.forms-expert-checkbox-item {{ display: flex; align-items: center; gap: 0.5rem; cursor: pointer; }}
.forms-expert-radio-item input,
.forms-expert-checkbox-item input {{ accent-color: {primary}; }}

.forms-expert-slider {{ width: 100%; accent-color: {primary}; }}

.forms-expert-image-choice {{ display: flex; flex-wrap: wrap; gap: 0.5rem; }}
.forms-expert-image-choice-item {{
  border: 2px solid {input_border}; border-radius: {radius};
  padding: 0.5rem; cursor: pointer; text-align: center; transition: border-color 0.15s;
}}
.forms-expert-image-choice-item.active {{ border-color: {primary}; }}
.forms-expert-image-choice-item img {{
  max-width: 80px; max-height: 80px; object-fit: cover; border-radius: {radius};
}}

.forms-expert-ranking-item {{
  border: 1px solid {input_border}; border-radius: {radius};
  padding: 0.5rem 0.75rem; margin-bottom: 0.25rem; background: {input_bg};
}}

.forms-expert-date-range,
.forms-expert-location-coords {{ display: flex; gap: 0.5rem; }}

.forms-expert-address,
.forms-expert-name,
.forms-expert-location {{ display: flex; flex-direction: column; gap: 0.5rem; }}

{custom_css}"#,
        branding_border = if dark { "#374151" } else { "#e5e7eb" },
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_radius_totality() {
        let all = [
            None,
            Some(BorderRadius::None),
            Some(BorderRadius::Sm),
            Some(BorderRadius::Md),
            Some(BorderRadius::Lg),
        ];
        for v in all {
            assert!(!border_radius(v).is_empty());
        }
    }

    #[test]
    fn test_all_token_tables_are_total() {
        for v in [
            None,
            Some(ButtonRadius::None),
            Some(ButtonRadius::Small),
            Some(ButtonRadius::Medium),
            Some(ButtonRadius::Large),
            Some(ButtonRadius::Full),
        ] {
            assert!(!button_radius(v).is_empty());
        }
        for v in [None, Some(FontSize::Sm), Some(FontSize::Md), Some(FontSize::Lg)] {
            assert!(!font_size(v).is_empty());
        }
        for v in [
            None,
            Some(PlaceholderFontSize::Small),
            Some(PlaceholderFontSize::Medium),
            Some(PlaceholderFontSize::Large),
        ] {
            assert!(!placeholder_font_size(v).is_empty());
        }
        for v in [
            None,
            Some(Spacing::Compact),
            Some(Spacing::Normal),
            Some(Spacing::Relaxed),
            Some(Spacing::Spacious),
        ] {
            assert!(!field_spacing(v).is_empty());
            assert!(!form_padding(v).is_empty());
        }
        for v in [
            None,
            Some(LabelSpacing::Compact),
            Some(LabelSpacing::Normal),
            Some(LabelSpacing::Relaxed),
        ] {
            assert!(!label_spacing(v).is_empty());
        }
        for v in [
            None,
            Some(FormWidth::Narrow),
            Some(FormWidth::Medium),
            Some(FormWidth::Wide),
            Some(FormWidth::Full),
        ] {
            assert!(!form_width(v).is_empty());
        }
        for v in [
            None,
            Some(ButtonAlign::Left),
            Some(ButtonAlign::Center),
            Some(ButtonAlign::Right),
        ] {
            assert!(!button_align(v).is_empty());
        }
    }

    #[test]
    fn test_overlay_later_layer_wins_per_key() {
        let schema = FormStyling {
            primary_color: Some("#111111".to_string()),
            border_radius: Some(BorderRadius::Lg),
            ..Default::default()
        };
        let response = FormStyling {
            primary_color: Some("#222222".to_string()),
            font_size: Some(FontSize::Lg),
            ..Default::default()
        };
        let merged = FormStyling::resolved(Some(&schema), Some(&response));
        assert_eq!(merged.primary_color.as_deref(), Some("#222222"));
        // untouched keys survive from the earlier layer
        assert_eq!(merged.border_radius, Some(BorderRadius::Lg));
        assert_eq!(merged.font_size, Some(FontSize::Lg));
    }

    #[test]
    fn test_stylesheet_embeds_resolved_tokens() {
        let styling = FormStyling {
            primary_color: Some("#ff0000".to_string()),
            border_radius: Some(BorderRadius::Lg),
            theme: Some(Theme::Dark),
            ..Default::default()
        };
        let css = stylesheet(&styling);
        assert!(css.contains("border-radius: 0.5rem"));
        assert!(css.contains("#ff0000"));
        assert!(css.contains("#374151")); // dark-theme input background
    }

    #[test]
    fn test_stylesheet_defaults_without_styling() {
        let css = stylesheet(&FormStyling::default());
        assert!(css.contains("#3b82f6"));
        assert!(css.contains("max-width: 36rem"));
        assert!(css.contains("padding: 1.5rem"));
    }

    #[test]
    fn test_custom_css_appended_last() {
        let styling = FormStyling {
            custom_css: Some(".forms-expert { border: 1px dashed red; }".to_string()),
            ..Default::default()
        };
        let css = stylesheet(&styling);
        assert!(css.ends_with(".forms-expert { border: 1px dashed red; }"));
    }
}
