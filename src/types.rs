//! Wire data model for the Forms Expert API

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::styles::FormStyling;

/// Field kinds a schema may declare.
///
/// This is a closed sum: the renderer dispatches with an exhaustive `match`,
/// so adding a kind is a one-place change with compiler-enforced coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    // Basic
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Checkbox,
    File,
    Date,
    Hidden,
    // Interactive
    Radio,
    Multiselect,
    Rating,
    Scale,
    Toggle,
    Ranking,
    ImageChoice,
    Phone,
    Url,
    Password,
    RichText,
    Slider,
    Currency,
    Time,
    Datetime,
    DateRange,
    Address,
    Name,
    Dropdown,
    ColorPicker,
    Location,
    OpinionScale,
    Consent,
    // Layout
    Heading,
    Divider,
    Paragraph,
}

impl FieldType {
    /// Layout fields render chrome only and carry no data.
    pub fn is_layout(self) -> bool {
        matches!(self, FieldType::Heading | FieldType::Divider | FieldType::Paragraph)
    }

    /// Whether values for this field belong in the submitted value map.
    pub fn captures_value(self) -> bool {
        !self.is_layout()
    }
}

/// A selectable option with an explicit value and optional thumbnail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRecord {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One selectable choice: either a bare string or a labeled record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOption {
    Plain(String),
    Detailed(OptionRecord),
}

impl FieldOption {
    /// The submitted value for this option
    pub fn value(&self) -> &str {
        match self {
            FieldOption::Plain(s) => s,
            FieldOption::Detailed(r) => &r.value,
        }
    }

    /// The display label for this option
    pub fn label(&self) -> &str {
        match self {
            FieldOption::Plain(s) => s,
            FieldOption::Detailed(r) => &r.label,
        }
    }

    /// Thumbnail URL, for image-choice options
    pub fn image_url(&self) -> Option<&str> {
        match self {
            FieldOption::Plain(_) => None,
            FieldOption::Detailed(r) => r.image_url.as_deref(),
        }
    }
}

impl From<&str> for FieldOption {
    fn from(s: &str) -> Self {
        FieldOption::Plain(s.to_string())
    }
}

/// Sub-fields an address field may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressPart {
    Street,
    Street2,
    City,
    State,
    Zip,
    Country,
}

impl AddressPart {
    /// Key used in the composite value object
    pub fn key(self) -> &'static str {
        match self {
            AddressPart::Street => "street",
            AddressPart::Street2 => "street2",
            AddressPart::City => "city",
            AddressPart::State => "state",
            AddressPart::Zip => "zip",
            AddressPart::Country => "country",
        }
    }

    /// Placeholder label for the sub-input
    pub fn label(self) -> &'static str {
        match self {
            AddressPart::Street => "Street",
            AddressPart::Street2 => "Street Line 2",
            AddressPart::City => "City",
            AddressPart::State => "State",
            AddressPart::Zip => "ZIP",
            AddressPart::Country => "Country",
        }
    }

    /// Default subset rendered when the schema declares none
    pub fn defaults() -> &'static [AddressPart] {
        &[
            AddressPart::Street,
            AddressPart::City,
            AddressPart::State,
            AddressPart::Zip,
            AddressPart::Country,
        ]
    }
}

/// Sub-fields a name field may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePart {
    Prefix,
    First,
    Middle,
    Last,
    Suffix,
}

impl NamePart {
    /// Key used in the composite value object
    pub fn key(self) -> &'static str {
        match self {
            NamePart::Prefix => "prefix",
            NamePart::First => "first",
            NamePart::Middle => "middle",
            NamePart::Last => "last",
            NamePart::Suffix => "suffix",
        }
    }

    /// Placeholder label for the sub-input
    pub fn label(self) -> &'static str {
        match self {
            NamePart::Prefix => "Prefix",
            NamePart::First => "First Name",
            NamePart::Middle => "Middle",
            NamePart::Last => "Last Name",
            NamePart::Suffix => "Suffix",
        }
    }

    /// Default subset rendered when the schema declares none
    pub fn defaults() -> &'static [NamePart] {
        &[NamePart::First, NamePart::Last]
    }
}

/// Comparison operator for conditional field visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityOp {
    Eq,
    Neq,
    Contains,
    Gt,
    Lt,
}

/// Condition gating a field on another field's current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleWhen {
    /// Name of the controlling field
    pub field: String,
    pub operator: VisibilityOp,
    pub value: serde_json::Value,
}

/// One schema-declared input.
///
/// `name` is unique within a schema. Layout kinds (`heading`, `divider`,
/// `paragraph`) carry no data and are excluded from the submitted value map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mime_types: Option<Vec<String>>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_fields: Option<Vec<AddressPart>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_fields: Option<Vec<NamePart>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
}

impl FormField {
    /// Create a field with the given name and kind; everything else optional
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: None,
            placeholder: None,
            required: false,
            options: None,
            default_value: None,
            max_file_size: None,
            allowed_mime_types: None,
            multiple: false,
            min: None,
            max: None,
            step: None,
            rating_max: None,
            low_label: None,
            high_label: None,
            default_country_code: None,
            currency_code: None,
            currency_symbol: None,
            address_fields: None,
            name_fields: None,
            content: None,
            paragraph_font_size: None,
            consent_text: None,
            consent_url: None,
            max_length: None,
            step_id: None,
            visible_when: None,
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the selectable options
    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// Set static content (headings, paragraphs, consent text)
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Ordered field list plus optional schema-level styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<FormStyling>,
}

/// Captcha provider kinds supported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptchaProvider {
    Turnstile,
    Recaptcha,
    Hcaptcha,
}

/// Captcha requirements for a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<CaptchaProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_key: Option<String>,
}

/// Submission-related settings declared by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    /// Deprecated; superseded by the top-level captcha settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha: Option<CaptchaSettings>,
    #[serde(default)]
    pub honeypot: bool,
    #[serde(default)]
    pub allow_attachments: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attachments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attachment_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_form_name: Option<bool>,
}

/// Branding footer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormBranding {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Access control summary for hosted forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessControl {
    pub mode: String,
    #[serde(default)]
    pub password_protected: bool,
}

/// Success page behaviors for hosted forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuccessPageType {
    Message,
    Redirect,
    Custom,
}

/// Hosted page settings (title, success page, redirect)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_form_name: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_page_type: Option<SuccessPageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_success_html: Option<String>,
}

/// Embed sizing hints for iframe/script embeds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_resize: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent_background: Option<bool>,
}

/// One step of a multi-step form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormStep {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Whether submission requires a prior remote validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// Submit directly, no validation pass required
    Free,
    /// Validate against the schema before submitting
    Schema,
}

/// Where the form is served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Hosted,
    Embed,
    Both,
}

/// Single-page or multi-step layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormLayout {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "multi-step")]
    MultiStep,
}

/// Full remote answer to "is this form usable right now".
///
/// Replaced atomically by the session on each `initialize`; never partially
/// mutated by the SDK.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStatusResponse {
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FormMode>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub form_type: Option<FormType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<FormLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<FormSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<FormStep>>,
    /// Top-level styling; overrides schema-level styling per key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<FormStyling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_config: Option<EmbedConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Captcha settings (top-level; preferred over `settings.captcha`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha: Option<CaptchaSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<FormSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<AccessControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding: Option<FormBranding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_config: Option<HostedConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Published translation language codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<String>>,
    /// Language applied to this response (None for the base language)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_language_switch: Option<bool>,
}

/// Field-scoped validation error from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Response of the remote validation endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

/// Response of a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default)]
    pub submission_id: String,
    #[serde(default)]
    pub message: String,
}

/// In-memory file attachment for upload fields
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl FileUpload {
    /// Create an attachment from raw bytes
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Size of the attachment in bytes
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the attachment is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One field's current value: a JSON-compatible value, a single file, or a
/// file list.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Json(serde_json::Value),
    File(FileUpload),
    Files(Vec<FileUpload>),
}

impl FieldValue {
    /// Convenience constructor for text values
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Json(serde_json::Value::String(s.into()))
    }

    /// True when this value routes submission to the multipart path
    pub fn has_files(&self) -> bool {
        match self {
            FieldValue::Json(_) => false,
            FieldValue::File(_) => true,
            FieldValue::Files(files) => !files.is_empty(),
        }
    }

    /// The JSON value, when this is not a file
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            FieldValue::Json(v) => Some(v),
            _ => None,
        }
    }

    /// String form used by text-like widgets; empty for files and nulls
    pub fn display_string(&self) -> String {
        match self {
            FieldValue::Json(serde_json::Value::String(s)) => s.clone(),
            FieldValue::Json(serde_json::Value::Number(n)) => n.to_string(),
            FieldValue::Json(serde_json::Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Json(v)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::text(s)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Json(serde_json::Value::Bool(b))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Json(serde_json::json!(n))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Json(serde_json::json!(n))
    }
}

impl From<FileUpload> for FieldValue {
    fn from(f: FileUpload) -> Self {
        FieldValue::File(f)
    }
}

impl From<Vec<FileUpload>> for FieldValue {
    fn from(f: Vec<FileUpload>) -> Self {
        FieldValue::Files(f)
    }
}

/// Field name -> current value map for one form session
pub type SubmitData = BTreeMap<String, FieldValue>;

/// Upload progress for multipart submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
    pub percentage: u32,
}

/// Progress callback invoked as the multipart body is streamed
pub type ProgressFn = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Per-call submission options
#[derive(Clone, Default)]
pub struct SubmitOptions {
    /// URL of the page hosting the form
    pub page_url: Option<String>,
    /// Captcha token obtained from the provider widget
    pub captcha_token: Option<String>,
    /// Upload progress callback; forces the multipart path
    pub on_progress: Option<ProgressFn>,
}

impl SubmitOptions {
    /// Options with every setting unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hosting page URL
    pub fn page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    /// Set the captcha token
    pub fn captcha_token(mut self, token: impl Into<String>) -> Self {
        self.captcha_token = Some(token.into());
        self
    }

    /// Install an upload-progress callback
    pub fn on_progress(mut self, f: impl Fn(UploadProgress) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for SubmitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitOptions")
            .field("page_url", &self.page_url)
            .field("captcha_token", &self.captcha_token)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

/// What went wrong with a candidate attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileErrorKind {
    Size,
    Type,
    Count,
}

/// Advisory client-side file validation error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileValidationError {
    pub field: String,
    pub file: String,
    pub error: FileErrorKind,
    pub message: String,
}
