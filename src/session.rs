//! Form session lifecycle.
//!
//! A [`FormSession`] owns one form's interaction state: the remote config,
//! the value map, the error maps and the lifecycle flags. It is a plain
//! single-writer state holder; UI layers observe it through [`subscribe`]
//! callbacks after each state change.
//!
//! [`subscribe`]: FormSession::subscribe

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::client::{FormsApi, FormsClient};
use crate::error::{Error, Result};
use crate::types::{
    CaptchaProvider, FieldValue, FileErrorKind, FileUpload, FileValidationError, FormMode,
    FormSchema, FormStatusResponse, ProgressFn, SubmissionResponse, SubmitData, SubmitOptions,
    UploadProgress, ValidationError,
};

/// Name of the injected honeypot field; real users never populate it
pub const HONEYPOT_FIELD: &str = "_hp";

/// Fallback attachment size limit when the form declares none
pub const DEFAULT_MAX_ATTACHMENT_SIZE: u64 = 10 * 1024 * 1024;

/// Fallback attachment count limit when the form declares none
pub const DEFAULT_MAX_ATTACHMENTS: u32 = 5;

/// Fallback message shown after a successful submission
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Lifecycle state of a form session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initializing,
    Ready,
    Submitting,
    Submitted,
}

type SubmitSuccessFn = Arc<dyn Fn(&SubmissionResponse) + Send + Sync>;
type SubmitErrorFn = Arc<dyn Fn(&Error) + Send + Sync>;
type ValidationErrorFn = Arc<dyn Fn(&[ValidationError]) + Send + Sync>;
type StateListenerFn = Arc<dyn Fn(SessionState) + Send + Sync>;

/// Per-session options and callbacks
#[derive(Clone, Default)]
pub struct SessionOptions {
    /// Language code requested on initialize
    pub lang: Option<String>,
    /// URL of the hosting page, forwarded on submit and view tracking
    pub page_url: Option<String>,
    /// Record a view after each successful initialize
    pub track_views: bool,
    pub on_submit_start: Option<Arc<dyn Fn() + Send + Sync>>,
    pub on_submit_success: Option<SubmitSuccessFn>,
    pub on_submit_error: Option<SubmitErrorFn>,
    pub on_validation_error: Option<ValidationErrorFn>,
    pub on_upload_progress: Option<ProgressFn>,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    pub fn track_views(mut self, enabled: bool) -> Self {
        self.track_views = enabled;
        self
    }

    pub fn on_submit_start(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_submit_start = Some(Arc::new(f));
        self
    }

    pub fn on_submit_success(
        mut self,
        f: impl Fn(&SubmissionResponse) + Send + Sync + 'static,
    ) -> Self {
        self.on_submit_success = Some(Arc::new(f));
        self
    }

    pub fn on_submit_error(mut self, f: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.on_submit_error = Some(Arc::new(f));
        self
    }

    pub fn on_validation_error(
        mut self,
        f: impl Fn(&[ValidationError]) + Send + Sync + 'static,
    ) -> Self {
        self.on_validation_error = Some(Arc::new(f));
        self
    }

    pub fn on_upload_progress(
        mut self,
        f: impl Fn(UploadProgress) + Send + Sync + 'static,
    ) -> Self {
        self.on_upload_progress = Some(Arc::new(f));
        self
    }
}

/// One form's interaction lifecycle.
///
/// Generic over the transport seam so the lifecycle logic is testable
/// without a network; production code uses the [`FormsClient`] default.
pub struct FormSession<A: FormsApi = FormsClient> {
    api: Arc<A>,
    slug: String,
    options: SessionOptions,
    state: SessionState,
    status: Option<FormStatusResponse>,
    values: SubmitData,
    errors: BTreeMap<String, String>,
    file_errors: Vec<FileValidationError>,
    last_error: Option<String>,
    progress: Arc<Mutex<Option<UploadProgress>>>,
    listeners: Vec<StateListenerFn>,
}

impl<A: FormsApi> FormSession<A> {
    /// Create a session for one form
    pub fn new(api: Arc<A>, slug: impl Into<String>, options: SessionOptions) -> Self {
        Self {
            api,
            slug: slug.into(),
            options,
            state: SessionState::Uninitialized,
            status: None,
            values: SubmitData::new(),
            errors: BTreeMap::new(),
            file_errors: Vec::new(),
            last_error: None,
            progress: Arc::new(Mutex::new(None)),
            listeners: Vec::new(),
        }
    }

    /// Slug of the form this session drives
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_initializing(&self) -> bool {
        self.state == SessionState::Initializing
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.state == SessionState::Submitted
    }

    /// Register a callback invoked after each state transition
    pub fn subscribe(&mut self, f: impl Fn(SessionState) + Send + Sync + 'static) {
        self.listeners.push(Arc::new(f));
    }

    fn transition(&mut self, state: SessionState) {
        self.state = state;
        for listener in &self.listeners {
            listener(state);
        }
    }

    /// Fetch the remote form config and become `Ready`.
    ///
    /// When view tracking is enabled, a non-blocking view call is fired after
    /// the fetch resolves; its outcome never affects the caller's flow.
    pub async fn initialize(&mut self) -> Result<()> {
        self.transition(SessionState::Initializing);
        let result = self
            .api
            .is_active(&self.slug, self.options.lang.as_deref())
            .await;
        match result {
            Ok(status) => {
                info!(slug = %self.slug, active = status.active, "form config loaded");
                self.status = Some(status);
                self.last_error = None;
                self.transition(SessionState::Ready);
                if self.options.track_views {
                    let api = self.api.clone();
                    let slug = self.slug.clone();
                    tokio::spawn(async move {
                        if let Err(err) = api.track_view(&slug).await {
                            debug!(slug = %slug, error = %err, "view tracking failed");
                        }
                    });
                }
                Ok(())
            }
            Err(err) => {
                warn!(slug = %self.slug, error = %err, "form config fetch failed");
                self.last_error = Some(err.to_string());
                self.transition(SessionState::Ready);
                Err(err)
            }
        }
    }

    /// Upsert a field value. Clears that field's error and nothing else.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        self.errors.remove(&name);
        self.values.insert(name, value.into());
    }

    /// Bulk upsert, clearing each touched field's error
    pub fn set_values(&mut self, values: impl IntoIterator<Item = (String, FieldValue)>) {
        for (name, value) in values {
            self.set_value(name, value);
        }
    }

    /// Clear all field errors and the last submission error
    pub fn clear_errors(&mut self) {
        self.errors.clear();
        self.file_errors.clear();
        self.last_error = None;
    }

    /// Current field values
    pub fn values(&self) -> &SubmitData {
        &self.values
    }

    /// Field name -> message map, collapsed last-write-wins per field
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Advisory client-side file errors from [`validate_files`](Self::validate_files)
    pub fn file_errors(&self) -> &[FileValidationError] {
        &self.file_errors
    }

    /// Message of the most recent failure, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Most recent upload progress observed during a multipart submit
    pub fn upload_progress(&self) -> Option<UploadProgress> {
        *self.progress.lock()
    }

    /// Remote config, once initialized
    pub fn config(&self) -> Option<&FormStatusResponse> {
        self.status.as_ref()
    }

    /// Validate the current values against the remote schema.
    ///
    /// Populates the error map (last write wins per field) on failure and
    /// returns `false`; leaves errors untouched on success.
    pub async fn validate(&mut self) -> Result<bool> {
        if self.status.is_none() {
            return Err(Error::NotInitialized);
        }
        let response = self.api.validate(&self.slug, &self.values).await?;
        if response.valid {
            return Ok(true);
        }
        for err in &response.errors {
            self.errors.insert(err.field.clone(), err.message.clone());
        }
        Ok(false)
    }

    /// Submit the form.
    ///
    /// Schema-mode forms run a remote validation pass first; a failing pass
    /// short-circuits without touching the submit endpoint and surfaces
    /// [`Error::Validation`] with the full ordered error list. Free-mode
    /// forms submit directly.
    pub async fn submit(&mut self, captcha_token: Option<String>) -> Result<SubmissionResponse> {
        if self.status.is_none() {
            return Err(Error::NotInitialized);
        }
        self.transition(SessionState::Submitting);
        *self.progress.lock() = None;
        if let Some(cb) = &self.options.on_submit_start {
            cb();
        }

        match self.submit_inner(captcha_token).await {
            Ok(response) => {
                info!(slug = %self.slug, submission_id = %response.submission_id, "form submitted");
                self.last_error = None;
                self.transition(SessionState::Submitted);
                if let Some(cb) = &self.options.on_submit_success {
                    cb(&response);
                }
                Ok(response)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                self.transition(SessionState::Ready);
                match &err {
                    Error::Validation(errors) => {
                        if let Some(cb) = &self.options.on_validation_error {
                            cb(errors);
                        }
                    }
                    other => {
                        warn!(slug = %self.slug, error = %other, "form submission failed");
                        if let Some(cb) = &self.options.on_submit_error {
                            cb(other);
                        }
                    }
                }
                Err(err)
            }
        }
    }

    async fn submit_inner(&mut self, captcha_token: Option<String>) -> Result<SubmissionResponse> {
        let data = self.submission_values();
        if self.mode() == Some(FormMode::Schema) {
            let response = self.api.validate(&self.slug, &data).await?;
            if !response.valid {
                for err in &response.errors {
                    self.errors.insert(err.field.clone(), err.message.clone());
                }
                return Err(Error::Validation(response.errors));
            }
        }

        let mut options = SubmitOptions::new();
        if let Some(url) = &self.options.page_url {
            options = options.page_url(url.clone());
        }
        if let Some(token) = captcha_token {
            options = options.captcha_token(token);
        }
        let wants_progress = self.options.on_upload_progress.is_some();
        let has_files = data.values().any(FieldValue::has_files);
        if wants_progress || has_files {
            let cell = self.progress.clone();
            let forward = self.options.on_upload_progress.clone();
            options.on_progress = Some(Arc::new(move |p: UploadProgress| {
                *cell.lock() = Some(p);
                if let Some(cb) = &forward {
                    cb(p);
                }
            }));
        }
        self.api.submit(&self.slug, &data, &options).await
    }

    /// Values actually sent on submit: layout fields dropped, hidden fields
    /// defaulted from the schema, honeypot injected when enabled.
    fn submission_values(&self) -> SubmitData {
        let mut data = self.values.clone();
        if let Some(schema) = self.schema() {
            for field in &schema.fields {
                if field.field_type.is_layout() {
                    data.remove(&field.name);
                } else if crate::types::FieldType::Hidden == field.field_type {
                    if let (None, Some(default)) = (data.get(&field.name), &field.default_value) {
                        data.insert(field.name.clone(), FieldValue::Json(default.clone()));
                    }
                }
            }
        }
        if self.honeypot_enabled() {
            data.entry(HONEYPOT_FIELD.to_string())
                .or_insert_with(|| FieldValue::text(""));
        }
        data
    }

    /// Return to the initial `Ready` state, clearing values, errors and flags.
    /// Idempotent.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.file_errors.clear();
        self.last_error = None;
        *self.progress.lock() = None;
        let state = if self.status.is_some() {
            SessionState::Ready
        } else {
            SessionState::Uninitialized
        };
        self.transition(state);
    }

    // --- derived accessors, pure functions of the current config ---

    /// Whether the form is currently accepting submissions
    pub fn is_active(&self) -> bool {
        self.status.as_ref().map(|s| s.active).unwrap_or(false)
    }

    /// Declared schema, when one was returned
    pub fn schema(&self) -> Option<&FormSchema> {
        self.status.as_ref().and_then(|s| s.schema.as_ref())
    }

    /// Validation mode of the form
    pub fn mode(&self) -> Option<FormMode> {
        self.status.as_ref().and_then(|s| s.mode)
    }

    /// Display name of the form
    pub fn form_name(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.name.as_deref())
    }

    fn captcha_settings(&self) -> Option<&crate::types::CaptchaSettings> {
        let status = self.status.as_ref()?;
        // Top-level captcha settings supersede the deprecated settings.captcha
        status
            .captcha
            .as_ref()
            .or_else(|| status.settings.as_ref().and_then(|s| s.captcha.as_ref()))
    }

    /// Whether a captcha token is required on submit
    pub fn requires_captcha(&self) -> bool {
        self.captcha_settings().map(|c| c.enabled).unwrap_or(false)
    }

    /// Declared captcha provider, when captcha is enabled
    pub fn captcha_provider(&self) -> Option<CaptchaProvider> {
        self.captcha_settings().and_then(|c| c.provider)
    }

    /// Site key for the captcha widget
    pub fn captcha_site_key(&self) -> Option<&str> {
        self.captcha_settings().and_then(|c| c.site_key.as_deref())
    }

    /// Whether the honeypot field should be rendered and submitted
    pub fn honeypot_enabled(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.settings.as_ref())
            .map(|s| s.honeypot)
            .unwrap_or(false)
    }

    /// Whether file attachments are accepted
    pub fn allows_attachments(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.settings.as_ref())
            .map(|s| s.allow_attachments)
            .unwrap_or(false)
    }

    /// Attachment count limit, defaulting to 5
    pub fn max_attachments(&self) -> u32 {
        self.status
            .as_ref()
            .and_then(|s| s.settings.as_ref())
            .and_then(|s| s.max_attachments)
            .unwrap_or(DEFAULT_MAX_ATTACHMENTS)
    }

    /// Attachment size limit in bytes, defaulting to 10 MiB
    pub fn max_attachment_size(&self) -> u64 {
        self.status
            .as_ref()
            .and_then(|s| s.settings.as_ref())
            .and_then(|s| s.max_attachment_size)
            .unwrap_or(DEFAULT_MAX_ATTACHMENT_SIZE)
    }

    /// Message to show after a successful submission
    pub fn success_message(&self) -> &str {
        let from_settings = self
            .status
            .as_ref()
            .and_then(|s| s.settings.as_ref())
            .and_then(|s| s.success_message.as_deref());
        let from_hosted = self
            .status
            .as_ref()
            .and_then(|s| s.hosted_config.as_ref())
            .and_then(|h| h.success_message.as_deref());
        from_settings
            .or(from_hosted)
            .unwrap_or(DEFAULT_SUCCESS_MESSAGE)
    }

    /// URL to redirect to after a successful submission
    pub fn redirect_url(&self) -> Option<&str> {
        let status = self.status.as_ref()?;
        status
            .settings
            .as_ref()
            .and_then(|s| s.redirect_url.as_deref())
            .or_else(|| {
                status
                    .hosted_config
                    .as_ref()
                    .and_then(|h| h.redirect_url.as_deref())
            })
    }

    /// Advisory check of candidate attachments against the form's limits and
    /// the field's declared MIME types. Records the result in `file_errors`;
    /// never blocks `submit`.
    pub fn validate_files(&mut self, field: &str, files: &[FileUpload]) -> bool {
        let mut errors = Vec::new();
        let max_count = self.max_attachments();
        let max_size = self.max_attachment_size();
        if files.len() as u32 > max_count {
            errors.push(FileValidationError {
                field: field.to_string(),
                file: String::new(),
                error: FileErrorKind::Count,
                message: format!("Maximum {max_count} file(s) allowed"),
            });
        }
        let allowed_types = self
            .schema()
            .and_then(|s| s.fields.iter().find(|f| f.name == field))
            .and_then(|f| f.allowed_mime_types.clone());
        for file in files {
            if file.len() > max_size {
                errors.push(FileValidationError {
                    field: field.to_string(),
                    file: file.file_name.clone(),
                    error: FileErrorKind::Size,
                    message: format!(
                        "File exceeds the maximum size of {}",
                        format_bytes(max_size)
                    ),
                });
            }
            if let Some(allowed) = &allowed_types {
                if !allowed.iter().any(|a| mime_matches(a, &file.content_type)) {
                    errors.push(FileValidationError {
                        field: field.to_string(),
                        file: file.file_name.clone(),
                        error: FileErrorKind::Type,
                        message: format!("File type {} is not allowed", file.content_type),
                    });
                }
            }
        }
        let ok = errors.is_empty();
        self.file_errors = errors;
        ok
    }
}

fn mime_matches(pattern: &str, content_type: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(prefix) => content_type
            .split('/')
            .next()
            .map(|main| main == prefix)
            .unwrap_or(false),
        None => pattern.eq_ignore_ascii_case(content_type),
    }
}

/// Human-readable size in base-1024 units, rounded to at most two decimals
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    let mut text = format!("{rounded:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{text} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        FieldType, FormField, FormSettings, SubmissionResponse, ValidationResponse,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct MockApi {
        status: Mutex<FormStatusResponse>,
        validation: Mutex<ValidationResponse>,
        submit_error_code: Mutex<Option<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockApi {
        fn with_status(status: FormStatusResponse) -> Arc<Self> {
            let api = Self::default();
            *api.status.lock() = status;
            *api.validation.lock() = ValidationResponse {
                valid: true,
                errors: vec![],
            };
            Arc::new(api)
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl FormsApi for MockApi {
        async fn is_active(&self, _slug: &str, _lang: Option<&str>) -> Result<FormStatusResponse> {
            self.calls.lock().push("is_active".to_string());
            Ok(self.status.lock().clone())
        }

        async fn validate(&self, _slug: &str, _data: &SubmitData) -> Result<ValidationResponse> {
            self.calls.lock().push("validate".to_string());
            Ok(self.validation.lock().clone())
        }

        async fn submit(
            &self,
            _slug: &str,
            _data: &SubmitData,
            _options: &SubmitOptions,
        ) -> Result<SubmissionResponse> {
            self.calls.lock().push("submit".to_string());
            if let Some(code) = self.submit_error_code.lock().clone() {
                return Err(Error::Api {
                    message: "failed".to_string(),
                    code,
                    http_status: 500,
                    retry_after: None,
                });
            }
            Ok(SubmissionResponse {
                success: true,
                submission_id: "sub_1".to_string(),
                message: "ok".to_string(),
            })
        }

        async fn track_view(&self, _slug: &str) -> Result<()> {
            self.calls.lock().push("track_view".to_string());
            Ok(())
        }
    }

    fn active_status(mode: FormMode) -> FormStatusResponse {
        FormStatusResponse {
            active: true,
            mode: Some(mode),
            schema: Some(FormSchema {
                fields: vec![
                    FormField::new("email", FieldType::Email).required(),
                    FormField::new("intro", FieldType::Heading).with_label("Contact"),
                ],
                styling: None,
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_initialize_loads_config() {
        let api = MockApi::with_status(active_status(FormMode::Free));
        let mut session = FormSession::new(api.clone(), "contact", SessionOptions::new());
        assert_eq!(session.state(), SessionState::Uninitialized);
        session.initialize().await.unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.is_active());
        assert_eq!(api.calls(), vec!["is_active"]);
    }

    #[tokio::test]
    async fn test_set_value_clears_only_that_fields_error() {
        let api = MockApi::with_status(active_status(FormMode::Free));
        let mut session = FormSession::new(api, "contact", SessionOptions::new());
        session.errors.insert("email".to_string(), "bad".to_string());
        session.errors.insert("name".to_string(), "bad".to_string());
        session.set_value("email", "a@b.c");
        assert!(!session.errors().contains_key("email"));
        assert_eq!(session.errors().get("name").map(String::as_str), Some("bad"));
    }

    #[tokio::test]
    async fn test_submit_before_initialize_is_an_error() {
        let api = MockApi::with_status(active_status(FormMode::Free));
        let mut session = FormSession::new(api.clone(), "contact", SessionOptions::new());
        let err = session.submit(None).await.unwrap_err();
        assert!(matches!(err, Error::NotInitialized));
        assert!(session.validate().await.is_err());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_free_mode_skips_validation_pass() {
        let api = MockApi::with_status(active_status(FormMode::Free));
        let mut session = FormSession::new(api.clone(), "contact", SessionOptions::new());
        session.initialize().await.unwrap();
        session.set_value("email", "a@b.c");
        session.submit(None).await.unwrap();
        assert_eq!(api.calls(), vec!["is_active", "submit"]);
    }

    #[tokio::test]
    async fn test_schema_mode_failing_validation_short_circuits() {
        let api = MockApi::with_status(active_status(FormMode::Schema));
        *api.validation.lock() = ValidationResponse {
            valid: false,
            errors: vec![
                ValidationError {
                    field: "email".to_string(),
                    message: "first".to_string(),
                },
                ValidationError {
                    field: "email".to_string(),
                    message: "second".to_string(),
                },
            ],
        };
        let seen = Arc::new(AtomicBool::new(false));
        let seen_in_cb = seen.clone();
        let options = SessionOptions::new().on_validation_error(move |errors| {
            assert_eq!(errors.len(), 2);
            seen_in_cb.store(true, Ordering::SeqCst);
        });
        let mut session = FormSession::new(api.clone(), "contact", options);
        session.initialize().await.unwrap();
        let err = session.submit(None).await.unwrap_err();
        assert!(err.is_validation_error());
        // the submit endpoint was never touched
        assert_eq!(api.calls(), vec!["is_active", "validate"]);
        assert!(seen.load(Ordering::SeqCst));
        // map collapsed last-write-wins, full list preserved in the error
        assert_eq!(session.errors().get("email").map(String::as_str), Some("second"));
        assert_eq!(err.validation_errors().map(<[_]>::len), Some(2));
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn test_end_to_end_success() {
        let api = MockApi::with_status(active_status(FormMode::Free));
        let success = Arc::new(AtomicBool::new(false));
        let success_in_cb = success.clone();
        let options = SessionOptions::new().on_submit_success(move |response| {
            assert!(response.success);
            assert_eq!(response.submission_id, "sub_1");
            success_in_cb.store(true, Ordering::SeqCst);
        });
        let mut session = FormSession::new(api, "contact", options);
        session.initialize().await.unwrap();
        session.set_value("email", "a@b.com");
        let response = session.submit(None).await.unwrap();
        assert!(response.success);
        assert_eq!(session.state(), SessionState::Submitted);
        assert!(success.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_submit_error_surfaces_via_callback() {
        let api = MockApi::with_status(active_status(FormMode::Free));
        *api.submit_error_code.lock() = Some("CAPTCHA_REQUIRED".to_string());
        let seen = Arc::new(AtomicBool::new(false));
        let seen_in_cb = seen.clone();
        let options = SessionOptions::new().on_submit_error(move |err| {
            assert_eq!(err.code(), "CAPTCHA_REQUIRED");
            seen_in_cb.store(true, Ordering::SeqCst);
        });
        let mut session = FormSession::new(api, "contact", options);
        session.initialize().await.unwrap();
        let err = session.submit(None).await.unwrap_err();
        assert_eq!(err.code(), "CAPTCHA_REQUIRED");
        assert!(seen.load(Ordering::SeqCst));
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.last_error().is_some());
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let api = MockApi::with_status(active_status(FormMode::Free));
        let mut session = FormSession::new(api, "contact", SessionOptions::new());
        session.initialize().await.unwrap();
        session.set_value("email", "a@b.c");
        session.errors.insert("email".to_string(), "bad".to_string());
        session.reset();
        let after_once = (session.values().clone(), session.errors().clone());
        session.reset();
        assert_eq!(after_once, (session.values().clone(), session.errors().clone()));
        assert!(session.values().is_empty());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn test_layout_fields_and_honeypot_in_submission() {
        let mut status = active_status(FormMode::Free);
        status.settings = Some(FormSettings {
            honeypot: true,
            ..Default::default()
        });
        let api = MockApi::with_status(status);
        let mut session = FormSession::new(api, "contact", SessionOptions::new());
        session.initialize().await.unwrap();
        session.set_value("email", "a@b.c");
        session.set_value("intro", "should be dropped");
        let data = session.submission_values();
        assert!(data.contains_key("email"));
        assert!(!data.contains_key("intro"));
        assert_eq!(
            data.get(HONEYPOT_FIELD).map(FieldValue::display_string),
            Some(String::new())
        );
    }

    #[tokio::test]
    async fn test_track_views_fires_after_initialize() {
        let api = MockApi::with_status(active_status(FormMode::Free));
        let options = SessionOptions::new().track_views(true);
        let mut session = FormSession::new(api.clone(), "contact", options);
        session.initialize().await.unwrap();
        tokio::task::yield_now().await;
        assert!(api.calls().contains(&"track_view".to_string()));
    }

    #[tokio::test]
    async fn test_attachment_limit_defaults() {
        let api = MockApi::with_status(active_status(FormMode::Free));
        let mut session = FormSession::new(api, "contact", SessionOptions::new());
        session.initialize().await.unwrap();
        assert_eq!(session.max_attachments(), 5);
        assert_eq!(session.max_attachment_size(), 10 * 1024 * 1024);
        assert_eq!(session.success_message(), DEFAULT_SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn test_file_validation_advisory() {
        let mut status = active_status(FormMode::Free);
        status.settings = Some(FormSettings {
            allow_attachments: true,
            max_attachments: Some(1),
            max_attachment_size: Some(4),
            ..Default::default()
        });
        let api = MockApi::with_status(status);
        let mut session = FormSession::new(api, "contact", SessionOptions::new());
        session.initialize().await.unwrap();
        let files = vec![
            FileUpload::new("big.bin", "application/octet-stream", &b"12345"[..]),
            FileUpload::new("ok.txt", "text/plain", &b"ok"[..]),
        ];
        assert!(!session.validate_files("upload", &files));
        let kinds: Vec<FileErrorKind> =
            session.file_errors().iter().map(|e| e.error).collect();
        assert!(kinds.contains(&FileErrorKind::Count));
        assert!(kinds.contains(&FileErrorKind::Size));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2_684_354_560), "2.5 GB");
    }

    #[test]
    fn test_mime_wildcard_matching() {
        assert!(mime_matches("image/*", "image/png"));
        assert!(!mime_matches("image/*", "application/pdf"));
        assert!(mime_matches("application/pdf", "application/pdf"));
    }
}
