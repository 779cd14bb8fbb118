//! # Forms Expert SDK
//!
//! Client SDK for the Forms Expert API: fetch a remotely-defined form,
//! validate and submit its data, and render the form from its declarative
//! schema and styling descriptor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       FormsSdk                          │
//! │   is_active / validate / submit / submit_with_retry     │
//! └──────────────┬──────────────────────────┬───────────────┘
//!                │                          │
//!        ┌───────▼────────┐        ┌────────▼────────┐
//!        │  FormSession   │        │  render engine  │
//!        │ state machine, │        │ FieldType match │
//!        │ values, errors │        │ -> widget tree  │
//!        └───────┬────────┘        └────────┬────────┘
//!                │ FormsApi trait           │ styles / html / captcha
//!        ┌───────▼────────────────────────────────────┐
//!        │               FormsClient                  │
//!        │  authenticated URLs, error classification, │
//!        │  JSON / multipart submission (reqwest)     │
//!        └────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use forms_expert::{FormsSdk, SdkConfig, SessionOptions};
//!
//! # async fn run() -> forms_expert::Result<()> {
//! let sdk = FormsSdk::new(SdkConfig::new("api-key", "res_123"))?;
//! let mut session = sdk.form("contact", SessionOptions::new().track_views(true));
//! session.initialize().await?;
//! session.set_value("email", "a@b.com");
//! let response = session.submit(None).await?;
//! assert!(response.success);
//! # Ok(())
//! # }
//! ```

pub mod captcha;
pub mod client;
pub mod config;
pub mod error;
pub mod html;
pub mod multipart;
pub mod render;
pub mod retry;
pub mod session;
pub mod styles;
pub mod types;

use std::sync::Arc;

use tracing::debug;

pub use client::{FormsApi, FormsClient};
pub use config::{SdkConfig, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use render::{render_field, render_form, render_loading, render_success, render_unavailable, RenderOptions};
pub use retry::{retry_delay, retry_with_backoff, DEFAULT_MAX_RETRIES};
pub use session::{format_bytes, FormSession, SessionOptions, SessionState};
pub use styles::{stylesheet, FormStyling};
pub use types::{
    CaptchaProvider, FieldOption, FieldType, FieldValue, FileUpload, FileValidationError,
    FormField, FormMode, FormSchema, FormStatusResponse, SubmissionResponse, SubmitData,
    SubmitOptions, UploadProgress, ValidationError, ValidationResponse,
};

/// Entry point of the SDK.
///
/// Wraps a shared [`FormsClient`] and hands out [`FormSession`]s. Cheap to
/// clone; all clones share one connection pool.
#[derive(Clone)]
pub struct FormsSdk {
    client: FormsClient,
}

impl FormsSdk {
    /// Create an SDK instance, validating the configuration
    pub fn new(config: SdkConfig) -> Result<Self> {
        Ok(Self {
            client: FormsClient::new(config)?,
        })
    }

    /// The underlying transport client
    pub fn client(&self) -> &FormsClient {
        &self.client
    }

    /// Fetch a form's status, config, schema and styling
    pub async fn is_active(
        &self,
        slug: &str,
        lang: Option<&str>,
    ) -> Result<FormStatusResponse> {
        self.client.is_active(slug, lang).await
    }

    /// Validate data against the form's remote schema without submitting
    pub async fn validate(&self, slug: &str, data: &SubmitData) -> Result<ValidationResponse> {
        self.client.validate(slug, data).await
    }

    /// Submit the form once, with no retry
    pub async fn submit(
        &self,
        slug: &str,
        data: &SubmitData,
        options: &SubmitOptions,
    ) -> Result<SubmissionResponse> {
        self.client.submit(slug, data, options).await
    }

    /// Submit with bounded exponential-backoff retry, making up to
    /// `max_retries` attempts ([`DEFAULT_MAX_RETRIES`] when `None`).
    ///
    /// Deterministic failures (`VALIDATION_ERROR`, `CAPTCHA_REQUIRED`,
    /// `ORIGIN_NOT_ALLOWED`) are rethrown immediately; rate limits honor the
    /// server-declared delay.
    pub async fn submit_with_retry(
        &self,
        slug: &str,
        data: &SubmitData,
        options: &SubmitOptions,
        max_retries: Option<u32>,
    ) -> Result<SubmissionResponse> {
        retry_with_backoff(max_retries.unwrap_or(DEFAULT_MAX_RETRIES), || {
            let client = self.client.clone();
            let slug = slug.to_string();
            let data = data.clone();
            let options = options.clone();
            async move { client.submit(&slug, &data, &options).await }
        })
        .await
    }

    /// Record a form view. Fire-and-forget: failures are logged and swallowed
    /// so analytics can never break the caller's flow.
    pub async fn track_view(&self, slug: &str) {
        if let Err(err) = self.client.track_view(slug).await {
            debug!(slug = %slug, error = %err, "view tracking failed");
        }
    }

    /// Start a session for one form
    pub fn form(&self, slug: impl Into<String>, options: SessionOptions) -> FormSession {
        FormSession::new(Arc::new(self.client.clone()), slug, options)
    }
}
