//! HTTP transport for the Forms Expert API.
//!
//! [`FormsClient`] owns a shared connection pool behind an `Arc` and is cheap
//! to clone. Authentication is a `token` query parameter appended to every
//! URL; all endpoints are scoped under `/f/{resource_id}/{slug}`.
//!
//! The [`FormsApi`] trait is the seam the session layer talks through, so
//! session logic is testable against an in-memory fake.

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::SdkConfig;
use crate::error::{Error, Result, CODE_UNKNOWN_ERROR};
use crate::multipart::MultipartForm;
use crate::types::{
    FieldValue, FormStatusResponse, SubmissionResponse, SubmitData, SubmitOptions,
    ValidationResponse,
};

/// Query/path component encoding: everything but alphanumerics and
/// `- _ . ! ~ * ' ( )` is percent-encoded (so a space becomes `%20`).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Error body shape returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default, rename = "retryAfter")]
    retry_after: Option<u64>,
}

/// Classify a non-2xx response into an [`Error::Api`].
///
/// A malformed or empty error body still produces a well-formed error with
/// fallback message and code, never a parse failure.
fn api_error_from_body(status: StatusCode, body: &[u8]) -> Error {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or(ErrorBody {
        message: None,
        code: None,
        retry_after: None,
    });
    Error::Api {
        message: parsed.message.unwrap_or_else(|| "Request failed".to_string()),
        code: parsed.code.unwrap_or_else(|| CODE_UNKNOWN_ERROR.to_string()),
        http_status: status.as_u16(),
        retry_after: parsed.retry_after,
    }
}

/// Whether a submission must take the multipart path
fn needs_multipart(data: &SubmitData, options: &SubmitOptions) -> bool {
    options.on_progress.is_some() || data.values().any(FieldValue::has_files)
}

/// JSON submission body: `{"data": {...}, "pageUrl": ..., "captchaToken": ...}`
///
/// Only meaningful when no value carries files; file values are replaced by
/// null here and rejected earlier by the multipart routing.
fn json_submission_body(data: &SubmitData, options: &SubmitOptions) -> serde_json::Value {
    let mut values = serde_json::Map::new();
    for (name, value) in data {
        if let Some(json) = value.as_json() {
            values.insert(name.clone(), json.clone());
        }
    }
    let mut body = serde_json::Map::new();
    body.insert("data".to_string(), serde_json::Value::Object(values));
    if let Some(url) = &options.page_url {
        body.insert("pageUrl".to_string(), serde_json::json!(url));
    }
    if let Some(token) = &options.captcha_token {
        body.insert("captchaToken".to_string(), serde_json::json!(token));
    }
    serde_json::Value::Object(body)
}

struct ClientInner {
    config: SdkConfig,
    http: reqwest::Client,
}

/// Transport client for the Forms Expert API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct FormsClient {
    inner: Arc<ClientInner>,
}

impl FormsClient {
    /// Create a client, validating the configuration up front.
    pub fn new(config: SdkConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Config("api_key must not be empty".to_string()));
        }
        if config.resource_id.is_empty() {
            return Err(Error::Config("resource_id must not be empty".to_string()));
        }
        Url::parse(config.normalized_base_url())?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            inner: Arc::new(ClientInner { config, http }),
        })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &SdkConfig {
        &self.inner.config
    }

    /// Absolute endpoint URL with the auth token appended.
    ///
    /// `path` may already carry a query string; the token joins with `&` in
    /// that case and `?` otherwise.
    fn build_url(&self, path: &str) -> String {
        let base = self.inner.config.normalized_base_url();
        let sep = if path.contains('?') { '&' } else { '?' };
        format!(
            "{base}{path}{sep}token={}",
            encode_component(&self.inner.config.api_key)
        )
    }

    /// `/f/{resource_id}/{slug}` endpoint prefix for a form
    fn form_path(&self, slug: &str) -> String {
        format!(
            "/f/{}/{}",
            encode_component(&self.inner.config.resource_id),
            encode_component(slug)
        )
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(api_error_from_body(status, &body));
        }
        serde_json::from_slice(&body).map_err(Error::Parse)
    }
}

/// Operations the session layer needs from the transport.
#[async_trait]
pub trait FormsApi: Send + Sync + 'static {
    /// Fetch the form's status, config, schema and styling in one call.
    async fn is_active(&self, slug: &str, lang: Option<&str>) -> Result<FormStatusResponse>;

    /// Validate submission data against the remote schema without submitting.
    async fn validate(&self, slug: &str, data: &SubmitData) -> Result<ValidationResponse>;

    /// Submit the form, routing to JSON or multipart as the data requires.
    async fn submit(
        &self,
        slug: &str,
        data: &SubmitData,
        options: &SubmitOptions,
    ) -> Result<SubmissionResponse>;

    /// Record a form view. Failures are reported, not retried.
    async fn track_view(&self, slug: &str) -> Result<()>;
}

#[async_trait]
impl FormsApi for FormsClient {
    #[instrument(skip(self), fields(slug = %slug))]
    async fn is_active(&self, slug: &str, lang: Option<&str>) -> Result<FormStatusResponse> {
        let mut path = format!("{}/is-active", self.form_path(slug));
        if let Some(lang) = lang {
            path.push_str(&format!("?lang={}", encode_component(lang)));
        }
        let url = self.build_url(&path);
        self.send(self.inner.http.get(url)).await
    }

    #[instrument(skip(self, data), fields(slug = %slug, fields = data.len()))]
    async fn validate(&self, slug: &str, data: &SubmitData) -> Result<ValidationResponse> {
        let url = self.build_url(&format!("{}/validate", self.form_path(slug)));
        let body = json_submission_body(data, &SubmitOptions::new());
        self.send(self.inner.http.post(url).json(&body)).await
    }

    #[instrument(skip(self, data, options), fields(slug = %slug, fields = data.len()))]
    async fn submit(
        &self,
        slug: &str,
        data: &SubmitData,
        options: &SubmitOptions,
    ) -> Result<SubmissionResponse> {
        let url = self.build_url(&self.form_path(slug));
        if needs_multipart(data, options) {
            let form = MultipartForm::encode_submission(
                data,
                options.page_url.as_deref(),
                options.captcha_token.as_deref(),
            );
            debug!(bytes = form.len(), "submitting multipart form");
            let request = self
                .inner
                .http
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, form.content_type())
                .header(reqwest::header::CONTENT_LENGTH, form.len())
                .body(form.into_body(options.on_progress.clone()));
            self.send(request).await
        } else {
            let body = json_submission_body(data, options);
            self.send(self.inner.http.post(url).json(&body)).await
        }
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn track_view(&self, slug: &str) -> Result<()> {
        // bodyless POST by contract
        let url = self.build_url(&format!("{}/view", self.form_path(slug)));
        let response = self.inner.http.post(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(api_error_from_body(status, &body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileUpload;

    fn client() -> FormsClient {
        FormsClient::new(SdkConfig::new("key with space", "res_1")).unwrap()
    }

    #[test]
    fn test_token_uses_percent20_not_plus() {
        let url = client().build_url("/f/res_1/contact/is-active");
        assert!(url.ends_with("token=key%20with%20space"));
        assert!(!url.contains('+'));
    }

    #[test]
    fn test_token_joins_existing_query_with_ampersand() {
        let url = client().build_url("/f/res_1/contact/is-active?lang=de");
        assert!(url.contains("?lang=de&token="));
    }

    #[test]
    fn test_component_encoding_matches_uri_component_rules() {
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("a+b"), "a%2Bb");
        assert_eq!(encode_component("a-b_c.d!e~f*g'h(i)j"), "a-b_c.d!e~f*g'h(i)j");
        assert_eq!(encode_component("a/b?c=d"), "a%2Fb%3Fc%3Dd");
    }

    #[test]
    fn test_empty_config_rejected() {
        assert!(FormsClient::new(SdkConfig::new("", "res_1")).is_err());
        assert!(FormsClient::new(SdkConfig::new("key", "")).is_err());
        assert!(FormsClient::new(SdkConfig::new("key", "r").with_base_url("not a url")).is_err());
    }

    #[test]
    fn test_error_body_parsed() {
        let err = api_error_from_body(
            StatusCode::TOO_MANY_REQUESTS,
            br#"{"message":"slow down","code":"RATE_LIMIT_EXCEEDED","retryAfter":12}"#,
        );
        assert_eq!(err.code(), "RATE_LIMIT_EXCEEDED");
        assert_eq!(err.http_status(), Some(429));
        assert_eq!(err.retry_after(), Some(12));
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_error_body_fallbacks() {
        let err = api_error_from_body(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        match err {
            Error::Api {
                message,
                code,
                http_status,
                retry_after,
            } => {
                assert_eq!(message, "Request failed");
                assert_eq!(code, CODE_UNKNOWN_ERROR);
                assert_eq!(http_status, 502);
                assert_eq!(retry_after, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_multipart_routing() {
        let mut data = SubmitData::new();
        data.insert("name".to_string(), FieldValue::text("x"));
        assert!(!needs_multipart(&data, &SubmitOptions::new()));

        data.insert(
            "cv".to_string(),
            FieldValue::from(FileUpload::new("cv.pdf", "application/pdf", &b"x"[..])),
        );
        assert!(needs_multipart(&data, &SubmitOptions::new()));

        let mut plain = SubmitData::new();
        plain.insert("name".to_string(), FieldValue::text("x"));
        let with_progress = SubmitOptions::new().on_progress(|_| {});
        assert!(needs_multipart(&plain, &with_progress));
    }

    #[test]
    fn test_json_body_shape() {
        let mut data = SubmitData::new();
        data.insert("email".to_string(), FieldValue::text("a@b.c"));
        data.insert("age".to_string(), FieldValue::from(30i64));
        let options = SubmitOptions::new()
            .page_url("https://host/page")
            .captcha_token("tok");
        let body = json_submission_body(&data, &options);
        assert_eq!(
            body,
            serde_json::json!({
                "data": {"email": "a@b.c", "age": 30},
                "pageUrl": "https://host/page",
                "captchaToken": "tok"
            })
        );
    }

    #[test]
    fn test_json_body_omits_unset_options() {
        let body = json_submission_body(&SubmitData::new(), &SubmitOptions::new());
        assert_eq!(body, serde_json::json!({"data": {}}));
    }
}
