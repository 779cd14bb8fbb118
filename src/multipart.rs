//! Multipart/form-data encoding for submissions with attachments.
//!
//! The body is assembled up front into a single buffer, so the total size is
//! known before the request starts and upload progress can be reported as the
//! buffer is streamed out in chunks.
//!
//! Part layout follows the submission endpoint's contract: scalar values go
//! under `data[<field>]`, files under the bare field name (one part per file),
//! and `pageUrl`/`captchaToken` are top-level parts.

use std::convert::Infallible;

use bytes::Bytes;
use futures_util::stream;
use reqwest::Body;
use uuid::Uuid;

use crate::types::{FieldValue, ProgressFn, SubmitData, UploadProgress};

/// Chunk size used when streaming the body for progress reporting
const PROGRESS_CHUNK_SIZE: usize = 64 * 1024;

/// An encoded multipart/form-data request body
#[derive(Debug)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    fn new() -> Self {
        Self {
            boundary: format!("forms-expert-{}", Uuid::new_v4().simple()),
            body: Vec::new(),
        }
    }

    /// Encode a submission: scalar values, file attachments, and the
    /// top-level `pageUrl` / `captchaToken` parts.
    pub fn encode_submission(
        data: &SubmitData,
        page_url: Option<&str>,
        captcha_token: Option<&str>,
    ) -> Self {
        let mut form = Self::new();
        for (name, value) in data {
            match value {
                FieldValue::Json(json) => {
                    let text = match json {
                        serde_json::Value::Null => continue,
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    form.push_text(&format!("data[{name}]"), &text);
                }
                FieldValue::File(file) => {
                    form.push_file(name, &file.file_name, &file.content_type, &file.data);
                }
                FieldValue::Files(files) => {
                    for file in files {
                        form.push_file(name, &file.file_name, &file.content_type, &file.data);
                    }
                }
            }
        }
        if let Some(url) = page_url {
            form.push_text("pageUrl", url);
        }
        if let Some(token) = captcha_token {
            form.push_text("captchaToken", token);
        }
        form.finish();
        form
    }

    fn push_text(&mut self, name: &str, value: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    fn push_file(&mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
    }

    fn finish(&mut self) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
    }

    /// `Content-Type` header value for this body
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Total encoded size in bytes
    pub fn len(&self) -> u64 {
        self.body.len() as u64
    }

    /// Whether the body is empty
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Encoded bytes, for inspection
    #[cfg(test)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Convert into a request body.
    ///
    /// Without a callback the buffer is sent as-is. With one, the buffer is
    /// streamed in fixed-size chunks and the callback observes the running
    /// byte count after each chunk, finishing at exactly `total`.
    pub fn into_body(self, on_progress: Option<ProgressFn>) -> Body {
        let Some(on_progress) = on_progress else {
            return Body::from(self.body);
        };
        let total = self.body.len() as u64;
        let buffer = Bytes::from(self.body);
        let chunks: Vec<Bytes> = (0..buffer.len())
            .step_by(PROGRESS_CHUNK_SIZE)
            .map(|start| buffer.slice(start..usize::min(start + PROGRESS_CHUNK_SIZE, buffer.len())))
            .collect();
        let mut loaded: u64 = 0;
        let stream = stream::iter(chunks.into_iter().map(move |chunk| {
            loaded += chunk.len() as u64;
            on_progress(UploadProgress {
                loaded,
                total,
                percentage: progress_percentage(loaded, total),
            });
            Ok::<Bytes, Infallible>(chunk)
        }));
        Body::wrap_stream(stream)
    }
}

fn progress_percentage(loaded: u64, total: u64) -> u32 {
    if total == 0 {
        return 100;
    }
    ((loaded.saturating_mul(100)) / total) as u32
}
