//! The wire envelope returned by the download API.
//!
//! The API has no stable schema: the payload shape depends on the platform
//! and sometimes on the media itself (single object vs. list), and metadata
//! fields may appear nested under `result` or at the top level. The envelope
//! therefore keeps the parsed body as raw JSON and exposes the handful of
//! fields with agreed meaning through accessors; platform-specific
//! interpretation lives in [`crate::media`].

use serde::Deserialize;
use serde_json::Value;

/// Parsed download API response, kept unmodified.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ResponseEnvelope {
    raw: Value,
}

impl ResponseEnvelope {
    /// Wraps an already-parsed JSON body.
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Returns true if the envelope signals failure.
    ///
    /// Policy (the API is inconsistent about its `status` field, so one
    /// explicit rule applies): failure iff `status` is boolean `false`, or
    /// `status` is a number other than 200. An absent `status` field, or one
    /// of any other type, counts as success.
    #[must_use]
    pub fn indicates_failure(&self) -> bool {
        match self.raw.get("status") {
            Some(Value::Bool(ok)) => !ok,
            Some(Value::Number(code)) => code.as_i64() != Some(200),
            _ => false,
        }
    }

    /// Returns the server-supplied failure/progress message, when present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.raw.get("message").and_then(Value::as_str)
    }

    /// Returns the payload of interest: the `result` field when present,
    /// otherwise the envelope itself (some API variants return the payload
    /// fields at the top level).
    #[must_use]
    pub fn payload(&self) -> &Value {
        match self.raw.get("result") {
            Some(Value::Null) | None => &self.raw,
            Some(result) => result,
        }
    }

    /// Returns the raw body, for logging and diagnostics.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.raw
    }
}
