use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Raw error payload returned by the backend.
///
/// The backend has used several shapes over time: a bare string, `{detail}`,
/// `{error}`, `{non_field_errors: [..]}` and per-field validation arrays
/// (`{email: ["..."]}`). All of them are kept as JSON and interpreted on
/// demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody(Value);

const GENERAL_KEYS: [&str; 3] = ["detail", "error", "non_field_errors"];

impl ErrorBody {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self(Value::Null);
        }
        match serde_json::from_str(trimmed) {
            Ok(value) => Self(value),
            Err(_) => Self(Value::String(trimmed.to_string())),
        }
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Best human-readable message: plain string, then `detail`, `error`,
    /// `non_field_errors[0]`, then the first per-field message.
    pub fn message(&self) -> Option<String> {
        self.plain()
            .or_else(|| self.first_of(&GENERAL_KEYS))
            .or_else(|| {
                self.field_errors()
                    .into_values()
                    .find_map(|messages| messages.into_iter().next())
            })
    }

    /// First message found under any of `keys`, in order.
    pub fn first_of(&self, keys: &[&str]) -> Option<String> {
        let obj = self.0.as_object()?;
        keys.iter().find_map(|key| obj.get(*key).and_then(first_text))
    }

    /// The body itself when the server answered with a bare string.
    pub fn plain(&self) -> Option<String> {
        match &self.0 {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Per-field validation messages, `non_field_errors` and the general
    /// keys excluded.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let Some(obj) = self.0.as_object() else {
            return BTreeMap::new();
        };
        obj.iter()
            .filter(|(key, _)| !GENERAL_KEYS.contains(&key.as_str()))
            .filter_map(|(key, value)| {
                let messages: Vec<String> = value
                    .as_array()?
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                (!messages.is_empty()).then(|| (key.clone(), messages))
            })
            .collect()
    }

    fn is_validation(&self) -> bool {
        !self.field_errors().is_empty()
            || self
                .0
                .get("non_field_errors")
                .is_some_and(|v| v.is_array())
    }
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_string)),
        _ => None,
    }
}

/// Coarse classification used by view-models to decide how to show a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response obtained (connection failure or timeout).
    Network,
    /// 401; the session has already been torn down.
    Authentication,
    /// 4xx with field-level details, shown next to the inputs.
    Validation,
    /// Anything else; shown as a page banner with a retry.
    Server,
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("authentication rejected")]
    Unauthorized(ErrorBody),

    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: ErrorBody },

    #[error("server error {status}")]
    Server { status: u16, body: ErrorBody },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub(crate) fn from_status(status: u16, body: ErrorBody) -> Self {
        match status {
            401 => ApiError::Unauthorized(body),
            400..=499 => ApiError::Rejected { status, body },
            _ => ApiError::Server { status, body },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Rejected { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Unauthorized(body)
            | ApiError::Rejected { body, .. }
            | ApiError::Server { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) | ApiError::Timeout(_) => ErrorKind::Network,
            ApiError::Unauthorized(_) => ErrorKind::Authentication,
            ApiError::Rejected { body, .. } if body.is_validation() => ErrorKind::Validation,
            _ => ErrorKind::Server,
        }
    }

    /// Message extracted from the response payload, if any.
    pub fn server_message(&self) -> Option<String> {
        self.body().and_then(ErrorBody::message)
    }

    /// Text for the UI: the server's own message when it sent one, the
    /// fallback otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or_else(|| fallback.to_string())
    }

    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        self.body().map(ErrorBody::field_errors).unwrap_or_default()
    }
}

/// Marker error for best-effort fetches. The failure has been logged and
/// must not affect the enclosing load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("best-effort fetch failed")]
pub struct Ignored;
