//! Decoding of the `{ "data": ..., "errors": [...] }` response envelope.

use crate::errors::{AppError, AppResult, RemoteErrorKind};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphqlError {
    fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str)
    }
}

/// Map the server's error codes onto our taxonomy.
pub fn classify(errors: &[GraphqlError]) -> RemoteErrorKind {
    for e in errors {
        match e.code() {
            Some("constraint-violation")
            | Some("validation-failed")
            | Some("parse-failed")
            | Some("data-exception")
            | Some("bad-request") => return RemoteErrorKind::Validation,
            Some("access-denied") | Some("invalid-jwt") | Some("invalid-headers") => {
                return RemoteErrorKind::Unauthorized;
            }
            Some("not-found") | Some("not-exists") => return RemoteErrorKind::NotFound,
            _ => {}
        }
    }
    RemoteErrorKind::Server
}

fn parse_envelope(body: &str) -> AppResult<Value> {
    let env: Envelope = serde_json::from_str(body).map_err(|e| {
        AppError::remote(RemoteErrorKind::Malformed, format!("invalid JSON body: {e}"))
    })?;

    if let Some(errors) = env.errors
        && !errors.is_empty()
    {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AppError::remote(classify(&errors), message));
    }

    env.data
        .ok_or_else(|| AppError::remote(RemoteErrorKind::Malformed, "response has no data"))
}

/// `data.<field>`, which may be null (e.g. `*_by_pk` on a missing row).
pub fn decode_optional<T: DeserializeOwned>(body: &str, field: &str) -> AppResult<Option<T>> {
    let data = parse_envelope(body)?;

    let value = match data.get(field) {
        Some(v) => v.clone(),
        None => {
            return Err(AppError::remote(
                RemoteErrorKind::Malformed,
                format!("response has no field '{field}'"),
            ));
        }
    };

    if value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(value).map(Some).map_err(|e| {
        AppError::remote(
            RemoteErrorKind::Malformed,
            format!("unexpected shape for '{field}': {e}"),
        )
    })
}

/// `data.<field>`, required to be present and non-null.
pub fn decode<T: DeserializeOwned>(body: &str, field: &str) -> AppResult<T> {
    decode_optional(body, field)?.ok_or_else(|| {
        AppError::remote(RemoteErrorKind::NotFound, format!("'{field}' returned null"))
    })
}

/// First element of the list `data.<field>`, if any.
pub fn decode_first<T: DeserializeOwned>(body: &str, field: &str) -> AppResult<Option<T>> {
    let list: Vec<T> = decode(body, field)?;
    Ok(list.into_iter().next())
}
