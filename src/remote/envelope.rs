use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::remote::error::{RemoteError, decode_error, rejected};

/// Uniform `{ok, status, data}` shape every transport call resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub ok: bool,
    pub status: u16,
    pub data: Value,
}

impl Envelope {
    pub fn new(ok: bool, status: u16, data: Value) -> Self {
        Self { ok, status, data }
    }

    /// A body that is not JSON becomes an empty object.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let data = serde_json::from_slice::<Value>(body).unwrap_or_else(|_| Value::Object(Map::new()));
        Self {
            ok: (200..300).contains(&status),
            status,
            data,
        }
    }

    pub fn embedded_error(&self) -> Option<String> {
        match self.data.get("error")? {
            Value::Null => None,
            Value::String(message) => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Single normalization boundary: an embedded `error` fails the call even
/// when `ok` is true, `ok=false` falls back to the action-specific message.
pub fn normalize<T: DeserializeOwned>(envelope: Envelope, fallback: &str) -> Result<T, RemoteError> {
    if let Some(message) = envelope.embedded_error() {
        let message = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        };
        return Err(rejected(message).with_status(envelope.status));
    }
    if !envelope.ok {
        return Err(rejected(fallback).with_status(envelope.status));
    }

    serde_json::from_value(envelope.data).map_err(|err| {
        decode_error(format!("unexpected response body: {err}")).with_status(envelope.status)
    })
}
