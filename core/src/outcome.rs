//! Normalized results of a dispatched request.
//!
//! # Design
//! Every request that could be attempted ends in exactly one
//! `ResponseOutcome`; nothing here is an `Err`. The HTTP status is carried
//! along but never interpreted: a 422 with a JSON error document is
//! `DecodedJson` just like a 200, and the caller decides what it means.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::HttpResponse;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// The body parsed as JSON (this includes API error documents).
    DecodedJson { status: u16, value: Value },
    /// The body verbatim, for binary downloads.
    RawBytes { status: u16, body: Vec<u8> },
    /// The exchange completed but the body was empty.
    EmptyOk { status: u16 },
    /// The body was not valid JSON. `text` is the body, lossily decoded.
    DecodeFailure { status: u16, text: String },
    /// The HTTP exchange itself failed (DNS, connect, TLS, timeout).
    TransportFailure(String),
}

impl ResponseOutcome {
    /// Interpret a response body as JSON.
    pub fn decode_json(response: HttpResponse) -> Self {
        let status = response.status;
        if response.body.is_empty() {
            return ResponseOutcome::EmptyOk { status };
        }
        match serde_json::from_slice(&response.body) {
            Ok(value) => ResponseOutcome::DecodedJson { status, value },
            Err(err) => {
                tracing::debug!(status, error = %err, "response body is not json");
                ResponseOutcome::DecodeFailure {
                    status,
                    text: String::from_utf8_lossy(&response.body).into_owned(),
                }
            }
        }
    }

    /// Keep a response body untouched.
    pub fn raw(response: HttpResponse) -> Self {
        ResponseOutcome::RawBytes {
            status: response.status,
            body: response.body,
        }
    }

    /// The HTTP status, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResponseOutcome::DecodedJson { status, .. }
            | ResponseOutcome::RawBytes { status, .. }
            | ResponseOutcome::EmptyOk { status }
            | ResponseOutcome::DecodeFailure { status, .. } => Some(*status),
            ResponseOutcome::TransportFailure(_) => None,
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, ResponseOutcome::TransportFailure(_))
    }

    pub fn json(&self) -> Option<&Value> {
        match self {
            ResponseOutcome::DecodedJson { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            ResponseOutcome::RawBytes { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Collapse to a plain JSON value: anything that is not decoded JSON
    /// (empty body, undecodable body, transport failure, raw bytes) becomes
    /// `Value::Null`.
    pub fn into_value(self) -> Value {
        match self {
            ResponseOutcome::DecodedJson { value, .. } => value,
            _ => Value::Null,
        }
    }

    /// Deserialize decoded JSON into `T`. `None` for every other variant or
    /// when the document does not fit `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Option<T> {
        self.json().and_then(|v| T::deserialize(v).ok())
    }
}
