//! Request specs and their translation into `HttpRequest` values.
//!
//! # Design
//! A `RequestSpec` says what the caller wants (path, payload, extra headers,
//! credentials); `build_request` adds everything the API expects on every
//! call (default headers, bearer token, absolute URL). The payload enum makes
//! a query string, a JSON body and a form body mutually exclusive: GET specs
//! only ever carry a query, POST specs only ever carry one body.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{BasicAuth, HttpMethod, HttpRequest};

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_PDF: &str = "application/pdf";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// What gets sent alongside the path.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// GET with an ordered query string (omitted entirely when empty).
    Query(Vec<(String, String)>),
    /// POST with a JSON document.
    Json(Value),
    /// POST with `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
}

impl Payload {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Payload::Query(_) => "query",
            Payload::Json(_) => "json",
            Payload::Form(_) => "form",
        }
    }
}

/// The response representation a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Binary,
}

/// A single API call, before defaults and credentials are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    path: String,
    payload: Payload,
    extra_headers: Vec<(String, String)>,
    basic_auth: Option<BasicAuth>,
    post_query: Vec<(String, String)>,
}

impl RequestSpec {
    pub fn get(path: impl Into<String>) -> Self {
        Self::with_payload(path, Payload::Query(Vec::new()))
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self::with_payload(path, Payload::Json(body))
    }

    pub fn post_form<I, K, V>(path: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::with_payload(path, Payload::Form(fields))
    }

    fn with_payload(path: impl Into<String>, payload: Payload) -> Self {
        Self {
            path: path.into(),
            payload,
            extra_headers: Vec::new(),
            basic_auth: None,
            post_query: Vec::new(),
        }
    }

    /// Append a query parameter. POST specs never carry a query string:
    /// the pair is held back and `build_request` rejects the spec.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let pair = (key.into(), value.into());
        match &mut self.payload {
            Payload::Query(params) => params.push(pair),
            Payload::Json(_) | Payload::Form(_) => self.post_query.push(pair),
        }
        self
    }

    /// Append a header after the defaults. An `Authorization` header here
    /// replaces the bearer token for this call.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn method(&self) -> HttpMethod {
        match self.payload {
            Payload::Query(_) => HttpMethod::Get,
            Payload::Json(_) | Payload::Form(_) => HttpMethod::Post,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn extra_headers(&self) -> &[(String, String)] {
        &self.extra_headers
    }
}

/// Turn a spec into the exact request that goes on the wire.
pub fn build_request(
    config: &ClientConfig,
    spec: &RequestSpec,
    kind: ResponseKind,
) -> Result<HttpRequest, ClientError> {
    let accept = match kind {
        ResponseKind::Json => APPLICATION_JSON,
        ResponseKind::Binary => APPLICATION_PDF,
    };

    if !spec.post_query.is_empty() {
        return Err(ClientError::QueryOnPost {
            path: spec.path.clone(),
        });
    }

    let mut url = config.url_for(&spec.path);
    let mut headers = Vec::new();
    let body = match &spec.payload {
        Payload::Query(params) => {
            let query = serde_urlencoded::to_string(params)?;
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
            headers.push(("Accept".to_string(), accept.to_string()));
            if kind == ResponseKind::Json {
                headers.push(("Content-Type".to_string(), APPLICATION_JSON.to_string()));
            }
            None
        }
        Payload::Json(value) => {
            let body = serde_json::to_string(value)?;
            headers.push(("Content-Type".to_string(), APPLICATION_JSON.to_string()));
            headers.push(("Content-Length".to_string(), body.len().to_string()));
            headers.push(("Accept".to_string(), accept.to_string()));
            Some(body)
        }
        Payload::Form(fields) => {
            let body = serde_urlencoded::to_string(fields)?;
            headers.push(("Content-Type".to_string(), FORM_URLENCODED.to_string()));
            headers.push(("Content-Length".to_string(), body.len().to_string()));
            headers.push(("Accept".to_string(), accept.to_string()));
            Some(body)
        }
    };

    let caller_authorizes = spec
        .extra_headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("authorization"));
    if let Some(token) = config.bearer_token() {
        if !caller_authorizes {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
    }
    headers.extend(spec.extra_headers.iter().cloned());

    validate_url(&url)?;
    Ok(HttpRequest {
        method: spec.method(),
        url,
        headers,
        body,
        basic_auth: spec.basic_auth.clone(),
    })
}

/// Reject URLs the transport could not send as-is, such as a raw space or
/// control character left in a caller-supplied path.
fn validate_url(url: &str) -> Result<(), ClientError> {
    let uri: ::http::Uri = url.parse().map_err(|e: ::http::uri::InvalidUri| ClientError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if uri.scheme().is_none() || uri.host().is_none() {
        return Err(ClientError::InvalidUrl {
            url: url.to_string(),
            reason: "not an absolute url".to_string(),
        });
    }
    Ok(())
}
