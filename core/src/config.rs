//! Client configuration: base URL, bearer token, debug tracing.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::error::ClientError;
use crate::trace::{DebugSink, TracingSink};

pub const ENV_BASE_URL: &str = "ONEID_BASE_URL";
pub const ENV_TOKEN: &str = "ONEID_TOKEN";
pub const ENV_DEBUG: &str = "ONEID_DEBUG";

/// Settings shared by every request a client sends.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    bearer_token: Option<String>,
    debug: bool,
    sink: Arc<dyn DebugSink>,
}

impl ClientConfig {
    /// Validate `base_url` and build a config with no token and debug off.
    ///
    /// A trailing `/` is stripped so paths can always start with one.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
            debug: false,
            sink: Arc::new(TracingSink),
        })
    }

    /// Load from `ONEID_BASE_URL`, `ONEID_TOKEN` and `ONEID_DEBUG`.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var(ENV_BASE_URL).map_err(|_| ClientError::MissingEnv(ENV_BASE_URL))?;
        let mut config = Self::new(&base_url)?;
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            config = config.with_token(token);
        }
        if let Ok(flag) = std::env::var(ENV_DEBUG) {
            config = config.with_debug(parse_flag(&flag));
        }
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Route debug traces somewhere other than `tracing`.
    pub fn with_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token, if one is set and non-empty.
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn sink(&self) -> &dyn DebugSink {
        self.sink.as_ref()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.bearer_token = Some(token);
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
