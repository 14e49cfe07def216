//! Debug tracing of outgoing requests as equivalent curl commands.
//!
//! When a config has `debug` on, every request is rendered once, just before
//! dispatch, and handed to the configured `DebugSink`. Rendering never
//! changes the request itself.

use crate::http::HttpRequest;

/// Destination for debug traces.
pub trait DebugSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Default sink: a `debug` event on the `oneid::curl` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::debug!(target: "oneid::curl", "{line}");
    }
}

/// Render `request` as a single curl command line.
pub fn curl_command(request: &HttpRequest) -> String {
    let mut line = format!("curl -X {} \"{}\"", request.method, request.url);
    for (name, value) in &request.headers {
        line.push_str(&format!(" -H \"{name}: {value}\""));
    }
    if let Some(auth) = &request.basic_auth {
        line.push_str(&format!(" -u \"{}:****\"", auth.username));
    }
    if let Some(body) = &request.body {
        line.push_str(&format!(" -d '{}'", body.replace('\'', "'\\''")));
    }
    line
}
