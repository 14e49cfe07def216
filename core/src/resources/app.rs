//! Third-party application routes under `/apps/{key}`.

use serde::Serialize;

use crate::client::{ApiResult, Client};
use crate::encoding::{encode_app_key, encode_segment};
use crate::transport::Transport;

/// Endpoints of one third-party application, under `/apps/{app_key}`.
///
/// The key is opaque and may contain anything; it is percent-encoded once at
/// construction, with `.` escaped as `%2E`. Endpoint names are split on `/`
/// and each part is segment-encoded, so `"users/active"` still addresses a
/// nested route while `?`, `#` and spaces stay inside the path.
pub struct AppResource<'a, T> {
    client: &'a Client<T>,
    key: String,
}

impl<'a, T: Transport> AppResource<'a, T> {
    pub(crate) fn new(client: &'a Client<T>, app_key: &str) -> Self {
        Self {
            client,
            key: encode_app_key(app_key),
        }
    }

    /// The request path for `endpoint`, relative to the base URL.
    pub fn path(&self, endpoint: &str) -> String {
        let endpoint = endpoint
            .strip_prefix('/')
            .unwrap_or(endpoint)
            .split('/')
            .map(encode_segment)
            .collect::<Vec<_>>()
            .join("/");
        format!("/apps/{}/{endpoint}", self.key)
    }

    /// GET `endpoint` with no query.
    pub fn endpoint(&self, endpoint: &str) -> ApiResult {
        self.get(endpoint, &[])
    }

    pub fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> ApiResult {
        self.client.get(&self.path(endpoint), query)
    }

    pub fn post_json<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> ApiResult {
        self.client.post_json(&self.path(endpoint), body)
    }
}
