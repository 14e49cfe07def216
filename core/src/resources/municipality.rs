//! Municipality staff routes under `/municipality`.

use crate::client::{ApiResult, Client};
use crate::resources::optional_id_path;
use crate::transport::Transport;

/// Endpoints under `/municipality`, for municipal staff sessions.
pub struct MunicipalityResource<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> MunicipalityResource<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    pub fn hello(&self) -> ApiResult {
        self.client.get("/municipality/hello", &[])
    }

    /// One news item, or the listing when `news_id` is `None`.
    pub fn get_news(&self, news_id: Option<u64>) -> ApiResult {
        self.client.get(&optional_id_path("/municipality/news", news_id), &[])
    }
}
