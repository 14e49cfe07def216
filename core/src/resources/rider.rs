//! Rider routes under `/rider`.

use std::fmt::Display;

use crate::client::{empty_body, segment, ApiResult, Client};
use crate::transport::Transport;

/// Endpoints under `/rider`, for delivery riders.
pub struct RiderResource<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> RiderResource<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    pub fn hello(&self) -> ApiResult {
        self.client.get("/rider/hello", &[])
    }

    pub fn get_jobs(&self) -> ApiResult {
        self.client.get("/rider/jobs", &[])
    }

    pub fn accept_job(&self, job_id: impl Display) -> ApiResult {
        self.client
            .post_json(&format!("/rider/jobs/{}/accept", segment(job_id)), &empty_body())
    }
}
