//! The client root: configuration, dispatch, and the ungrouped endpoints.
//!
//! # Design
//! `Client` owns a `ClientConfig` and a `Transport`. Every call goes through
//! the same three steps: `build_request` turns a `RequestSpec` into an
//! `HttpRequest`, the transport executes it, and the response is normalized
//! into a `ResponseOutcome`. Resource facades borrow the client and only
//! choose a path and a payload.
//!
//! Changing the token needs `&mut Client`, so it can never overlap with a
//! request sent through a shared reference. A client shared across threads
//! behind a lock must hold that lock around token changes; otherwise use
//! one client per session.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::encoding::encode_segment;
use crate::error::ClientError;
use crate::http::{HttpRequest, HttpResponse};
use crate::outcome::ResponseOutcome;
use crate::request::{self, Payload, RequestSpec, ResponseKind};
use crate::resources::{AppResource, MunicipalityResource, ResidentResource, RiderResource};
use crate::trace::curl_command;
use crate::transport::{Transport, UreqTransport};

/// Result of every endpoint method.
pub type ApiResult = Result<ResponseOutcome, ClientError>;

/// Synchronous client for the OneID API.
#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<UreqTransport> {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self::from_config(ClientConfig::new(base_url)?))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Set the bearer token sent with every following request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.config.set_token(token.into());
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn resident(&self) -> ResidentResource<'_, T> {
        ResidentResource::new(self)
    }

    pub fn municipality(&self) -> MunicipalityResource<'_, T> {
        MunicipalityResource::new(self)
    }

    pub fn rider(&self) -> RiderResource<'_, T> {
        RiderResource::new(self)
    }

    /// Endpoints scoped to one application, under `/apps/{app_key}`.
    pub fn app(&self, app_key: &str) -> AppResource<'_, T> {
        AppResource::new(self, app_key)
    }

    // -----------------------------------------------------------------------
    // Transport core
    // -----------------------------------------------------------------------

    /// The exact request `spec` would produce, without sending it.
    pub fn build_request(&self, spec: &RequestSpec, kind: ResponseKind) -> Result<HttpRequest, ClientError> {
        request::build_request(&self.config, spec, kind)
    }

    /// GET with a query string or POST with a JSON body; decode the response
    /// as JSON whatever its status.
    pub fn execute_json(&self, spec: &RequestSpec) -> ApiResult {
        if let Payload::Form(_) = spec.payload() {
            return Err(mismatch("execute_json", spec));
        }
        let req = self.build_request(spec, ResponseKind::Json)?;
        Ok(self.dispatch(&req, ResponseOutcome::decode_json))
    }

    /// Ask for `application/pdf` and return the body byte for byte.
    pub fn execute_binary(&self, spec: &RequestSpec) -> ApiResult {
        if let Payload::Form(_) = spec.payload() {
            return Err(mismatch("execute_binary", spec));
        }
        let req = self.build_request(spec, ResponseKind::Binary)?;
        Ok(self.dispatch(&req, ResponseOutcome::raw))
    }

    /// POST url-encoded form fields; decode the response as JSON.
    pub fn execute_legacy_form(&self, spec: &RequestSpec) -> ApiResult {
        if !matches!(spec.payload(), Payload::Form(_)) {
            return Err(mismatch("execute_legacy_form", spec));
        }
        let req = self.build_request(spec, ResponseKind::Json)?;
        Ok(self.dispatch(&req, ResponseOutcome::decode_json))
    }

    fn dispatch(
        &self,
        req: &HttpRequest,
        normalize: fn(HttpResponse) -> ResponseOutcome,
    ) -> ResponseOutcome {
        if self.config.debug() {
            self.config.sink().emit(&curl_command(req));
        }
        tracing::debug!(method = %req.method, url = %req.url, "dispatching request");
        match self.transport.execute(req) {
            Ok(response) => normalize(response),
            Err(err) => {
                tracing::warn!(method = %req.method, url = %req.url, error = %err, "transport failure");
                ResponseOutcome::TransportFailure(err.message)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Raw helpers
    // -----------------------------------------------------------------------

    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> ApiResult {
        self.execute_json(&with_query(RequestSpec::get(path), query))
    }

    pub fn get_binary(&self, path: &str, query: &[(&str, &str)]) -> ApiResult {
        self.execute_binary(&with_query(RequestSpec::get(path), query))
    }

    pub fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult {
        self.execute_json(&RequestSpec::post_json(path, serde_json::to_value(body)?))
    }

    pub fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> ApiResult {
        self.execute_legacy_form(&RequestSpec::post_form(path, fields.iter().copied()))
    }

    // -----------------------------------------------------------------------
    // Reference data and root endpoints
    // -----------------------------------------------------------------------

    pub fn get_genders(&self) -> ApiResult {
        self.get("/genders", &[])
    }

    pub fn get_cameras(&self) -> ApiResult {
        self.get("/cameras", &[])
    }

    pub fn get_civil_statuses(&self) -> ApiResult {
        self.get("/civil_statuses", &[])
    }

    pub fn get_municipality(&self, municipality_id: impl Display) -> ApiResult {
        self.get(&format!("/municipalities/{}", segment(municipality_id)), &[])
    }

    /// All municipalities, or only those of `province_id`.
    pub fn get_municipalities(&self, province_id: Option<u64>) -> ApiResult {
        let mut spec = RequestSpec::get("/municipalities");
        if let Some(id) = province_id {
            spec = spec.query("province_id", id.to_string());
        }
        self.execute_json(&spec)
    }

    pub fn get_barangays(&self, municipality_id: impl Display) -> ApiResult {
        self.get(
            &format!("/municipalities/{}/barangays", segment(municipality_id)),
            &[],
        )
    }

    pub fn get_program_statuses(&self) -> ApiResult {
        self.get("/programs/statuses", &[])
    }

    pub fn get_certificate_purposes(&self) -> ApiResult {
        self.get("/certificates/purposes", &[])
    }

    pub fn get_disaster_types(&self) -> ApiResult {
        self.get("/disasters/types", &[])
    }

    /// Staff login. Residents log in through `resident().login`.
    pub fn login(&self, username: &str, password: &str) -> ApiResult {
        self.post_json(
            "/auth/login",
            &serde_json::json!({"username": username, "password": password}),
        )
    }

    pub fn get_jobs(&self) -> ApiResult {
        self.get("/jobs", &[])
    }

    pub fn accept_job(&self, job_id: impl Display) -> ApiResult {
        self.post_json(&format!("/jobs/{}/accept", segment(job_id)), &empty_body())
    }
}

/// Path-encode a displayable id.
pub(crate) fn segment(value: impl Display) -> String {
    encode_segment(&value.to_string())
}

/// The body sent by action endpoints that take no fields.
pub(crate) fn empty_body() -> Value {
    Value::Array(Vec::new())
}

fn with_query(mut spec: RequestSpec, query: &[(&str, &str)]) -> RequestSpec {
    for (key, value) in query {
        spec = spec.query(*key, *value);
    }
    spec
}

fn mismatch(executor: &'static str, spec: &RequestSpec) -> ClientError {
    ClientError::PayloadMismatch {
        executor,
        payload: spec.payload().kind(),
    }
}
