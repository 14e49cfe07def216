//! Synchronous client for the OneID local-government identity API.
//!
//! # Overview
//! Every endpoint method builds one `HttpRequest`, hands it to a
//! `Transport`, and returns one `ResponseOutcome`. Residents, municipal
//! staff, riders and third-party apps each get a facade borrowed from the
//! `Client`; reference data (genders, municipalities, program statuses, ...)
//! lives on the client itself.
//!
//! # Design
//! - Requests are plain data. `Client::build_request` shows exactly what
//!   would be sent, and a custom `Transport` can execute it.
//! - Errors are values. Once a request is attempted, connection failures,
//!   HTTP error statuses and undecodable bodies all come back as
//!   `ResponseOutcome` variants; `ClientError` is reserved for requests that
//!   cannot be attempted at all.
//! - Debug tracing renders each request as a curl command into a
//!   configurable `DebugSink` and is off by default.
//!
//! ```no_run
//! use oneid_core::Client;
//!
//! let client = Client::new("https://oneid.example.ph/api")?;
//! let login = client.resident().login("alice", "pw")?;
//! if let Some(token) = login.json().and_then(|v| v["token"].as_str()) {
//!     let client = client.clone().token(token);
//!     let profile = client.resident().get_profile()?;
//!     println!("{:?}", profile.json());
//! }
//! # Ok::<(), oneid_core::ClientError>(())
//! ```

pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod http;
pub mod outcome;
pub mod request;
pub mod resources;
pub mod trace;
pub mod transport;

pub use client::{ApiResult, Client};
pub use config::ClientConfig;
pub use error::{ClientError, TransportError};
pub use http::{BasicAuth, HttpMethod, HttpRequest, HttpResponse};
pub use outcome::ResponseOutcome;
pub use request::{Payload, RequestSpec, ResponseKind};
pub use resources::{AppResource, MunicipalityResource, ResidentResource, RiderResource};
pub use trace::{DebugSink, TracingSink};
pub use transport::{Transport, UreqTransport};
