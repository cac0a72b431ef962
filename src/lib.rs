//! Declarative HTTP API access.
//!
//! An [`ApiEnvironment`] describes where an API lives (base URL plus shared
//! headers and query parameters); an [`ApiRoute`] describes one operation
//! (method, path, its own headers, query parameters and body). The two are
//! merged into a [`RequestDescriptor`], performed through a [`Transport`]
//! and validated by an [`ApiClient`] before the body is decoded.

pub mod client;
pub mod config;
pub mod encoding;
pub mod environment;
pub mod error;
pub mod http;
pub mod integrations;
pub mod request;
pub mod request_data;
pub mod route;
pub mod status;
pub mod types;

pub use client::{validate_response, ApiClient, JsonDecoder, ResponseDecoder};
pub use config::Config;
pub use environment::ApiEnvironment;
pub use error::{ApiError, ClientError, TransportError};
pub use http::{HttpMethod, Transport};
pub use request::{build_request, ApiRequest, RequestDescriptor};
pub use request_data::{Params, QueryItem, RequestData};
pub use route::ApiRoute;
pub use types::{ApiResult, ResponseMeta};
