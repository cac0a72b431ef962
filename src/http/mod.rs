use crate::config::Config;
use crate::error::TransportError;
use crate::request::RequestDescriptor;
use crate::types::{ApiResult, ResponseMeta};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::{Position, Url};

/// HTTP methods a route can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Connect,
        HttpMethod::Delete,
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Patch,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Trace,
    ];

    /// Lowercase identifier, e.g. `get`.
    pub fn id(&self) -> &'static str {
        match self {
            HttpMethod::Connect => "connect",
            HttpMethod::Delete => "delete",
            HttpMethod::Get => "get",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Patch => "patch",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Trace => "trace",
        }
    }

    /// Uppercase name as sent on the wire, e.g. `GET`.
    pub fn method(&self) -> &'static str {
        match self {
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown http method {0:?}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Connect => Method::CONNECT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Get => Method::GET,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Trace => Method::TRACE,
        }
    }
}

/// Performs the network call for a built request.
///
/// Any HTTP stack can sit behind this. Timeouts and cancellation are the
/// implementation's business; the client calls `perform` exactly once per
/// request.
#[async_trait]
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn perform(&self, request: &RequestDescriptor) -> Result<ApiResult, Self::Error>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    type Error = T::Error;

    async fn perform(&self, request: &RequestDescriptor) -> Result<ApiResult, Self::Error> {
        (**self).perform(request).await
    }
}

pub fn build_client(cfg: &Config) -> Result<Client, TransportError> {
    let mut default_headers = HeaderMap::new();
    let user_agent = HeaderValue::from_str(&cfg.user_agent)
        .map_err(|_| TransportError::InvalidHeaderValue(USER_AGENT.to_string()))?;
    default_headers.insert(USER_AGENT, user_agent);
    let client = Client::builder()
        .default_headers(default_headers)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .use_rustls_tls()
        .build()?;
    Ok(client)
}

fn header_map(request: &RequestDescriptor) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::with_capacity(request.headers.len());
    for (name, value) in &request.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TransportError::InvalidHeaderName(name.clone()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| TransportError::InvalidHeaderValue(name.clone()))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

// Query strings can carry credentials such as api keys.
fn loggable_url(url: &Url) -> &str {
    &url[..Position::AfterPath]
}

#[async_trait]
impl Transport for Client {
    type Error = TransportError;

    async fn perform(&self, request: &RequestDescriptor) -> Result<ApiResult, TransportError> {
        let headers = header_map(request)?;
        let mut builder = self
            .request(request.method.into(), request.url.clone())
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        debug!("{} {}", request.method, loggable_url(&request.url));
        let res = builder.send().await?;
        let status = res.status();
        let headers = res.headers().clone();
        debug!(
            "{} {} -> {}",
            request.method,
            loggable_url(&request.url),
            status
        );
        let data = res.bytes().await?;
        Ok(ApiResult::new(
            data.to_vec(),
            ResponseMeta {
                status: Some(status.as_u16()),
                headers,
            },
        ))
    }
}
