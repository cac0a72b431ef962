//! Request execution: build, perform, validate, decode.
//!
//! `ApiClient` holds only its transport and can be shared freely across
//! tasks. Each fetch is a single transport call; the status code is
//! checked before any decoding, so an error payload stays available on
//! the returned [`ApiError`].

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::environment::ApiEnvironment;
use crate::error::{ApiError, ClientError, TransportError};
use crate::http::{build_client, Transport};
use crate::request::{build_request, ApiRequest, RequestDescriptor};
use crate::route::ApiRoute;
use crate::status::{is_successful_http_status_code, is_valid_http_status_code};
use crate::types::{ApiResult, ResponseMeta};

/// Turns response bytes into typed values.
pub trait ResponseDecoder {
    type Error: std::error::Error + Send + Sync + 'static;

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, Self::Error>;
}

/// The default decoder: the body is JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl ResponseDecoder for JsonDecoder {
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(data)
    }
}

/// Reject responses whose status code is not a successful HTTP status.
///
/// Responses without a status pass.
pub fn validate_response(
    request: &RequestDescriptor,
    response: &ResponseMeta,
    data: &[u8],
) -> Result<(), ApiError> {
    let Some(code) = response.status else {
        return Ok(());
    };
    if !is_valid_http_status_code(code) {
        return Err(ApiError::InvalidHttpStatusCode {
            code,
            request: request.clone(),
            response: response.clone(),
            body: data.to_vec(),
        });
    }
    if !is_successful_http_status_code(code) {
        return Err(ApiError::UnsuccessfulHttpStatusCode {
            code,
            request: request.clone(),
            response: response.clone(),
            body: data.to_vec(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl ApiClient<reqwest::Client> {
    /// A client over reqwest, configured from `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self, TransportError> {
        Ok(Self::new(build_client(cfg)?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform a built request and validate its status code.
    pub async fn fetch_raw(
        &self,
        request: &RequestDescriptor,
    ) -> Result<ApiResult, ClientError<T::Error>> {
        self.perform(request).await
    }

    /// Build the request for `route` in `env`, then [`fetch_raw`](Self::fetch_raw) it.
    pub async fn fetch<R, E>(&self, route: &R, env: &E) -> Result<ApiResult, ClientError<T::Error>>
    where
        R: ApiRoute + ?Sized,
        E: ApiEnvironment + ?Sized,
    {
        let request = build_request(route, env)?;
        self.perform(&request).await
    }

    /// Perform a built request and decode its body as JSON.
    pub async fn request_item<V: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<V, ClientError<T::Error>> {
        self.request_item_with(request, &JsonDecoder).await
    }

    pub async fn request_item_with<V, D>(
        &self,
        request: &RequestDescriptor,
        decoder: &D,
    ) -> Result<V, ClientError<T::Error, D::Error>>
    where
        V: DeserializeOwned,
        D: ResponseDecoder + Sync,
    {
        let result = self.perform::<D::Error>(request).await?;
        decoder.decode(&result.data).map_err(ClientError::Decode)
    }

    /// Fetch `route` in `env` and decode the body as JSON.
    pub async fn fetch_item<V, R, E>(&self, route: &R, env: &E) -> Result<V, ClientError<T::Error>>
    where
        V: DeserializeOwned,
        R: ApiRoute + ?Sized,
        E: ApiEnvironment + ?Sized,
    {
        self.fetch_item_with(route, env, &JsonDecoder).await
    }

    pub async fn fetch_item_with<V, R, E, D>(
        &self,
        route: &R,
        env: &E,
        decoder: &D,
    ) -> Result<V, ClientError<T::Error, D::Error>>
    where
        V: DeserializeOwned,
        R: ApiRoute + ?Sized,
        E: ApiEnvironment + ?Sized,
        D: ResponseDecoder + Sync,
    {
        let request = build_request(route, env)?;
        self.request_item_with(&request, decoder).await
    }

    /// Fetch a typed [`ApiRequest`], decoding into its declared response type.
    pub async fn fetch_request<Q, E>(
        &self,
        request: &Q,
        env: &E,
    ) -> Result<Q::Response, ClientError<T::Error>>
    where
        Q: ApiRequest + ?Sized,
        E: ApiEnvironment + ?Sized,
    {
        self.fetch_item(&request.route(), env).await
    }

    async fn perform<D>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<ApiResult, ClientError<T::Error, D>> {
        let result = self
            .transport
            .perform(request)
            .await
            .map_err(ClientError::Transport)?;
        validate_response(request, &result.response, &result.data)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use url::Url;

    fn request() -> RequestDescriptor {
        RequestDescriptor {
            url: Url::parse("https://api.example.com/search").unwrap(),
            method: HttpMethod::Get,
            headers: Default::default(),
            body: None,
        }
    }

    fn validate(status: Option<u16>) -> Result<(), ApiError> {
        let response = ResponseMeta {
            status,
            ..Default::default()
        };
        validate_response(&request(), &response, b"{\"error\":true}")
    }

    #[test]
    fn successful_and_missing_statuses_pass() {
        assert!(validate(Some(200)).is_ok());
        assert!(validate(Some(204)).is_ok());
        assert!(validate(Some(299)).is_ok());
        assert!(validate(None).is_ok());
    }

    #[test]
    fn out_of_range_statuses_are_invalid() {
        for code in [0, 50, 99, 600, 999] {
            let err = validate(Some(code)).unwrap_err();
            assert!(
                matches!(err, ApiError::InvalidHttpStatusCode { code: c, .. } if c == code),
                "{code}"
            );
        }
    }

    #[test]
    fn valid_non_2xx_statuses_are_unsuccessful() {
        for code in [100, 150, 301, 404, 500, 599] {
            let err = validate(Some(code)).unwrap_err();
            assert!(
                matches!(err, ApiError::UnsuccessfulHttpStatusCode { code: c, .. } if c == code),
                "{code}"
            );
            assert_eq!(err.status_code(), Some(code));
            assert_eq!(err.body(), Some(&b"{\"error\":true}"[..]));
            assert_eq!(err.request(), Some(&request()));
        }
    }

    #[test]
    fn json_decoder_reports_schema_mismatch() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Movie {
            name: String,
        }
        let ok: Movie = JsonDecoder.decode(br#"{"name":"Fargo"}"#).unwrap();
        assert_eq!(ok.name, "Fargo");
        assert!(JsonDecoder.decode::<Movie>(br#"{"title":"Fargo"}"#).is_err());
    }
}
