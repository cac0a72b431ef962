use thiserror::Error;
use url::Url;

use crate::request::RequestDescriptor;
use crate::types::ResponseMeta;

/// Failures detected by the request pipeline itself.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("invalid environment url: {0:?}")]
    InvalidEnvironmentUrl(String),

    #[error("failed to create url components from {0}")]
    FailedToCreateComponentsFromUrl(Url),

    /// The assembled URL did not parse again. Assembly goes through
    /// [`Url`] setters, which only produce valid serializations, so the
    /// built-in builder does not return this today. It stays for callers
    /// that match on the full set of build failures.
    #[error("no valid url in components {0:?}")]
    NoUrlInComponents(String),

    #[error("invalid http status code {code}")]
    InvalidHttpStatusCode {
        code: u16,
        request: RequestDescriptor,
        response: ResponseMeta,
        body: Vec<u8>,
    },

    #[error("unsuccessful http status code {code}")]
    UnsuccessfulHttpStatusCode {
        code: u16,
        request: RequestDescriptor,
        response: ResponseMeta,
        body: Vec<u8>,
    },
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::InvalidHttpStatusCode { code, .. }
            | Self::UnsuccessfulHttpStatusCode { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Body of the rejected response, e.g. an error payload from the API.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::InvalidHttpStatusCode { body, .. }
            | Self::UnsuccessfulHttpStatusCode { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn request(&self) -> Option<&RequestDescriptor> {
        match self {
            Self::InvalidHttpStatusCode { request, .. }
            | Self::UnsuccessfulHttpStatusCode { request, .. } => Some(request),
            _ => None,
        }
    }
}

/// Error returned by [`ApiClient`](crate::client::ApiClient).
///
/// Transport and decoder errors are carried as they were produced.
#[derive(Debug, Error)]
pub enum ClientError<T, D = serde_json::Error> {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("transport error")]
    Transport(#[source] T),

    #[error("failed to decode response")]
    Decode(#[source] D),
}

impl<T, D> ClientError<T, D> {
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_transport(self) -> Option<T> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_decode(self) -> Option<D> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors from the reqwest-backed transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct Reset;

    #[test]
    fn wrapped_errors_are_reported_once() {
        let err: ClientError<Reset> = ClientError::Transport(Reset);
        assert_eq!(err.to_string(), "transport error");
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("connection reset"));

        let decode = serde_json::from_str::<u8>("x").unwrap_err();
        let message = decode.to_string();
        let err: ClientError<Reset> = ClientError::Decode(decode);
        assert_eq!(err.to_string(), "failed to decode response");
        assert_eq!(err.source().map(|e| e.to_string()), Some(message.clone()));

        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches(message.as_str()).count(), 1);
    }
}
