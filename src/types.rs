use reqwest::header::HeaderMap;
use std::borrow::Cow;

/// Response metadata reported by a transport.
///
/// `status` is `None` for transports that have no notion of an HTTP status;
/// such responses are never rejected by status validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: Option<u16>,
    pub headers: HeaderMap,
}

impl ResponseMeta {
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            headers: HeaderMap::new(),
        }
    }
}

/// Raw response bytes and metadata, before any decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResult {
    pub data: Vec<u8>,
    pub response: ResponseMeta,
}

impl ApiResult {
    pub fn new(data: impl Into<Vec<u8>>, response: ResponseMeta) -> Self {
        Self {
            data: data.into(),
            response,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response.status
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}
