use crate::encoding::form_encode;
use crate::environment::ApiEnvironment;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::request::{self, RequestDescriptor};
use crate::request_data::{Params, QueryItem, RequestData};

/// One API operation, relative to an [`ApiEnvironment`].
///
/// `form_params` and `post_data` are mutually exclusive: when the form map
/// is non-empty it becomes the body (as `application/x-www-form-urlencoded`)
/// and `post_data` is ignored.
pub trait ApiRoute: RequestData {
    fn http_method(&self) -> HttpMethod;

    /// Path appended to the environment URL, e.g. `movie/42`.
    fn path(&self) -> String;

    fn form_params(&self) -> Option<Params> {
        None
    }

    /// Raw body bytes, sent as `application/json`.
    fn post_data(&self) -> Option<Vec<u8>> {
        None
    }

    /// Form parameters with names and values form-encoded, sorted by name.
    fn encoded_form_items(&self) -> Vec<QueryItem> {
        self.form_params()
            .map(|params| {
                params
                    .iter()
                    .map(|(name, value)| QueryItem::new(form_encode(name), form_encode(value)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The form body, or `None` when there are no form parameters.
    fn encoded_form_data(&self) -> Option<Vec<u8>> {
        let items = self.encoded_form_items();
        if items.is_empty() {
            return None;
        }
        let body = items
            .iter()
            .map(|item| format!("{}={}", item.name, item.value))
            .collect::<Vec<_>>()
            .join("&");
        Some(body.into_bytes())
    }

    /// Merge this route with `env` into a ready-to-send request.
    fn build_request(&self, env: &dyn ApiEnvironment) -> Result<RequestDescriptor, ApiError> {
        request::build_request(self, env)
    }
}
