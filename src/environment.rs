use crate::request_data::RequestData;

/// A deployment or version of an API.
///
/// The environment supplies the base URL that route paths are appended
/// to, plus headers and query parameters shared by every route (API keys,
/// locale, and so on). Model several deployments as enum variants.
pub trait ApiEnvironment: RequestData {
    /// Absolute base URL, e.g. `https://api.themoviedb.org/3`.
    fn url(&self) -> &str;
}
