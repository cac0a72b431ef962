//! Request construction: merges an environment and a route into a single
//! [`RequestDescriptor`].

use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use url::Url;

use crate::environment::ApiEnvironment;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::request_data::{merge_headers, merge_query_items, Params};
use crate::route::ApiRoute;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// A fully merged request, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub url: Url,
    pub method: HttpMethod,
    pub headers: Params,
    pub body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    /// Header lookup, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    pub fn is_form(&self) -> bool {
        self.content_type() == Some(CONTENT_TYPE_FORM)
    }
}

/// A typed request: the route to call and the type its response decodes to.
pub trait ApiRequest {
    type Route: ApiRoute;
    type Response: DeserializeOwned;

    fn route(&self) -> Self::Route;
}

/// Build the outgoing request for `route` in `env`.
///
/// The URL is the environment URL with the route path appended and the
/// merged query items attached (route items first, then environment
/// items). Headers are merged with the route winning. A non-empty form
/// map becomes the body, otherwise the route's post data is sent as is.
/// `Content-Type` is always set last.
pub fn build_request<R, E>(route: &R, env: &E) -> Result<RequestDescriptor, ApiError>
where
    R: ApiRoute + ?Sized,
    E: ApiEnvironment + ?Sized,
{
    let mut components = Url::parse(env.url())
        .map_err(|_| ApiError::InvalidEnvironmentUrl(env.url().to_string()))?;
    append_path(&mut components, &route.path())?;

    let items = merge_query_items(route.encoded_query_items(), env.encoded_query_items());
    components.set_query(None);
    if !items.is_empty() {
        components
            .query_pairs_mut()
            .extend_pairs(items.iter().map(|item| (&item.name, &item.value)));
    }
    // Setters keep the serialization valid; the re-parse only guards it.
    let url = Url::parse(components.as_str())
        .map_err(|_| ApiError::NoUrlInComponents(components.to_string()))?;

    let form_data = route.encoded_form_data();
    let content_type = if form_data.is_some() {
        CONTENT_TYPE_FORM
    } else {
        CONTENT_TYPE_JSON
    };
    let body = form_data.or_else(|| route.post_data());

    let mut headers = merge_headers(env.headers().as_ref(), route.headers().as_ref());
    headers.retain(|name, _| !name.eq_ignore_ascii_case(CONTENT_TYPE));
    headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());

    Ok(RequestDescriptor {
        url,
        method: route.http_method(),
        headers,
        body,
    })
}

fn append_path(url: &mut Url, path: &str) -> Result<(), ApiError> {
    let rejected = url.clone();
    let mut segments = url
        .path_segments_mut()
        .map_err(|()| ApiError::FailedToCreateComponentsFromUrl(rejected))?;
    segments.pop_if_empty().extend(
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| percent_decode_str(segment).decode_utf8_lossy()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request_data::RequestData;

    struct Env(&'static str);

    impl RequestData for Env {}

    impl ApiEnvironment for Env {
        fn url(&self) -> &str {
            self.0
        }
    }

    struct Get(&'static str);

    impl RequestData for Get {}

    impl ApiRoute for Get {
        fn http_method(&self) -> HttpMethod {
            HttpMethod::Get
        }

        fn path(&self) -> String {
            self.0.to_string()
        }
    }

    struct Owned(String);

    impl RequestData for Owned {}

    impl ApiRoute for Owned {
        fn http_method(&self) -> HttpMethod {
            HttpMethod::Get
        }

        fn path(&self) -> String {
            self.0.clone()
        }
    }

    #[test]
    fn path_is_appended_to_base_path() {
        let req = build_request(&Get("movie/42"), &Env("https://api.themoviedb.org/3")).unwrap();
        assert_eq!(req.url.as_str(), "https://api.themoviedb.org/3/movie/42");

        let req = build_request(&Get("/businesses/search"), &Env("https://api.yelp.com/v3/")).unwrap();
        assert_eq!(req.url.as_str(), "https://api.yelp.com/v3/businesses/search");
    }

    #[test]
    fn empty_path_keeps_base_url() {
        let req = build_request(&Get(""), &Env("http://api.imdb.com/")).unwrap();
        assert_eq!(req.url.as_str(), "http://api.imdb.com/");
    }

    #[test]
    fn path_segments_are_escaped() {
        let req = build_request(&Get("search/a b?"), &Env("https://api.example.com")).unwrap();
        assert_eq!(req.url.as_str(), "https://api.example.com/search/a%20b%3F");
    }

    #[test]
    fn escaped_separators_stay_inside_a_segment() {
        let path = format!("businesses/{}", crate::encoding::path_segment("a/b 50%"));
        let req = build_request(&Owned(path), &Env("https://api.example.com")).unwrap();
        assert_eq!(req.url.as_str(), "https://api.example.com/businesses/a%2Fb%2050%25");
        assert_eq!(req.url.path_segments().unwrap().count(), 2);
    }

    #[test]
    fn hostile_paths_and_queries_still_build() {
        struct Noisy;

        impl RequestData for Noisy {
            fn query_params(&self) -> Option<Params> {
                Some(Params::from([
                    ("q #?".to_string(), "%zz&=+\u{0}é".to_string()),
                    ("[]".to_string(), "{}|^`".to_string()),
                ]))
            }
        }

        impl ApiRoute for Noisy {
            fn http_method(&self) -> HttpMethod {
                HttpMethod::Get
            }

            fn path(&self) -> String {
                "a%zz/../b c/#frag?x".to_string()
            }
        }

        let req = build_request(&Noisy, &Env("https://api.example.com/v1")).unwrap();
        assert_eq!(Url::parse(req.url.as_str()).unwrap(), req.url);
        assert_eq!(req.url.fragment(), None);
        assert!(req.url.query().unwrap().starts_with("%5B%5D="));
    }

    #[test]
    fn no_query_string_without_items() {
        let req = build_request(&Get("search"), &Env("https://api.example.com/?stale=1")).unwrap();
        assert_eq!(req.url.as_str(), "https://api.example.com/search");
        assert_eq!(req.url.query(), None);
    }

    #[test]
    fn invalid_environment_url_is_reported() {
        let err = build_request(&Get("search"), &Env("not a url")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidEnvironmentUrl(ref s) if s == "not a url"));
    }

    #[test]
    fn base_without_path_segments_is_rejected() {
        let err = build_request(&Get("search"), &Env("mailto:someone@example.com")).unwrap_err();
        assert!(matches!(err, ApiError::FailedToCreateComponentsFromUrl(_)));
    }

    #[test]
    fn json_content_type_without_body() {
        let req = build_request(&Get("x"), &Env("https://api.example.com")).unwrap();
        assert_eq!(req.content_type(), Some(CONTENT_TYPE_JSON));
        assert!(!req.is_form());
        assert!(req.body.is_none());
        assert_eq!(req.header("content-type"), Some(CONTENT_TYPE_JSON));
    }
}
