use std::collections::BTreeMap;

use crate::encoding::url_encode;

/// Header or parameter map. Iteration is in key order, which keeps built
/// URLs and bodies deterministic.
pub type Params = BTreeMap<String, String>;

/// A name/value pair destined for a query string or form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryItem {
    pub name: String,
    pub value: String,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Headers and query parameters contributed to an outgoing request.
///
/// Implemented by both environments and routes. Provide raw values; they
/// are encoded when the request is built.
pub trait RequestData {
    fn headers(&self) -> Option<Params> {
        None
    }

    fn query_params(&self) -> Option<Params> {
        None
    }

    /// Query parameters as url-encoded items, sorted by name.
    fn encoded_query_items(&self) -> Vec<QueryItem> {
        encoded_query_items(self.query_params().as_ref())
    }
}

/// Convert a query map into url-encoded items sorted by name. Absent and
/// empty maps both yield no items.
pub fn encoded_query_items(params: Option<&Params>) -> Vec<QueryItem> {
    params
        .map(|params| {
            params
                .iter()
                .map(|(name, value)| QueryItem::new(name.clone(), url_encode(value)))
                .collect()
        })
        .unwrap_or_default()
}

/// Environment headers overlaid with route headers; the route wins on
/// collisions. Names are compared ignoring ASCII case, and the route's
/// spelling is kept.
pub fn merge_headers(environment: Option<&Params>, route: Option<&Params>) -> Params {
    let mut result = environment.cloned().unwrap_or_default();
    for (name, value) in route.into_iter().flatten() {
        result.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        result.insert(name.clone(), value.clone());
    }
    result
}

/// Route items first, then environment items. Each half keeps its own
/// name order.
pub fn merge_query_items(route: Vec<QueryItem>, environment: Vec<QueryItem>) -> Vec<QueryItem> {
    let mut items = route;
    items.extend(environment);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn encoded_items_are_sorted_and_encoded() {
        let p = params(&[("q", "let's search for &"), ("page", "2"), ("lang", "en-US")]);
        let items = encoded_query_items(Some(&p));
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["lang", "page", "q"]);
        assert_eq!(items[2].value, "let's%20search%20for%20%26");
    }

    #[test]
    fn absent_and_empty_maps_yield_no_items() {
        assert!(encoded_query_items(None).is_empty());
        assert!(encoded_query_items(Some(&Params::new())).is_empty());
    }

    #[test]
    fn route_headers_override_environment_headers() {
        let env = params(&[("A", "1"), ("B", "2")]);
        let route = params(&[("B", "3"), ("C", "4")]);
        let merged = merge_headers(Some(&env), Some(&route));
        assert_eq!(merged, params(&[("A", "1"), ("B", "3"), ("C", "4")]));
    }

    #[test]
    fn header_collisions_ignore_case() {
        let env = params(&[("x-token", "env"), ("Accept", "text/plain"), ("locale", "sv")]);
        let route = params(&[("X-Token", "route"), ("ACCEPT", "application/json")]);
        let merged = merge_headers(Some(&env), Some(&route));
        assert_eq!(
            merged,
            params(&[("ACCEPT", "application/json"), ("X-Token", "route"), ("locale", "sv")])
        );
    }

    #[test]
    fn header_merge_tolerates_missing_sides() {
        let env = params(&[("A", "1")]);
        assert_eq!(merge_headers(Some(&env), None), env);
        assert_eq!(merge_headers(None, Some(&env)), env);
        assert!(merge_headers(None, None).is_empty());
    }

    #[test]
    fn query_merge_puts_route_items_first() {
        let route = vec![QueryItem::new("q", "x"), QueryItem::new("z", "1")];
        let env = vec![QueryItem::new("a", "k")];
        let merged = merge_query_items(route, env);
        let names: Vec<_> = merged.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["q", "z", "a"]);
    }
}
