use apikit::encoding::{form_encode, url_encode};
use apikit::status::{
    is_successful_http_status_code, is_unsuccessful_http_status_code, is_valid_http_status_code,
};
use apikit::HttpMethod;

#[test]
fn query_value_encoding() {
    // Spaces, question marks and ampersands are escaped, path-safe characters kept
    assert_eq!(url_encode("Prod Env/Blue?&"), "Prod%20Env/Blue%3F%26");
    assert_eq!(url_encode("abc-._~123"), "abc-._~123");
    assert_eq!(url_encode("movies&+"), "movies%26+");
}

#[test]
fn form_value_encoding() {
    assert_eq!(form_encode("movies&+"), "movies%26%2B");
    assert_eq!(form_encode("a b"), "a%20b");
}

#[test]
fn status_classification() {
    assert!(is_valid_http_status_code(100));
    assert!(!is_valid_http_status_code(600));
    assert!(is_successful_http_status_code(201));
    assert!(!is_successful_http_status_code(302));
    assert!(is_unsuccessful_http_status_code(150));
    assert!(!is_unsuccessful_http_status_code(50));
    assert!(!is_unsuccessful_http_status_code(204));
}

#[test]
fn method_wire_names() {
    let names: Vec<_> = HttpMethod::ALL.iter().map(|m| m.method()).collect();
    assert_eq!(
        names,
        ["CONNECT", "DELETE", "GET", "HEAD", "OPTIONS", "PATCH", "POST", "PUT", "TRACE"]
    );
}
