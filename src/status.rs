// HTTP status code classification used by response validation.

/// HTTP status codes are within the 100-599 range.
pub fn is_valid_http_status_code(code: u16) -> bool {
    (100..=599).contains(&code)
}

/// Only the 2xx range is successful.
pub fn is_successful_http_status_code(code: u16) -> bool {
    (200..=299).contains(&code)
}

pub fn is_unsuccessful_http_status_code(code: u16) -> bool {
    is_valid_http_status_code(code) && !is_successful_http_status_code(code)
}
