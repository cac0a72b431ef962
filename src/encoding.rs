use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that survive `url_encode` unescaped: letters, digits and
/// `-._~!$&'()*+,;=:@/`. Everything else, including all non-ASCII bytes,
/// is percent-encoded.
const PATH_ALLOWED: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Encode a string for use as a query parameter value.
///
/// `&` is part of the path-safe set but delimits query items, so it is
/// always escaped to `%26` afterwards.
pub fn url_encode(value: &str) -> String {
    utf8_percent_encode(value, PATH_ALLOWED)
        .to_string()
        .replace('&', "%26")
}

const SEGMENT: &AsciiSet = &CONTROLS.add(b'/').add(b'%');

/// Escape a value so it stays a single segment when interpolated into a
/// route path. Paths are split on `/` and each segment is percent-decoded
/// before it is appended, so only `/` and `%` need escaping here.
pub fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Encode a string for an `application/x-www-form-urlencoded` body.
///
/// Same as [`url_encode`], but literal `+` becomes `%2B` since form
/// decoders read `+` as a space.
pub fn form_encode(value: &str) -> String {
    url_encode(value).replace('+', "%2B")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encode_keeps_path_safe_characters() {
        assert_eq!(url_encode("abc-._~123"), "abc-._~123");
        assert_eq!(url_encode("a,b;c=d:e@f/g"), "a,b;c=d:e@f/g");
        assert_eq!(url_encode(""), "");
    }

    #[test]
    fn url_encode_escapes_spaces_and_ampersands() {
        assert_eq!(
            url_encode("let's search for &"),
            "let's%20search%20for%20%26"
        );
        assert_eq!(url_encode("a?b#c%d"), "a%3Fb%23c%25d");
        assert_eq!(url_encode("1+1"), "1+1");
    }

    #[test]
    fn path_segment_escapes_separators() {
        assert_eq!(path_segment("a/b"), "a%2Fb");
        assert_eq!(path_segment("50%"), "50%25");
        assert_eq!(path_segment("plain-id_1"), "plain-id_1");
    }

    #[test]
    fn url_encode_escapes_non_ascii() {
        assert_eq!(url_encode("Amélie"), "Am%C3%A9lie");
    }

    #[test]
    fn form_encode_also_escapes_plus() {
        assert_eq!(
            form_encode("let's code, shall we? & do more stuff +"),
            "let's%20code,%20shall%20we%3F%20%26%20do%20more%20stuff%20%2B"
        );
        assert_eq!(form_encode(""), "");
    }

    #[test]
    fn no_delimiters_survive_encoding() {
        for input in ["a&b", "a + b", "&&++", " \t&+\n", "x=1&y=2+3"] {
            let url = url_encode(input);
            assert!(!url.contains('&'), "{input:?} -> {url}");
            let form = form_encode(input);
            assert!(!form.contains('&') && !form.contains('+'), "{input:?} -> {form}");
            assert!(!form.contains(' '));
        }
    }
}
