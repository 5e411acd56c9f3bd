use regex::Regex;
use std::sync::LazyLock;

/// Scheme followed by everything up to the next whitespace. Trailing
/// punctuation stays part of the match.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("URL pattern is valid"));

/// Return the first URL found in `text`, scanning left to right.
///
/// Returns `None` for empty text or text without any `http(s)://` URL.
pub fn extract(text: &str) -> Option<&str> {
    URL_PATTERN.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_url_returns_none() {
        for text in [
            "",
            "   ",
            "just some words",
            "ftp://files.example.com/a",
            "http:/missing-slash.com",
            "www.example.com",
        ] {
            assert_eq!(extract(text), None, "input: {text:?}");
        }
    }

    #[test]
    fn test_stops_at_whitespace() {
        assert_eq!(extract("prefix http://a.b/c suffix"), Some("http://a.b/c"));
        assert_eq!(extract("tab\thttp://a.b/c\tafter"), Some("http://a.b/c"));
        assert_eq!(extract("line\nhttps://a.b/c\nnext"), Some("https://a.b/c"));
    }

    #[test]
    fn test_keeps_trailing_punctuation() {
        assert_eq!(
            extract("Check https://x.io/path."),
            Some("https://x.io/path.")
        );
        assert_eq!(extract("(see http://x.io/a),"), Some("http://x.io/a),"));
    }

    #[test]
    fn test_returns_first_match() {
        let text = "first https://one.example/a then http://two.example/b";
        assert_eq!(extract(text), Some("https://one.example/a"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(
            extract("go to HTTPS://Example.COM/Path?q=1"),
            Some("HTTPS://Example.COM/Path?q=1")
        );
        assert_eq!(extract("Http://x.io"), Some("Http://x.io"));
    }

    #[test]
    fn test_keeps_query_and_fragment() {
        assert_eq!(
            extract("https://example.com/search?q=rust&lang=en#top"),
            Some("https://example.com/search?q=rust&lang=en#top")
        );
    }

    #[test]
    fn test_keeps_whole_token_around_host() {
        assert_eq!(
            extract("see http://localhost:8080."),
            Some("http://localhost:8080.")
        );
        assert_eq!(
            extract("server at http://127.0.0.1:3000)"),
            Some("http://127.0.0.1:3000)")
        );
        assert_eq!(extract("<https://example.com>"), Some("https://example.com>"));
        assert_eq!(extract("https://example.com|x"), Some("https://example.com|x"));
    }

    #[test]
    fn test_first_match_is_never_skipped() {
        assert_eq!(
            extract("http://?q=1 then https://real.example/x"),
            Some("http://?q=1")
        );
    }

    #[test]
    fn test_control_characters_do_not_panic() {
        assert_eq!(extract("\u{0}\u{7}\u{1b}[0m"), None);
        assert_eq!(
            extract("\u{1b}[1mhttps://x.io/a\u{0}b"),
            Some("https://x.io/a\u{0}b")
        );
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(
            extract("链接：https://例子.测试/路径 谢谢"),
            Some("https://例子.测试/路径")
        );
    }
}
