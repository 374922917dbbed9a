//! Submission-side URL normalization.
//!
//! The backend is the authority on URL validity, so the only job here is to
//! make sure a scheme is present before the text leaves the client.

const DEFAULT_SCHEME: &str = "https://";

/// Normalizes raw user input for submission.
///
/// Returns `None` for empty or whitespace-only input (the submission is a
/// no-op). Input without a case-insensitive `http://` or `https://` prefix gets
/// `https://` prepended; input that already carries one is returned as typed.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if has_http_scheme(trimmed) {
        return Some(trimmed.to_string());
    }
    Some(format!("{DEFAULT_SCHEME}{trimmed}"))
}

pub fn has_http_scheme(s: &str) -> bool {
    starts_with_ignore_case(s, "http://") || starts_with_ignore_case(s, "https://")
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_https_when_scheme_missing() {
        assert_eq!(
            normalize_url("example.com"),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            normalize_url("  login.example.com/path?q=1 "),
            Some("https://login.example.com/path?q=1".to_string())
        );
    }

    #[test]
    fn keeps_existing_scheme_in_any_case() {
        for input in [
            "http://example.com",
            "https://example.com",
            "HTTP://EXAMPLE.COM",
            "HtTpS://example.com/x",
        ] {
            assert_eq!(normalize_url(input), Some(input.to_string()));
        }
    }

    #[test]
    fn other_schemes_are_not_recognized() {
        assert_eq!(
            normalize_url("ftp://example.com"),
            Some("https://ftp://example.com".to_string())
        );
        assert_eq!(
            normalize_url("httpexample.com"),
            Some("https://httpexample.com".to_string())
        );
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(normalize_url(""), None);
        assert_eq!(normalize_url("   \t\n"), None);
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        assert_eq!(
            normalize_url("ドメイン.jp"),
            Some("https://ドメイン.jp".to_string())
        );
        assert_eq!(normalize_url("日"), Some("https://日".to_string()));
    }
}
