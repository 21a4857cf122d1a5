//! Per-kind URL normalization.
//!
//! Every encoder applies its kind's prefix at most once and leaves empty
//! input empty. Only the mailto encoder can fail.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LinkError, LinkResult};

/// Prefix added to external URLs without a scheme
pub const HTTP_PREFIX: &str = "http://";
/// Prefix of javascript links
pub const JAVASCRIPT_PREFIX: &str = "javascript:";
/// Prefix of mail links
pub const MAILTO_PREFIX: &str = "mailto:";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[A-Za-z0-9](([_\.\-]?[a-zA-Z0-9]+)*)@([A-Za-z0-9]+)(([\.\-]?[a-zA-Z0-9]+)*)\.([A-Za-z]{2,})$",
    )
    .expect("email pattern is valid")
});

// =============================================================================
// Anchor
// =============================================================================

/// Stored anchor fragment to the value shown in the dialog (`top` → `#top`).
pub fn decode_anchor(stored: &str) -> String {
    if stored.is_empty() || stored.starts_with('#') {
        stored.to_string()
    } else {
        format!("#{stored}")
    }
}

/// Displayed anchor to the bare fragment that gets stored (`#top` → `top`).
pub fn encode_anchor(displayed: &str) -> &str {
    displayed.strip_prefix('#').unwrap_or(displayed)
}

// =============================================================================
// External
// =============================================================================

/// Give scheme-less external URLs an `http://` prefix.
///
/// Site-relative paths and anything containing `://` are left alone.
pub fn encode_external(url: &str) -> String {
    if !url.is_empty() && !url.contains("://") && !url.starts_with('/') {
        format!("{HTTP_PREFIX}{url}")
    } else {
        url.to_string()
    }
}

// =============================================================================
// Javascript
// =============================================================================

/// Prefix script bodies with `javascript:` unless it already appears.
pub fn encode_javascript(script: &str) -> String {
    if !script.is_empty() && !script.contains(JAVASCRIPT_PREFIX) {
        format!("{JAVASCRIPT_PREFIX}{script}")
    } else {
        script.to_string()
    }
}

// =============================================================================
// Mailto
// =============================================================================

/// Check that the address after any `scheme:` prefix is `local@domain.tld`.
pub fn validate_email(value: &str) -> LinkResult<()> {
    let address = match value.find(':') {
        Some(colon) => &value[colon + 1..],
        None => value,
    };
    if EMAIL_RE.is_match(address) {
        Ok(())
    } else {
        Err(LinkError::InvalidEmail)
    }
}

/// Validate a mail address and give it a `mailto:` prefix.
///
/// An empty value is accepted as-is. A value that already carries a
/// `scheme:` prefix is validated past the colon and not prefixed again.
pub fn encode_mailto(value: &str) -> LinkResult<String> {
    if value.is_empty() {
        return Ok(String::new());
    }
    validate_email(value)?;
    if value.contains(':') {
        Ok(value.to_string())
    } else {
        Ok(format!("{MAILTO_PREFIX}{value}"))
    }
}

// =============================================================================
// Querystring
// =============================================================================

/// Strip one leading `?` from an internal link's query string.
pub fn encode_querystring(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor() {
        assert_eq!(decode_anchor("top"), "#top");
        assert_eq!(decode_anchor("#top"), "#top");
        assert_eq!(decode_anchor(""), "");

        assert_eq!(encode_anchor("#top"), "top");
        assert_eq!(encode_anchor("top"), "top");
        assert_eq!(encode_anchor("##x"), "#x");
        assert_eq!(encode_anchor(""), "");
    }

    #[test]
    fn test_external() {
        assert_eq!(encode_external("example.com"), "http://example.com");
        assert_eq!(encode_external("https://a.b"), "https://a.b");
        assert_eq!(encode_external("/local/path"), "/local/path");
        assert_eq!(encode_external("ftp://files"), "ftp://files");
        assert_eq!(encode_external(""), "");
        // Idempotent
        assert_eq!(encode_external(&encode_external("a.b")), "http://a.b");
    }

    #[test]
    fn test_javascript() {
        assert_eq!(encode_javascript("alert(1)"), "javascript:alert(1)");
        assert_eq!(encode_javascript("javascript:alert(1)"), "javascript:alert(1)");
        assert_eq!(encode_javascript(""), "");
    }

    #[test]
    fn test_mailto_valid() {
        assert_eq!(
            encode_mailto("jane.doe@example.com").unwrap(),
            "mailto:jane.doe@example.com"
        );
        assert_eq!(encode_mailto("mailto:a@b.co").unwrap(), "mailto:a@b.co");
        assert_eq!(encode_mailto("First_Last-1@Mail.Example.ORG").unwrap(), "mailto:First_Last-1@Mail.Example.ORG");
        assert_eq!(encode_mailto("").unwrap(), "");
    }

    #[test]
    fn test_mailto_invalid() {
        assert_eq!(validate_email("not-an-email"), Err(LinkError::InvalidEmail));
        assert_eq!(encode_mailto("a@b"), Err(LinkError::InvalidEmail));
        assert_eq!(encode_mailto("a@b.c"), Err(LinkError::InvalidEmail));
        assert_eq!(encode_mailto(".a@b.com"), Err(LinkError::InvalidEmail));
        assert_eq!(encode_mailto("a..b@c.com"), Err(LinkError::InvalidEmail));
        assert_eq!(encode_mailto("mailto:"), Err(LinkError::InvalidEmail));
    }

    #[test]
    fn test_querystring() {
        assert_eq!(encode_querystring("?a=1"), "a=1");
        assert_eq!(encode_querystring("a=1"), "a=1");
        assert_eq!(encode_querystring(""), "");
    }
}
