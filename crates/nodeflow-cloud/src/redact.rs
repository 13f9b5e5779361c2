//! Secret redaction for log output

const VISIBLE_PREFIX: usize = 8;
const MASK: &str = "********";

/// Mask a bearer token down to its first 8 characters.
///
/// Tokens of 8 characters or fewer are masked entirely.
pub fn redact_token(token: &str) -> String {
    if token.chars().count() <= VISIBLE_PREFIX {
        return MASK.to_string();
    }
    let prefix: String = token.chars().take(VISIBLE_PREFIX).collect();
    format!("{}{}", prefix, MASK)
}

/// Redact a single header value if it carries a bearer token.
pub fn redact_header_value(name: &str, value: &str) -> String {
    if !name.eq_ignore_ascii_case("authorization") {
        return value.to_string();
    }
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            format!("{} {}", scheme, redact_token(token.trim()))
        }
        _ => MASK.to_string(),
    }
}

/// Copy of `headers` that is safe to log
pub fn redact_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| (name.clone(), redact_header_value(name, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bearer tokens keep only their first eight characters
    #[test]
    fn test_redact_bearer_header() {
        let headers = vec![
            (
                "Authorization".to_string(),
                "Bearer abcdefgh12345678".to_string(),
            ),
            ("Accept".to_string(), "application/json".to_string()),
        ];

        let redacted = redact_headers(&headers);

        assert_eq!(redacted[0].1, "Bearer abcdefgh********");
        assert!(!redacted[0].1.contains("12345678"));
        assert_eq!(redacted[1].1, "application/json");
    }

    /// Tokens of eight characters or fewer are fully masked
    #[test]
    fn test_short_token_fully_masked() {
        assert_eq!(redact_token("abc"), "********");
        assert_eq!(redact_token("abcdefgh"), "********");
    }

    /// Other authorization schemes are fully masked
    #[test]
    fn test_non_bearer_authorization_masked() {
        assert_eq!(redact_header_value("authorization", "Basic dXNlcjpwYXNz"), "********");
        assert_eq!(redact_header_value("X-Request-Id", "42"), "42");
    }
}
