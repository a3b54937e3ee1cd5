//! Helpers for reading raw GitHub responses.

use http::header::HeaderValue;

/// Header carrying the Unix time at which the rate limit window resets.
pub(super) const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

pub(super) fn header_to_string(header_value: Option<&HeaderValue>) -> Option<String> {
    header_value
        .and_then(|raw| raw.to_str().ok())
        .map(ToOwned::to_owned)
}

pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

pub(super) fn extract_documentation_url(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("documentation_url")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

/// Returns true when a `Link` header advertises a `rel="next"` target.
pub(super) fn has_next_link(link_header: Option<&str>) -> bool {
    link_header.is_some_and(|links| {
        links.split(',').any(|link| {
            link.split(';')
                .skip(1)
                .any(|param| matches!(param.trim(), "rel=\"next\"" | "rel=next"))
        })
    })
}

pub(super) fn parse_reset_header(header_value: Option<&HeaderValue>) -> Option<u64> {
    header_to_string(header_value).and_then(|raw| raw.trim().parse().ok())
}
