//! `If-Match` / `ETag` handling.
//!
//! The entity tag of a widget is its version, always sent as a strong,
//! quoted tag (`"3"`). Incoming `If-Match` values are accepted bare (`3`) or
//! quoted (`"3"`); `*` matches any stored version. `If-Match` compares tags
//! strongly, so a weak tag (`W/"3"`) can never match and is rejected.

use std::str::FromStr;

use axum::http::HeaderMap;
use axum::http::header::IF_MATCH;

use widgethub_app::services::widget_service::Precondition;
use widgethub_domain::error::ValidationError;
use widgethub_domain::version::Version;

/// Render `version` as a strong entity tag.
#[must_use]
pub fn etag(version: Version) -> String {
    format!("\"{version}\"")
}

/// Read the `If-Match` header, if any.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidVersion`] when the header is present but
/// is not a single strong version tag or `*`.
pub fn if_match(headers: &HeaderMap) -> Result<Option<Precondition>, ValidationError> {
    let Some(value) = headers.get(IF_MATCH) else {
        return Ok(None);
    };
    let raw = value.to_str().map_err(|_| {
        ValidationError::InvalidVersion(String::from_utf8_lossy(value.as_bytes()).into_owned())
    })?;
    parse_precondition(raw).map(Some)
}

fn parse_precondition(raw: &str) -> Result<Precondition, ValidationError> {
    let trimmed = raw.trim();
    if trimmed == "*" {
        return Ok(Precondition::Any);
    }
    if trimmed.starts_with("W/") {
        return Err(ValidationError::InvalidVersion(raw.to_string()));
    }
    let tag = trimmed
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(trimmed);
    Version::from_str(tag)
        .map(Precondition::Version)
        .map_err(|_| ValidationError::InvalidVersion(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(IF_MATCH, HeaderValue::from_static(value));
        headers
    }

    fn version(value: i64) -> Precondition {
        Precondition::Version(Version::new(value).unwrap())
    }

    #[test]
    fn should_quote_version_in_etag() {
        assert_eq!(etag(Version::INITIAL), "\"1\"");
    }

    #[test]
    fn should_return_none_when_header_missing() {
        assert_eq!(if_match(&HeaderMap::new()), Ok(None));
    }

    #[test]
    fn should_accept_bare_and_quoted_tags() {
        assert_eq!(if_match(&headers_with("1")), Ok(Some(version(1))));
        assert_eq!(if_match(&headers_with("\"2\"")), Ok(Some(version(2))));
    }

    #[test]
    fn should_reject_weak_tags() {
        assert_eq!(
            if_match(&headers_with("W/\"3\"")),
            Err(ValidationError::InvalidVersion("W/\"3\"".to_string()))
        );
    }

    #[test]
    fn should_treat_star_as_any_version() {
        assert_eq!(if_match(&headers_with("*")), Ok(Some(Precondition::Any)));
    }

    #[test]
    fn should_reject_non_numeric_or_list_values() {
        assert!(if_match(&headers_with("abc")).is_err());
        assert!(if_match(&headers_with("\"1\", \"2\"")).is_err());
        assert!(if_match(&headers_with("0")).is_err());
    }
}
