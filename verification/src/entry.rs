//! Reading the external identity from the page's entry parameters.

use gate_types::ExternalIdentity;
use reqwest::Url;
use tracing::warn;

/// Query parameter carrying the messaging-app user id.
pub const IDENTITY_PARAM: &str = "tgUserId";

/// Extract the identity from a full page URL or a bare `?query` string.
///
/// A missing, blank, or unparsable value yields `None`, which routes the
/// workflow to `no_identity`.
pub fn identity_from_page_url(page_url: &str) -> Option<ExternalIdentity> {
    // Joining onto a base accepts both absolute URLs and bare `?query` input.
    let url = match Url::parse("http://localhost/").and_then(|base| base.join(page_url)) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "unparsable entry URL");
            return None;
        }
    };

    url.query_pairs()
        .find(|(k, _)| k == IDENTITY_PARAM)
        .and_then(|(_, v)| ExternalIdentity::new(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_identity_from_full_url() {
        let id = identity_from_page_url("https://gate.example/verify?tgUserId=123456&theme=dark");
        assert_eq!(id, ExternalIdentity::new("123456"));
    }

    #[test]
    fn reads_identity_from_bare_query() {
        assert_eq!(
            identity_from_page_url("?tgUserId=42"),
            ExternalIdentity::new("42")
        );
    }

    #[test]
    fn decodes_percent_encoding() {
        let id = identity_from_page_url("https://gate.example/?tgUserId=%2042%20").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn missing_or_blank_parameter_is_absent() {
        assert_eq!(identity_from_page_url("https://gate.example/"), None);
        assert_eq!(identity_from_page_url("https://gate.example/?tgUserId="), None);
        assert_eq!(identity_from_page_url("https://gate.example/?tguserid=5"), None);
    }
}
