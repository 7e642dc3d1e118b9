//! Parsing of user gist URLs such as `https://gist.github.com/alice`

use crate::error::UrlError;
use url::Url;

/// The parts of a user gist URL the downloader needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserUrl {
    /// Gist owner's username (first path segment)
    pub username: String,
}

/// Parse a user gist URL, requiring its host to be `expected_host`
///
/// Everything after the first path segment is ignored, so a link to a single
/// gist (`https://gist.github.com/alice/abc123`) also resolves to `alice`.
///
/// # Examples
///
/// ```
/// use gist_downloader::gist_url::parse_user_url;
///
/// let parsed = parse_user_url("https://gist.github.com/alice", "gist.github.com").unwrap();
/// assert_eq!(parsed.username, "alice");
///
/// assert!(parse_user_url("https://example.com/alice", "gist.github.com").is_err());
/// ```
pub fn parse_user_url(raw: &str, expected_host: &str) -> Result<UserUrl, UrlError> {
    let url = Url::parse(raw.trim())?;

    let host = url.host_str().unwrap_or_default();
    if !host.eq_ignore_ascii_case(expected_host) {
        return Err(UrlError::WrongHost {
            expected: expected_host.to_string(),
            found: host.to_string(),
        });
    }

    let username = url
        .path_segments()
        .and_then(|mut segments| segments.find(|s| !s.is_empty()))
        .ok_or(UrlError::MissingUsername)?;

    Ok(UserUrl {
        username: username.to_string(),
    })
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "gist.github.com";

    #[test]
    fn test_plain_user_url() {
        let parsed = parse_user_url("https://gist.github.com/alice", HOST).unwrap();
        assert_eq!(parsed.username, "alice");
    }

    #[test]
    fn test_trailing_slash_and_extra_segments() {
        assert_eq!(
            parse_user_url("https://gist.github.com/alice/", HOST)
                .unwrap()
                .username,
            "alice"
        );
        assert_eq!(
            parse_user_url("https://gist.github.com/alice/0123abcd", HOST)
                .unwrap()
                .username,
            "alice"
        );
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let parsed = parse_user_url("https://gist.github.com/alice?tab=stars#top", HOST).unwrap();
        assert_eq!(parsed.username, "alice");
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let parsed = parse_user_url("  https://gist.github.com/bob \n", HOST).unwrap();
        assert_eq!(parsed.username, "bob");
    }

    #[test]
    fn test_wrong_host_rejected() {
        match parse_user_url("https://example.com/alice", HOST) {
            Err(UrlError::WrongHost { expected, found }) => {
                assert_eq!(expected, HOST);
                assert_eq!(found, "example.com");
            }
            other => panic!("Expected WrongHost, got: {:?}", other),
        }
    }

    #[test]
    fn test_github_com_is_not_gist_host() {
        assert!(matches!(
            parse_user_url("https://github.com/alice", HOST),
            Err(UrlError::WrongHost { .. })
        ));
    }

    #[test]
    fn test_empty_username_rejected() {
        assert!(matches!(
            parse_user_url("https://gist.github.com/", HOST),
            Err(UrlError::MissingUsername)
        ));
        assert!(matches!(
            parse_user_url("https://gist.github.com", HOST),
            Err(UrlError::MissingUsername)
        ));
    }

    #[test]
    fn test_not_a_url_rejected() {
        assert!(matches!(
            parse_user_url("gist.github.com/alice", HOST),
            Err(UrlError::Parse(_))
        ));
        assert!(matches!(parse_user_url("", HOST), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_host_comparison_ignores_case() {
        let parsed = parse_user_url("https://Gist.GitHub.com/carol", HOST).unwrap();
        assert_eq!(parsed.username, "carol");
    }
}
