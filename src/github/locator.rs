//! Identity wrappers for tokens, API endpoints, and pull request references.

use url::Url;

use super::error::IntakeError;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, IntakeError> {
        if value.is_empty() {
            return Err(IntakeError::InvalidReference {
                message: "repository owner is empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, IntakeError> {
        if value.is_empty() {
            return Err(IntakeError::InvalidReference {
                message: "repository name is empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    pub(crate) fn new(value: u64) -> Result<Self, IntakeError> {
        if value == 0 {
            return Err(IntakeError::InvalidReference {
                message: "pull request number must be positive".to_owned(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Owner, repository, and number addressing one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: PullRequestNumber,
}

impl PullRequestRef {
    /// Builds a reference from its raw parts.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidReference`] when the owner or name is
    /// empty or the number is zero.
    pub fn new(owner: &str, repository: &str, number: u64) -> Result<Self, IntakeError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
            number: PullRequestNumber::new(number)?,
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn requested_reviewers_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}/requested_reviewers",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, IntakeError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IntakeError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PersonalAccessToken(***)")
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Parses the REST API base URL.
///
/// Accepts `https://api.github.com` as well as GitHub Enterprise bases such
/// as `https://ghe.example.com/api/v3`.
///
/// # Errors
///
/// Returns [`IntakeError::InvalidUrl`] when the value is not an absolute
/// HTTP(S) URL with a host.
pub fn parse_api_base(value: &str) -> Result<Url, IntakeError> {
    let parsed = Url::parse(value.trim()).map_err(|error| IntakeError::InvalidUrl(error.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(IntakeError::InvalidUrl(format!(
            "unsupported scheme '{}' for API base",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none() {
        return Err(IntakeError::InvalidUrl(
            "API base must include a host".to_owned(),
        ));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{PersonalAccessToken, PullRequestRef, parse_api_base};
    use crate::github::IntakeError;

    #[rstest]
    fn builds_requested_reviewers_path() {
        let pull = PullRequestRef::new("octo", "widgets", 7).expect("reference should be valid");
        assert_eq!(
            pull.requested_reviewers_path(),
            "/repos/octo/widgets/pulls/7/requested_reviewers"
        );
    }

    #[rstest]
    #[case("", "widgets", 7)]
    #[case("octo", "", 7)]
    #[case("octo", "widgets", 0)]
    fn rejects_incomplete_references(#[case] owner: &str, #[case] repo: &str, #[case] number: u64) {
        let result = PullRequestRef::new(owner, repo, number);
        assert!(
            matches!(result, Err(IntakeError::InvalidReference { .. })),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[rstest]
    fn rejects_blank_token() {
        let result = PersonalAccessToken::new("   ");
        assert!(
            matches!(result, Err(IntakeError::MissingToken)),
            "expected MissingToken, got {result:?}"
        );
    }

    #[rstest]
    fn token_debug_output_is_redacted() {
        let token = PersonalAccessToken::new("ghp_secret").expect("token should be valid");
        assert!(!format!("{token:?}").contains("ghp_secret"));
    }

    #[rstest]
    #[case("https://api.github.com")]
    #[case("https://ghe.example.com/api/v3")]
    #[case("http://127.0.0.1:8080/api/v3")]
    fn accepts_http_api_bases(#[case] value: &str) {
        assert!(parse_api_base(value).is_ok(), "expected {value} to parse");
    }

    #[rstest]
    #[case("api.github.com")]
    #[case("ftp://example.com")]
    fn rejects_invalid_api_bases(#[case] value: &str) {
        let result = parse_api_base(value);
        assert!(
            matches!(result, Err(IntakeError::InvalidUrl(_))),
            "expected InvalidUrl, got {result:?}"
        );
    }
}
