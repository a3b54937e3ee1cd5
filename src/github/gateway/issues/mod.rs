//! Octocrab-backed implementation of [`IssueGateway`].

use async_trait::async_trait;
use http::Uri;
use http::header::LINK;
use octocrab::{Octocrab, Page};
use url::Url;

use crate::github::error::IntakeError;
use crate::github::locator::{PersonalAccessToken, PullRequestRef};
use crate::github::models::{ApiRequestedReviewers, ApiUser, RawItem};
use crate::github::pagination::{MAX_PER_PAGE, PageInfo, validate_pagination_params};
use crate::github::query::IssueQuery;

use super::error_mapping::{
    is_rate_limit_error, is_rate_limit_response, map_http_error, map_octocrab_error,
    rate_limit_error,
};
use super::http_utils::{
    RATE_LIMIT_RESET, extract_documentation_url, extract_github_message, has_next_link,
    header_to_string, parse_reset_header,
};
use super::{IssueGateway, IssuePage, ReviewerPage};

const REVIEWERS_OPERATION: &str = "requested reviewers";

/// Gateway that talks to the GitHub REST API through Octocrab.
pub struct OctocrabIssueGateway {
    client: Octocrab,
}

impl OctocrabIssueGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated client for `api_base`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidUrl` when the base URI cannot be parsed or
    /// `IntakeError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &Url) -> Result<Self, IntakeError> {
        let base_uri = Uri::try_from(api_base.as_str())
            .map_err(|error| IntakeError::InvalidUrl(format!("{api_base}: {error}")))?;
        let client = Octocrab::builder()
            .personal_token(token.as_ref())
            .base_uri(base_uri)
            .map_err(|error| IntakeError::InvalidUrl(format!("{api_base}: {error}")))?
            .build()
            .map_err(|error| map_octocrab_error("build client", &error))?;
        Ok(Self::new(client))
    }

    async fn map_octocrab_error_with_rate_limit(
        &self,
        operation: &str,
        error: &octocrab::Error,
    ) -> IntakeError {
        match error {
            octocrab::Error::GitHub { source, .. } if is_rate_limit_error(source) => {
                let reset_at = self.fetch_rate_limit_reset().await;
                rate_limit_error(operation, &source.message, reset_at)
            }
            _ => map_octocrab_error(operation, error),
        }
    }

    async fn fetch_rate_limit_reset(&self) -> Option<u64> {
        self.client
            .ratelimit()
            .get()
            .await
            .ok()
            .map(|limits| limits.rate.reset)
    }
}

#[async_trait]
impl IssueGateway for OctocrabIssueGateway {
    async fn authenticated_login(&self) -> Result<String, IntakeError> {
        match self.client.get::<ApiUser, _, _>("/user", None::<&()>).await {
            Ok(user) => Ok(user.login),
            Err(error) => Err(self
                .map_octocrab_error_with_rate_limit("authenticated user", &error)
                .await),
        }
    }

    async fn list_issues(&self, query: &IssueQuery, page: u32) -> Result<IssuePage, IntakeError> {
        let per_page = query.per_page();
        validate_pagination_params(page, per_page)?;

        let page_str = page.to_string();
        let per_page_str = per_page.to_string();
        let pulls = if query.pulls() { "true" } else { "false" };

        let query_params = [
            ("filter", query.filter().as_str()),
            ("pulls", pulls),
            ("state", IssueQuery::STATE),
            ("sort", IssueQuery::SORT),
            ("direction", IssueQuery::DIRECTION),
            ("per_page", per_page_str.as_str()),
            ("page", page_str.as_str()),
        ];

        let page_result: Page<RawItem> =
            match self.client.get("/issues", Some(&query_params)).await {
                Ok(page_result) => page_result,
                Err(error) => {
                    return Err(self
                        .map_octocrab_error_with_rate_limit("list issues", &error)
                        .await);
                }
            };

        let has_next = page_result.next.is_some();

        Ok(IssuePage {
            items: page_result.items,
            page_info: PageInfo::new(page, per_page).with_has_next(has_next),
        })
    }

    async fn requested_reviewers(
        &self,
        pull: &PullRequestRef,
        page: u32,
    ) -> Result<ReviewerPage, IntakeError> {
        validate_pagination_params(page, MAX_PER_PAGE)?;

        // The body is an object rather than an array, so `Page<T>` cannot
        // decode it; read the raw response and follow `Link` ourselves.
        let uri: Uri = format!(
            "{path}?per_page={MAX_PER_PAGE}&page={page}",
            path = pull.requested_reviewers_path()
        )
        .parse::<Uri>()
        .map_err(|error| IntakeError::InvalidUrl(error.to_string()))?;

        let response = self
            .client
            ._get_with_headers(uri, None)
            .await
            .map_err(|error| map_octocrab_error(REVIEWERS_OPERATION, &error))?;

        let status = response.status();
        let has_next = has_next_link(header_to_string(response.headers().get(LINK)).as_deref());
        let reset_at = parse_reset_header(response.headers().get(RATE_LIMIT_RESET));

        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| IntakeError::Api {
                message: format!("{REVIEWERS_OPERATION} response decode failed: {error}"),
            })?;

        if !status.is_success() {
            let message = extract_github_message(&body);
            let documentation_url = extract_documentation_url(&body);
            if is_rate_limit_response(
                status,
                message.as_deref().unwrap_or_default(),
                documentation_url.as_deref(),
            ) {
                return Err(rate_limit_error(
                    REVIEWERS_OPERATION,
                    message.as_deref().unwrap_or("rate limit exceeded"),
                    reset_at,
                ));
            }
            return Err(map_http_error(REVIEWERS_OPERATION, status, message));
        }

        let api: ApiRequestedReviewers =
            serde_json::from_str(&body).map_err(|error| IntakeError::Api {
                message: format!("{REVIEWERS_OPERATION} response deserialisation failed: {error}"),
            })?;

        Ok(ReviewerPage {
            logins: api.users.into_iter().map(|user| user.login).collect(),
            page_info: PageInfo::new(page, MAX_PER_PAGE).with_has_next(has_next),
        })
    }
}
