//! Mock GitHub responses and the digest runner for the BDD tests.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use github_activity::telemetry::NoopTelemetrySink;
use github_activity::{
    ActivityConfig, DigestRun, IntakeError, OctocrabIssueGateway, collect_activity,
};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::state::{DigestState, ensure_runtime_and_server};

/// Comma-separated item numbers, as written in the feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemNumbers(Vec<u64>);

impl ItemNumbers {
    pub(crate) fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }
}

impl FromStr for ItemNumbers {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(|part| part.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for ItemNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(u64::to_string).collect();
        f.write_str(&rendered.join(","))
    }
}

pub(crate) fn item_json(number: u64, pull: bool) -> Value {
    let mut value = json!({
        "number": number,
        "title": format!("Item {number}"),
        "html_url": format!("https://github.com/octo/widgets/issues/{number}"),
        "repository": {
            "name": "widgets",
            "full_name": "octo/widgets",
            "html_url": "https://github.com/octo/widgets",
            "owner": { "login": "octo" }
        },
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": format!("2025-01-01T00:{:02}:00Z", number % 60)
    });
    if pull && let Some(object) = value.as_object_mut() {
        object.insert(
            "pull_request".to_owned(),
            json!({ "html_url": format!("https://github.com/octo/widgets/pull/{number}") }),
        );
    }
    value
}

pub(crate) fn reviewers_path(number: u64) -> String {
    format!("/api/v3/repos/octo/widgets/pulls/{number}/requested_reviewers")
}

pub(crate) fn mount(digest_state: &DigestState, mock: Mock) {
    let runtime = ensure_runtime_and_server(digest_state);
    digest_state
        .server
        .with_ref(|server| {
            runtime.block_on(mock.mount(server));
        })
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

pub(crate) fn issues_mock(filter: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/v3/issues"))
        .and(query_param("filter", filter))
        .respond_with(response)
}

pub(crate) fn reviewers_mock(number: u64, response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(reviewers_path(number)))
        .respond_with(response)
}

pub(crate) fn server_error() -> ResponseTemplate {
    ResponseTemplate::new(500).set_body_json(json!({ "message": "Server Error" }))
}

/// Collects activity from the mock server exactly as the binary does.
pub(crate) fn run_digest(
    digest_state: &DigestState,
    token: Option<&str>,
) -> Result<DigestRun, IntakeError> {
    let runtime = ensure_runtime_and_server(digest_state);
    let server_url = digest_state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| IntakeError::Api {
            message: "mock server URL missing".to_owned(),
        })?;

    let config = ActivityConfig {
        token: token.map(str::to_owned),
        api_base: format!("{server_url}/api/v3"),
        concurrency: 2,
        ..Default::default()
    };

    runtime.block_on(collect_activity(
        &config,
        OctocrabIssueGateway::for_token,
        Arc::new(NoopTelemetrySink),
    ))
}

pub(crate) fn received_request_count(digest_state: &DigestState) -> usize {
    let runtime = ensure_runtime_and_server(digest_state);
    digest_state
        .server
        .with_ref(|server| {
            runtime
                .block_on(server.received_requests())
                .map_or(0, |requests| requests.len())
        })
        .unwrap_or_else(|| panic!("mock server not initialised"))
}
