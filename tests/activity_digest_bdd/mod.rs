//! Support modules for the activity digest BDD tests.

pub(crate) mod harness;
pub(crate) mod state;

pub(crate) use harness::{
    ItemNumbers, issues_mock, item_json, mount, received_request_count, reviewers_mock,
    run_digest, server_error,
};
pub(crate) use state::{DigestState, ensure_runtime_and_server};
