//! Scenario state for the activity digest BDD tests.
//!
//! Every scenario owns one Tokio runtime and one wiremock server; both are
//! created lazily by the first step that needs them.

use std::future::Future;
use std::rc::Rc;

use github_activity::{DigestRun, IntakeError, Report};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::{Builder, Runtime};
use wiremock::MockServer;

/// Runtime handle that can be cloned out of an rstest-bdd `Slot`.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<Runtime>);

impl SharedRuntime {
    fn start() -> Self {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        Self(Rc::new(runtime))
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct DigestState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) run: Slot<DigestRun>,
    pub(crate) report: Slot<Report>,
    pub(crate) earlier_report: Slot<Report>,
    pub(crate) error: Slot<IntakeError>,
}

/// Returns the scenario runtime, starting it and the mock server on first
/// use.
pub(crate) fn ensure_runtime_and_server(digest_state: &DigestState) -> SharedRuntime {
    let runtime = digest_state.runtime.get().unwrap_or_else(|| {
        let started = SharedRuntime::start();
        digest_state.runtime.set(started.clone());
        started
    });

    if digest_state.server.with_ref(|_| ()).is_none() {
        digest_state.server.set(runtime.block_on(MockServer::start()));
    }

    runtime
}
