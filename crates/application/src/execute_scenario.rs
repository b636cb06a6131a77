//! Execute Scenario Use Case
//!
//! Runs one scenario as two explicit phases: `fetch` returns the captured
//! response, `assess` evaluates the scenario's expectations against it.
//! Nothing is shared between scenarios; the response is threaded from one
//! phase to the next by value.

use std::sync::Arc;
use std::time::Instant;

use pokecheck_domain::{
    ExpectationResult, RegisteredScenario, ResponseSpec, Scenario, ScenarioResult, ScenarioState,
};
use tracing::{debug, info, warn};

use crate::assertion::AssertionEngine;
use crate::ports::{HttpClient, HttpClientError};

/// Use case for executing a single scenario.
pub struct ExecuteScenario<C: HttpClient> {
    client: Arc<C>,
    engine: AssertionEngine,
}

impl<C: HttpClient> ExecuteScenario<C> {
    /// Creates a new `ExecuteScenario` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self {
            client,
            engine: AssertionEngine::new(),
        }
    }

    /// Phase one: issue the scenario's request.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpClientError`] if no response was obtained.
    pub async fn fetch(&self, scenario: &Scenario) -> Result<ResponseSpec, HttpClientError> {
        self.client.fetch(&scenario.path, &scenario.query).await
    }

    /// Phase two: evaluate every expectation against the response.
    #[must_use]
    pub fn assess(&self, scenario: &Scenario, response: &ResponseSpec) -> Vec<ExpectationResult> {
        self.engine.assert_all(&scenario.expectations, response)
    }

    /// Runs both phases and always produces exactly one result.
    ///
    /// Transport failures become a failed result; they never propagate.
    pub async fn run(&self, registered: RegisteredScenario<'_>) -> ScenarioResult {
        let id = registered.id();
        let scenario = registered.scenario;
        let url = scenario
            .path
            .resolve_url(self.client.base_url(), &scenario.query)
            .map_or_else(|_| scenario.path.to_string(), |u| u.to_string());

        let state = ScenarioState::Pending;
        let state = state.advance(None).unwrap_or(state);
        debug!(scenario = %id, %url, ?state, "fetching");

        let start = Instant::now();
        let result = match self.fetch(scenario).await {
            Ok(response) => {
                let expectations = self.assess(scenario, &response);
                ScenarioResult::assessed(
                    id,
                    url,
                    response.status,
                    expectations,
                    elapsed_ms(start),
                )
            }
            Err(error) => {
                warn!(scenario = %id, %url, %error, "transport failure");
                ScenarioResult::transport_failure(id, url, error.to_string(), elapsed_ms(start))
            }
        };

        let state = state
            .advance(Some(&result.outcome))
            .unwrap_or_else(|| result.state());
        info!(
            scenario = %result.id,
            status = ?result.status,
            ?state,
            duration_ms = result.duration_ms,
            "scenario finished"
        );

        result
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
