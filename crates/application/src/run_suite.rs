//! Run Suite Use Case
//!
//! Executes every registered scenario sequentially, in declaration order,
//! and aggregates the results into a [`SuiteReport`].

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use pokecheck_domain::{ScenarioResult, Suite, SuiteReport};
use tracing::{error, info};

use crate::error::ApplicationResult;
use crate::execute_scenario::ExecuteScenario;
use crate::ports::HttpClient;

/// Use case for running a whole suite.
///
/// # Example
///
/// ```ignore
/// let client = ReqwestHttpClient::new(&settings)?;
/// let use_case = RunSuite::new(Arc::new(client));
///
/// let report = use_case.execute(&suite).await?;
/// std::process::exit(i32::from(report.exit_code()));
/// ```
pub struct RunSuite<C: HttpClient> {
    executor: ExecuteScenario<C>,
}

impl<C: HttpClient> RunSuite<C> {
    /// Creates a new `RunSuite` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self {
            executor: ExecuteScenario::new(client),
        }
    }

    /// Runs the suite and returns the aggregated report.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the suite is empty or
    /// malformed; no request is sent in that case.
    pub async fn execute(&self, suite: &Suite) -> ApplicationResult<SuiteReport> {
        self.execute_with_progress(suite, |_| {}).await
    }

    /// Runs the suite, handing each result to `on_result` as soon as it is
    /// produced.
    ///
    /// A failing scenario never stops the run; each one is executed and
    /// reported independently.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the suite is empty or
    /// malformed; no request is sent in that case.
    pub async fn execute_with_progress<F>(
        &self,
        suite: &Suite,
        mut on_result: F,
    ) -> ApplicationResult<SuiteReport>
    where
        F: FnMut(&ScenarioResult) + Send,
    {
        if let Err(e) = suite.validate() {
            error!(suite = %suite.name, error = %e, "refusing to run invalid suite");
            return Err(e.into());
        }

        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::with_capacity(suite.scenario_count());

        info!(
            suite = %suite.name,
            scenarios = suite.scenario_count(),
            "starting suite"
        );

        for registered in suite.scenarios() {
            let result = self.executor.run(registered).await;
            on_result(&result);
            results.push(result);
        }

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        let report = SuiteReport::new(&suite.name, started_at, results, duration_ms);

        info!(
            suite = %report.suite_name,
            passed = report.passed,
            failed = report.failed,
            duration_ms,
            "suite finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::execute_scenario::tests::MockHttpClient;
    use crate::ports::HttpClientError;
    use pokecheck_domain::{DomainError, Expectation, ResourceGroup, Scenario};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ability_list(len: usize) -> serde_json::Value {
        let results: Vec<_> = ["stench", "drizzle", "speed-boost"]
            .iter()
            .cycle()
            .take(len)
            .map(|name| json!({"name": name}))
            .collect();
        json!({"count": 367, "results": results})
    }

    fn suite() -> Suite {
        Suite::new("pokeapi")
            .group(
                ResourceGroup::new("GET /api/v2/ability")
                    .case(
                        "No limit",
                        Scenario::get("/api/v2/ability")
                            .expect(Expectation::status(200))
                            .expect(Expectation::array_length("results", 20)),
                    )
                    .case(
                        "Limit 0",
                        Scenario::get("/api/v2/ability")
                            .query("limit", 0)
                            .expect(Expectation::status(200))
                            .expect(Expectation::array_length("results", 20)),
                    ),
            )
            .group(
                ResourceGroup::new("GET /api/v2/ability/:name").case(
                    "Invalid name",
                    Scenario::get("/api/v2/ability/:name")
                        .bind("name", "cheese")
                        .expect(Expectation::status(404)),
                ),
            )
    }

    #[tokio::test]
    async fn test_all_scenarios_pass() {
        let client = Arc::new(
            MockHttpClient::new()
                .route("/api/v2/ability", 200, ability_list(20))
                .route("/api/v2/ability?limit=0", 200, ability_list(20))
                .text_route("/api/v2/ability/cheese", 404, "Not Found"),
        );
        let use_case = RunSuite::new(Arc::clone(&client));

        let report = use_case.execute(&suite()).await.expect("Should run");

        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 3);
        assert!(report.all_passed());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(
            *client.calls.lock().unwrap(),
            vec![
                "https://pokeapi.test/api/v2/ability",
                "https://pokeapi.test/api/v2/ability?limit=0",
                "https://pokeapi.test/api/v2/ability/cheese",
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let client = MockHttpClient::new()
            .failing_route(
                "/api/v2/ability",
                HttpClientError::Timeout { timeout_ms: 60_000 },
            )
            .route("/api/v2/ability?limit=0", 200, ability_list(0))
            .text_route("/api/v2/ability/cheese", 404, "Not Found");
        let use_case = RunSuite::new(Arc::new(client));

        let report = use_case.execute(&suite()).await.expect("Should run");

        assert_eq!(report.total, 3);
        assert_eq!(
            report.results.iter().map(ScenarioResult::passed).collect::<Vec<_>>(),
            vec![false, false, true]
        );
        assert_eq!(report.failed, 2);
        assert_eq!(report.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_progress_sees_every_result_in_order() {
        let client = MockHttpClient::new()
            .route("/api/v2/ability", 200, ability_list(20))
            .route("/api/v2/ability?limit=0", 200, ability_list(20))
            .text_route("/api/v2/ability/cheese", 404, "Not Found");
        let use_case = RunSuite::new(Arc::new(client));

        let mut seen = Vec::new();
        let report = use_case
            .execute_with_progress(&suite(), |result| seen.push(result.id.case.clone()))
            .await
            .expect("Should run");

        assert_eq!(seen, vec!["No limit", "Limit 0", "Invalid name"]);
        assert_eq!(report.results.len(), seen.len());
    }

    #[tokio::test]
    async fn test_empty_suite_is_a_configuration_error() {
        let client = Arc::new(MockHttpClient::new());
        let use_case = RunSuite::new(Arc::clone(&client));

        let result = use_case.execute(&Suite::new("empty")).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Configuration(DomainError::EmptySuite(_)))
        ));
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let client = MockHttpClient::new()
            .route("/api/v2/ability", 200, ability_list(20))
            .route("/api/v2/ability?limit=0", 200, ability_list(20))
            .text_route("/api/v2/ability/cheese", 404, "Not Found");
        let use_case = RunSuite::new(Arc::new(client));
        let suite = suite();

        let first = use_case.execute(&suite).await.expect("Should run");
        let second = use_case.execute(&suite).await.expect("Should run");

        let outcomes = |report: &SuiteReport| {
            report
                .results
                .iter()
                .map(|r| (r.id.clone(), r.outcome.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(outcomes(&first), outcomes(&second));
    }
}
