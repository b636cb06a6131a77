//! Scenario descriptors, expectations and the suite registry.

mod expectation;
mod registry;

pub use expectation::Expectation;
pub use registry::{CaseGroup, RegisteredScenario, ResourceGroup, Scenario, ScenarioId, Suite};
