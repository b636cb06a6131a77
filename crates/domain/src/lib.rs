//! Pokecheck Domain - Core contract-testing types
//!
//! This crate defines the data model of the harness: request targets,
//! captured responses, expectations, the scenario registry and results.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod field_path;
pub mod request;
pub mod response;
pub mod scenario;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use field_path::{FieldPath, PathSegment};
pub use request::{QueryParams, ResourcePath};
pub use response::ResponseSpec;
pub use scenario::{
    CaseGroup, Expectation, RegisteredScenario, ResourceGroup, Scenario, ScenarioId, Suite,
};
pub use testing::{ExpectationResult, Outcome, ScenarioResult, ScenarioState, SuiteReport};
