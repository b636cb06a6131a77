//! Pokecheck Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (the HTTP client boundary)
//! - The assertion engine
//! - Use case orchestration (single scenario, whole suite)
//! - Application-level error handling

pub mod assertion;
pub mod error;
pub mod execute_scenario;
pub mod ports;
pub mod run_suite;

pub use assertion::AssertionEngine;
pub use error::{ApplicationError, ApplicationResult};
pub use execute_scenario::ExecuteScenario;
pub use ports::{HttpClient, HttpClientError};
pub use run_suite::RunSuite;
