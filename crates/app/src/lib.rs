//! Pokecheck - contract tests for the PokéAPI
//!
//! The scenario registry lives here so the binary and the integration
//! tests share one definition of the suite.

pub mod interrupt;
pub mod scenarios;

pub use interrupt::interrupted;
pub use scenarios::pokeapi_suite;
