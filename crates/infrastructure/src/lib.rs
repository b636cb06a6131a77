//! Pokecheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the process-level concerns
//! of the binary: settings, tracing and the text report.

pub mod adapters;
pub mod config;
pub mod report;
pub mod telemetry;

pub use adapters::ReqwestHttpClient;
pub use config::{Settings, SettingsError};
pub use report::TextReporter;
pub use telemetry::init_tracing;
