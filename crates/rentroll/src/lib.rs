//! Property portfolio records, validation and the dashboard metrics aggregator.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod portfolio;
pub mod telemetry;
