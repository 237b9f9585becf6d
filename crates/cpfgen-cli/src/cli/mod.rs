//! CLI wiring: configuration, diagnostics, and the generation pipeline.
//!
//! ## Structure
//!
//! - [`config`] - clap argument surface and validated run configuration.
//! - [`pipeline`] - producer / worker pool / sink tasks and the run
//!   coordinator.
//! - [`telemetry`] - stderr tracing subscriber setup.

pub mod config;
pub mod pipeline;
pub mod telemetry;
