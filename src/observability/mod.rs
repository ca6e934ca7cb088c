//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - The subscriber is installed once, at process start, by the binary
//! - Request ID flows through every span
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
