//! Hubdoc Intake
//!
//! A minimal HTTP intake endpoint built with Tokio and Axum. It accepts one
//! multipart file upload (plus optional text fields such as `email`) and
//! acknowledges receipt with an empty `200`.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                ┌──────────────────────────────────────────────┐
//!     ─────────────────────▶│ http::server (request id, trace, limits)     │
//!                           │     │                                        │
//!                           │     ├── GET  /        → "Hello Hubdoc!"      │
//!                           │     └── POST /upload  → intake::parser       │
//!                           │                            │                 │
//!                           │                            ▼                 │
//!                           │                      intake::storage         │
//!                           │                  (memory | temp file)        │
//!     ◀─────────────────────│  200 (empty) / 4xx / 5xx ◀─┘ form dropped    │
//!                           └──────────────────────────────────────────────┘
//!        config · observability · lifecycle
//! ```

pub mod config;
pub mod http;
pub mod intake;
pub mod lifecycle;
pub mod observability;

pub use config::IntakeConfig;
pub use http::IntakeServer;
pub use lifecycle::Shutdown;
