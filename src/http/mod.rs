//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID, open tracing span)
//!     → handlers.rs (GET / greeting, POST /upload intake)
//!     → intake parser (multipart → IntakeForm)
//!     → empty 200, or error status from IntakeError
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use handlers::GREETING;
pub use request::X_REQUEST_ID;
pub use server::{AppState, IntakeServer};
