//! Upload intake subsystem.
//!
//! # Data Flow
//! ```text
//! multipart/form-data body
//!     → parser.rs (walk parts, apply field policy and size limit)
//!     → storage.rs (memory buffer or temporary file)
//!     → form.rs (IntakeForm: one UploadedFile + FormFields)
//!     → handler acknowledges, drops the form → temporary file deleted
//! ```

pub mod error;
pub mod form;
pub mod parser;
pub mod storage;

pub use error::{IntakeError, IntakeResult};
pub use form::{FormFields, IntakeForm, UploadedFile};
pub use parser::FormParser;
pub use storage::FileContents;
