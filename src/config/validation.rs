//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0, addresses parse)
//! - Check that the per-file limit fits inside the body limit
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: IntakeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{IntakeConfig, StorageMode};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address `{value}`")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("upload.file_field must not be empty")]
    EmptyFileField,

    #[error("upload.max_file_size ({file}) exceeds upload.max_body_size ({body})")]
    FileLimitExceedsBody { file: u64, body: usize },

    #[error("upload.upload_dir must be set when storage is `disk`")]
    MissingUploadDir,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &IntakeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::Zero("listener.max_connections"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    let upload = &config.upload;
    if upload.file_field.trim().is_empty() {
        errors.push(ValidationError::EmptyFileField);
    }
    if upload.max_file_size == 0 {
        errors.push(ValidationError::Zero("upload.max_file_size"));
    }
    if upload.max_body_size == 0 {
        errors.push(ValidationError::Zero("upload.max_body_size"));
    } else if upload.max_file_size > upload.max_body_size as u64 {
        errors.push(ValidationError::FileLimitExceedsBody {
            file: upload.max_file_size,
            body: upload.max_body_size,
        });
    }
    if upload.storage == StorageMode::Disk && upload.upload_dir.as_os_str().is_empty() {
        errors.push(ValidationError::MissingUploadDir);
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
