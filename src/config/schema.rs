//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the intake
//! service. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the intake service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct IntakeConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Multipart upload handling.
    pub upload: UploadConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum requests in flight at once (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_connections: 1024,
        }
    }
}

/// Where uploaded file bytes live while a request is being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Buffer the file in memory.
    Memory,
    /// Stream the file into a temporary file under `upload_dir`.
    #[default]
    Disk,
}

/// What to do with file parts that are not the expected upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtraFilePolicy {
    /// Fail the request with 400.
    #[default]
    Reject,
    /// Drain and discard the part.
    Ignore,
}

/// Upload handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Multipart field name the file must be sent under.
    pub file_field: String,

    /// Storage strategy for the file bytes.
    pub storage: StorageMode,

    /// Directory for temporary upload files (disk mode only).
    pub upload_dir: PathBuf,

    /// Maximum size of the uploaded file in bytes.
    pub max_file_size: u64,

    /// Maximum size of the whole request body in bytes.
    pub max_body_size: usize,

    /// Reject requests that carry no file part. Off by default: a form
    /// without a file is still acknowledged.
    pub require_file: bool,

    /// Policy for duplicate or unexpected file parts.
    pub extra_files: ExtraFilePolicy,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            file_field: "file".to_string(),
            storage: StorageMode::Disk,
            upload_dir: PathBuf::from("uploads"),
            max_file_size: 10 * 1024 * 1024, // 10MB
            max_body_size: 16 * 1024 * 1024, // 16MB
            require_file: false,
            extra_files: ExtraFilePolicy::Reject,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time to read the upload and respond) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
