//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

use hubdoc_intake::config::{IntakeConfig, StorageMode};
use hubdoc_intake::{IntakeServer, Shutdown};

/// PDF magic bytes.
#[allow(dead_code)]
pub const PDF_BYTES: [u8; 4] = [0x25, 0x50, 0x44, 0x46];

/// A running intake server bound to an ephemeral local port.
pub struct TestIntake {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub upload_dir: TempDir,
}

#[allow(dead_code)]
impl TestIntake {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Number of entries currently in the upload directory.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Poll the upload directory until it holds `expected` entries or
    /// `within` elapses. Returns the last count seen.
    pub async fn wait_for_stored_files(&self, expected: usize, within: Duration) -> usize {
        let deadline = tokio::time::Instant::now() + within;
        loop {
            let count = self.stored_files();
            if count == expected || tokio::time::Instant::now() >= deadline {
                return count;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for TestIntake {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Disk-backed config whose upload directory lives in a fresh temp dir.
pub fn test_config() -> (IntakeConfig, TempDir) {
    let upload_dir = TempDir::new().unwrap();
    let mut config = IntakeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upload.storage = StorageMode::Disk;
    config.upload.upload_dir = upload_dir.path().to_path_buf();
    (config, upload_dir)
}

/// Start an intake server with the default test config.
#[allow(dead_code)]
pub async fn spawn_intake() -> TestIntake {
    let (config, upload_dir) = test_config();
    spawn_intake_with(config, upload_dir).await
}

/// Start an intake server with a customised config.
pub async fn spawn_intake_with(config: IntakeConfig, upload_dir: TempDir) -> TestIntake {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = IntakeServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Let the accept loop start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestIntake {
        addr,
        shutdown,
        upload_dir,
    }
}

/// Client without connection pooling or proxy detection.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// A form carrying `bytes` under `file` and an `email` text field.
#[allow(dead_code)]
pub fn invoice_form(bytes: Vec<u8>, email: &str) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name("invoice.pdf")
        .mime_str("application/pdf")
        .unwrap();
    reqwest::multipart::Form::new()
        .part("file", part)
        .text("email", email.to_string())
}
