//! Request-scoped storage for uploaded file bytes.
//!
//! # Responsibilities
//! - Hold the file in memory or stream it into a temporary file
//! - Own the temporary file so it is deleted with the request
//!
//! # Design Decisions
//! - Disk files are created with `tempfile` inside the upload directory,
//!   so concurrent requests never share a path
//! - The `TempPath` is the only owner; dropping it removes the file, both
//!   after a successful handler and on any failure midway through parsing

use axum::body::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::StorageMode;

/// Where a received file's bytes are held.
#[derive(Debug)]
pub enum FileContents {
    /// Buffered in memory.
    Memory(Bytes),
    /// Written to a temporary file, deleted on drop.
    Disk(TempPath),
}

impl FileContents {
    /// Path of the temporary file, when stored on disk.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FileContents::Disk(path) => Some(&**path),
            FileContents::Memory(_) => None,
        }
    }

    /// The buffered bytes, when stored in memory.
    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            FileContents::Memory(bytes) => Some(bytes),
            FileContents::Disk(_) => None,
        }
    }
}

/// Destination a file part is streamed into while it is being read.
pub(crate) enum FileSink {
    Memory(Vec<u8>),
    Disk { file: File, path: TempPath },
}

impl FileSink {
    /// Open a sink for one file part.
    pub(crate) async fn open(mode: StorageMode, upload_dir: &Path) -> io::Result<Self> {
        match mode {
            StorageMode::Memory => Ok(FileSink::Memory(Vec::new())),
            StorageMode::Disk => {
                let dir: PathBuf = upload_dir.to_path_buf();
                let named = tokio::task::spawn_blocking(move || {
                    tempfile::Builder::new().prefix("upload-").tempfile_in(dir)
                })
                .await
                .map_err(io::Error::other)??;

                let (file, path) = named.into_parts();
                tracing::trace!(path = %path.display(), "Temporary upload file created");
                Ok(FileSink::Disk {
                    file: File::from_std(file),
                    path,
                })
            }
        }
    }

    pub(crate) async fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        match self {
            FileSink::Memory(buf) => {
                buf.extend_from_slice(chunk);
                Ok(())
            }
            FileSink::Disk { file, .. } => file.write_all(chunk).await,
        }
    }

    /// Flush pending writes and hand over ownership of the stored bytes.
    pub(crate) async fn finish(self) -> io::Result<FileContents> {
        match self {
            FileSink::Memory(buf) => Ok(FileContents::Memory(Bytes::from(buf))),
            FileSink::Disk { mut file, path } => {
                file.flush().await?;
                Ok(FileContents::Disk(path))
            }
        }
    }
}
