//! Multipart body parsing into an [`IntakeForm`].
//!
//! # Rules
//! - A part is a file part iff it carries a filename
//! - The first file part under the configured field is kept
//! - Duplicate or differently-named file parts are rejected or drained,
//!   per [`ExtraFilePolicy`]
//! - Text parts land in [`FormFields`]; a repeated name replaces the
//!   earlier value
//! - The file size limit is enforced while streaming, before the whole
//!   part has been read

use axum::extract::multipart::{Field, Multipart};

use crate::config::{ExtraFilePolicy, UploadConfig};
use crate::intake::error::{IntakeError, IntakeResult};
use crate::intake::form::{FormFields, IntakeForm, UploadedFile};
use crate::intake::storage::FileSink;

/// Turns a multipart stream into a typed form according to [`UploadConfig`].
#[derive(Debug, Clone)]
pub struct FormParser {
    config: UploadConfig,
}

impl FormParser {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Consume the whole multipart body.
    ///
    /// On error every file stored so far is dropped, which removes any
    /// temporary file from disk.
    pub async fn parse(&self, mut multipart: Multipart) -> IntakeResult<IntakeForm> {
        let mut file: Option<UploadedFile> = None;
        let mut fields = FormFields::new();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_none() {
                let value = field.text().await?;
                if fields.insert(name.as_str(), value).is_some() {
                    tracing::debug!(field = %name, "Repeated text field, keeping last value");
                }
                continue;
            }

            if name != self.config.file_field {
                self.extra_file(field, IntakeError::UnexpectedFile(name)).await?;
                continue;
            }

            if file.is_some() {
                self.extra_file(field, IntakeError::DuplicateFile(name)).await?;
                continue;
            }

            file = Some(self.store(field).await?);
        }

        if file.is_none() && self.config.require_file {
            return Err(IntakeError::MissingFile(self.config.file_field.clone()));
        }

        Ok(IntakeForm { file, fields })
    }

    async fn extra_file(&self, field: Field<'_>, err: IntakeError) -> IntakeResult<()> {
        match self.config.extra_files {
            ExtraFilePolicy::Reject => Err(err),
            ExtraFilePolicy::Ignore => {
                tracing::debug!(reason = %err, "Discarding file part");
                drain(field).await
            }
        }
    }

    async fn store(&self, mut field: Field<'_>) -> IntakeResult<UploadedFile> {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);

        let limit = self.config.max_file_size;
        let mut sink = FileSink::open(self.config.storage, &self.config.upload_dir).await?;
        let mut size: u64 = 0;

        while let Some(chunk) = field.chunk().await? {
            size += chunk.len() as u64;
            if size > limit {
                return Err(IntakeError::FileTooLarge { limit });
            }
            sink.write(&chunk).await?;
        }

        let contents = sink.finish().await?;
        Ok(UploadedFile {
            field_name,
            file_name,
            content_type,
            size,
            contents,
        })
    }
}

async fn drain(mut field: Field<'_>) -> IntakeResult<()> {
    while field.chunk().await?.is_some() {}
    Ok(())
}
