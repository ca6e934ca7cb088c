//! Typed view of a parsed upload request.
//!
//! Everything here lives only as long as the request that produced it.
//! Dropping an [`IntakeForm`] releases the file bytes and deletes any
//! temporary file backing them.

use std::collections::BTreeMap;

use crate::intake::storage::FileContents;

/// The single file accepted from an upload request.
#[derive(Debug)]
pub struct UploadedFile {
    /// Multipart field name the file arrived under.
    pub field_name: String,
    /// Client-supplied filename. Untrusted.
    pub file_name: Option<String>,
    /// Client-declared MIME type. Untrusted.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// Where the bytes are held.
    pub contents: FileContents,
}

/// Text fields sent alongside the file, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. A repeated name replaces the earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// A fully parsed upload request.
#[derive(Debug, Default)]
pub struct IntakeForm {
    pub file: Option<UploadedFile>,
    pub fields: FormFields,
}

impl IntakeForm {
    /// Size of the accepted file, or zero when none was sent.
    pub fn file_size(&self) -> u64 {
        self.file.as_ref().map_or(0, |f| f.size)
    }
}
