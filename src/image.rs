//! Packaging of uploaded images into inline model input.
//!
//! The model API takes image bytes inline, tagged with their MIME type, rather than a path
//! or URL. Bytes are passed through untouched: no decoding, resizing or re-encoding.

use crate::error::{ChemistError, Result};
use crate::llm::models::ImagePart;
use std::path::Path;

/// File extensions the upload control accepts
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

const OCTET_STREAM: &str = "application/octet-stream";

/// A file as received from the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The declared content type, kept as sent. Only when the browser sent no type is it
    /// guessed from the file extension.
    pub fn mime_type(&self) -> String {
        match self.content_type.as_deref() {
            Some(declared) if !declared.is_empty() => declared.to_string(),
            _ => mime_guess::from_path(&self.file_name)
                .first_raw()
                .unwrap_or(OCTET_STREAM)
                .to_string(),
        }
    }
}

/// True when the file name ends in one of [`ACCEPTED_EXTENSIONS`], ignoring case
pub fn is_accepted_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.iter().any(|ok| ext.eq_ignore_ascii_case(ok)))
        .unwrap_or(false)
}

/// Value for the `accept` attribute of the file input
pub fn accept_attribute() -> String {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

/// Reject uploads whose name does not carry an accepted extension
pub fn ensure_accepted(upload: &UploadedFile) -> Result<()> {
    if is_accepted_extension(&upload.file_name) {
        Ok(())
    } else {
        Err(ChemistError::UnsupportedImageType(format!(
            "{} (expected one of: {})",
            upload.file_name,
            ACCEPTED_EXTENSIONS.join(", ")
        )))
    }
}

/// Package an upload as a single-element list of inline image records.
///
/// Fails with [`ChemistError::NoFileUploaded`] when there is no upload or it is empty.
pub fn input_image_setup(upload: Option<UploadedFile>) -> Result<Vec<ImagePart>> {
    match upload {
        Some(file) if !file.is_empty() => {
            let mime_type = file.mime_type();
            Ok(vec![ImagePart::new(mime_type, file.bytes)])
        }
        _ => Err(ChemistError::NoFileUploaded),
    }
}
