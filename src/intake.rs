//! Contract text intake
//!
//! Holds the contract text and file name the next submission will carry, and
//! reads uploaded files into it. Files are decoded as (lossy) UTF-8 with no
//! format-aware extraction, so `.doc`/`.docx` uploads rarely read well.

use crate::error::Result;
use std::path::Path;
use tracing::{info, warn};

/// Extensions the upload picker offers; advisory only
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["txt", "doc", "docx"];

/// A file read for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub text: String,
}

/// Whether the file name carries one of the suggested extensions
pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Read a file's full contents as text
pub async fn read_as_text(path: &Path) -> Result<UploadedFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if !is_accepted(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        warn!(
            "{} ({}) is not one of .{}; reading it as text anyway",
            name,
            mime,
            ACCEPTED_EXTENSIONS.join(", .")
        );
    }

    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    info!("Loaded {} ({} bytes)", name, bytes.len());

    Ok(UploadedFile { name, text })
}

/// Contract text and file name the next submission will carry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractDraft {
    pub contract_text: String,
    pub file_name: Option<String>,
}

impl ContractDraft {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contract_text: text.into(),
            file_name: None,
        }
    }

    /// Replace the text typed in directly; the file name is kept
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.contract_text = text.into();
    }

    /// Replace both text and file name with an uploaded file
    pub fn apply_upload(&mut self, upload: UploadedFile) {
        self.contract_text = upload.text;
        self.file_name = Some(upload.name);
    }

    pub async fn load_file(&mut self, path: &Path) -> Result<()> {
        let upload = read_as_text(path).await?;
        self.apply_upload(upload);
        Ok(())
    }

    pub fn is_blank(&self) -> bool {
        self.contract_text.trim().is_empty()
    }
}
