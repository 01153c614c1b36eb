//! Document upload payload and acknowledgement.

use std::path::Path;

/// A document selected for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name as shown to the user and sent in the multipart part.
    pub name: String,
    pub bytes: Vec<u8>,
    /// Content type; `None` lets the gateway pick a default.
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Lower-cased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

/// Server acknowledgement of an upload.
///
/// Only the HTTP status decides success; the body fields are informational
/// and filled best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAck {
    pub filename: String,
    pub total_chunks: Option<u64>,
    pub status: Option<String>,
}

impl UploadAck {
    pub fn for_file(file: &UploadFile) -> Self {
        Self {
            filename: file.name.clone(),
            total_chunks: None,
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        let file = UploadFile::new("Report.PDF", vec![1, 2, 3]);
        assert_eq!(file.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn test_extension_missing() {
        let file = UploadFile::new("README", Vec::new());
        assert_eq!(file.extension(), None);
    }
}
