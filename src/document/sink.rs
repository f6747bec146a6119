//! Host save-file mechanisms for downloaded documents.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::core::SolariaError;

/// MIME type of extracted invoice XML.
pub const XML_MIME_TYPE: &str = "application/xml";
/// MIME type of stored factura PDFs.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A file ready to be offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl DocumentArtifact {
    /// Build an artifact, guessing the MIME type from the file extension.
    pub fn from_bytes(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let lower = file_name.to_lowercase();
        let mime_type = if lower.ends_with(".xml") {
            XML_MIME_TYPE
        } else if lower.ends_with(".pdf") {
            PDF_MIME_TYPE
        } else {
            "application/octet-stream"
        };
        Self {
            file_name,
            mime_type: mime_type.to_string(),
            content,
        }
    }
}

/// Where a sink put an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub file_name: String,
    /// Filesystem location, for sinks that write to disk.
    pub path: Option<PathBuf>,
}

/// The host's "save file" mechanism.
pub trait DocumentSink {
    /// Hand `artifact` to the user. Called once per document.
    fn save(&self, artifact: &DocumentArtifact) -> Result<SavedDocument, SolariaError>;
}

impl<S: DocumentSink + ?Sized> DocumentSink for &S {
    fn save(&self, artifact: &DocumentArtifact) -> Result<SavedDocument, SolariaError> {
        (**self).save(artifact)
    }
}

/// Writes artifacts into a download directory, creating it if needed.
///
/// An existing file with the same name is overwritten.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    fn save(&self, artifact: &DocumentArtifact) -> Result<SavedDocument, SolariaError> {
        let name = Path::new(&artifact.file_name);
        if name.components().count() != 1 || name.file_name().is_none() {
            return Err(SolariaError::Save(format!(
                "'{}' is not a plain file name",
                artifact.file_name
            )));
        }

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| SolariaError::Save(format!("{}: {e}", self.dir.display())))?;
        let path = self.dir.join(name);
        std::fs::write(&path, &artifact.content)
            .map_err(|e| SolariaError::Save(format!("{}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), bytes = artifact.content.len(), "saved document");

        Ok(SavedDocument {
            file_name: artifact.file_name.clone(),
            path: Some(path),
        })
    }
}

/// Keeps artifacts in memory, in save order.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<Vec<DocumentArtifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything saved so far.
    pub fn artifacts(&self) -> Vec<DocumentArtifact> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DocumentSink for MemorySink {
    fn save(&self, artifact: &DocumentArtifact) -> Result<SavedDocument, SolariaError> {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(artifact.clone());
        Ok(SavedDocument {
            file_name: artifact.file_name.clone(),
            path: None,
        })
    }
}
