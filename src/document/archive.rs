//! Zip bundling of a customer's stored facturas.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::sink::DocumentArtifact;
use crate::core::SolariaError;

/// MIME type of factura bundles.
pub const ZIP_MIME_TYPE: &str = "application/zip";
/// File name of the bundle offered to the user.
pub const FACTURAS_ARCHIVE_NAME: &str = "facturas.zip";
/// Folder inside the bundle holding the files.
pub const FACTURAS_ARCHIVE_FOLDER: &str = "facturas";

/// Pack `files` into `facturas.zip`, each under `facturas/{file_name}`.
///
/// When two files share a name the later one replaces the earlier, keeping
/// the position of the first. An empty slice gives an archive holding only
/// the empty folder.
pub fn bundle_facturas(files: &[DocumentArtifact]) -> Result<DocumentArtifact, SolariaError> {
    let mut entries: Vec<&DocumentArtifact> = Vec::with_capacity(files.len());
    for file in files {
        match entries.iter_mut().find(|e| e.file_name == file.file_name) {
            Some(slot) => *slot = file,
            None => entries.push(file),
        }
    }

    let opts = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .add_directory(format!("{FACTURAS_ARCHIVE_FOLDER}/"), opts)
        .map_err(|e| archive_failed(&e))?;

    for entry in &entries {
        writer
            .start_file(format!("{FACTURAS_ARCHIVE_FOLDER}/{}", entry.file_name), opts)
            .map_err(|e| archive_failed(&e))?;
        writer
            .write_all(&entry.content)
            .map_err(|e| archive_failed(&e))?;
    }

    let content = writer
        .finish()
        .map_err(|e| archive_failed(&e))?
        .into_inner();

    tracing::debug!(files = entries.len(), bytes = content.len(), "bundled facturas");

    Ok(DocumentArtifact {
        file_name: FACTURAS_ARCHIVE_NAME.to_string(),
        mime_type: ZIP_MIME_TYPE.to_string(),
        content,
    })
}

fn archive_failed(e: &dyn std::fmt::Display) -> SolariaError {
    SolariaError::Save(format!("failed to build {FACTURAS_ARCHIVE_NAME}: {e}"))
}
