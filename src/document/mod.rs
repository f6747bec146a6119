//! Extraction of the signed invoice XML from API responses.
//!
//! The `send-factura` endpoint answers with `solaria.RespuestaXML`: a
//! vendor prefix of fixed length followed by the base64-encoded document.
//! This module splits, decodes and names that document, and hands it to a
//! [`DocumentSink`]. Stored facturas of a customer are bundled into a
//! single `facturas.zip` with [`bundle_facturas`].
//!
//! # Example
//!
//! ```ignore
//! use solaria::document::*;
//!
//! let doc = extract_document(&response_body)?;
//! let saved = DirectorySink::new("downloads").save(&doc.artifact())?;
//! println!("saved {}", saved.file_name);
//! ```

mod archive;
mod extract;
mod sink;

pub use archive::{FACTURAS_ARCHIVE_FOLDER, FACTURAS_ARCHIVE_NAME, ZIP_MIME_TYPE, bundle_facturas};
pub use extract::{
    DecodedInvoiceDocument, RESPUESTA_XML_PAYLOAD_OFFSET, consecutive_number, decode_payload,
    extract_document, payload_from_respuesta, respuesta_xml,
};
pub use sink::{
    DirectorySink, DocumentArtifact, DocumentSink, MemorySink, PDF_MIME_TYPE, SavedDocument,
    XML_MIME_TYPE,
};
