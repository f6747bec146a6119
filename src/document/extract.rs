use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::Value;

use super::sink::{DocumentArtifact, XML_MIME_TYPE};
use crate::core::SolariaError;

/// Byte offset in `RespuestaXML` where the base64 document starts.
///
/// Fixed by the Solaria API; everything before it is a vendor prefix.
pub const RESPUESTA_XML_PAYLOAD_OFFSET: usize = 67;

/// Element holding the sequential invoice number.
const CONSECUTIVE_TAG: &[u8] = b"NumeroConsecutivo";
const CONSECUTIVE_OPEN: &str = "<NumeroConsecutivo>";
const CONSECUTIVE_CLOSE: &str = "</NumeroConsecutivo>";

/// Standard alphabet; padding and trailing bits are tolerated.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// The signed invoice XML returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInvoiceDocument {
    /// `NumeroConsecutivo`, or a millisecond timestamp when the tag is absent.
    pub consecutive_number: String,
    /// Decoded XML text.
    pub xml_content: String,
}

impl DecodedInvoiceDocument {
    /// Download file name, `factura_{consecutivo}.xml`.
    ///
    /// Characters other than ASCII letters, digits, `.`, `_` and `-` are
    /// replaced by `_` so the name is always a single path component.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .consecutive_number
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("factura_{stem}.xml")
    }

    /// Package the document as a downloadable `application/xml` file.
    pub fn artifact(&self) -> DocumentArtifact {
        DocumentArtifact {
            file_name: self.file_name(),
            mime_type: XML_MIME_TYPE.to_string(),
            content: self.xml_content.clone().into_bytes(),
        }
    }
}

/// Extract the invoice XML embedded in a `send-factura` response body.
///
/// Expects `{ "solaria": { "RespuestaXML": "<prefix><base64>" } }`.
///
/// # Errors
///
/// `MissingDocument` if the field is absent, not a string, or empty;
/// `MalformedDocument` if it is shorter than the payload offset allows;
/// `Decode` if the payload is not base64-encoded UTF-8.
pub fn extract_document(body: &Value) -> Result<DecodedInvoiceDocument, SolariaError> {
    let respuesta = respuesta_xml(body)?;
    let payload = payload_from_respuesta(respuesta)?;
    let xml_content = decode_payload(payload)?;

    let consecutive_number = consecutive_number(&xml_content).unwrap_or_else(|| {
        tracing::warn!("NumeroConsecutivo not found in document, naming it by timestamp");
        timestamp_stem()
    });

    tracing::debug!(
        consecutive = %consecutive_number,
        bytes = xml_content.len(),
        "extracted invoice document"
    );

    Ok(DecodedInvoiceDocument {
        consecutive_number,
        xml_content,
    })
}

/// Locate `solaria.RespuestaXML` in the response body.
pub fn respuesta_xml(body: &Value) -> Result<&str, SolariaError> {
    body.get("solaria")
        .and_then(|s| s.get("RespuestaXML"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(SolariaError::MissingDocument)
}

/// Split the base64 payload off a `RespuestaXML` value.
///
/// The value must be at least `RESPUESTA_XML_PAYLOAD_OFFSET + 1` bytes and
/// the offset must fall on a character boundary.
pub fn payload_from_respuesta(respuesta: &str) -> Result<&str, SolariaError> {
    let min_len = RESPUESTA_XML_PAYLOAD_OFFSET + 1;
    if respuesta.len() < min_len {
        return Err(SolariaError::MalformedDocument(format!(
            "expected at least {min_len} bytes, got {}",
            respuesta.len()
        )));
    }
    respuesta.get(RESPUESTA_XML_PAYLOAD_OFFSET..).ok_or_else(|| {
        SolariaError::MalformedDocument(format!(
            "offset {RESPUESTA_XML_PAYLOAD_OFFSET} is not on a character boundary"
        ))
    })
}

/// Decode a base64 payload into UTF-8 text. ASCII whitespace is ignored.
pub fn decode_payload(payload: &str) -> Result<String, SolariaError> {
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = PAYLOAD_ENGINE
        .decode(&compact)
        .map_err(|e| SolariaError::Decode(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| SolariaError::Decode(format!("document is not UTF-8: {e}")))
}

/// Text of the first non-empty `<NumeroConsecutivo>` element, if any.
///
/// Well-formed documents are read with an XML parser, so namespace prefixes,
/// entities and CDATA are handled. When the parser finds nothing (broken
/// markup, or plain text around the tag) the raw text is scanned for the
/// literal tag pair instead.
pub fn consecutive_number(xml: &str) -> Option<String> {
    parsed_consecutive_number(xml).or_else(|| scanned_consecutive_number(xml))
}

/// Parser pass. Stops at the first syntax error.
fn parsed_consecutive_number(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = false;

    let mut inside = false;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == CONSECUTIVE_TAG => {
                inside = true;
                text.clear();
            }
            Ok(Event::Text(ref e)) if inside => match e.unescape() {
                Ok(t) => text.push_str(&t),
                Err(_) => text.push_str(&String::from_utf8_lossy(e)),
            },
            Ok(Event::CData(ref e)) if inside => text.push_str(&String::from_utf8_lossy(e)),
            Ok(Event::End(ref e)) if inside && e.local_name().as_ref() == CONSECUTIVE_TAG => {
                let value = text.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
                inside = false;
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

/// Text pass: the shortest `<NumeroConsecutivo>…</NumeroConsecutivo>` span
/// on a single line, taken verbatim apart from trimming.
fn scanned_consecutive_number(xml: &str) -> Option<String> {
    let mut rest = xml;
    while let Some(start) = rest.find(CONSECUTIVE_OPEN) {
        rest = &rest[start + CONSECUTIVE_OPEN.len()..];
        let Some(end) = rest.find(CONSECUTIVE_CLOSE) else {
            return None;
        };
        let value = &rest[..end];
        if !value.contains(['\n', '\r']) && !value.trim().is_empty() {
            return Some(value.trim().to_string());
        }
    }
    None
}

fn timestamp_stem() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respuesta_for(xml: &str) -> String {
        format!(
            "{}{}",
            "x".repeat(RESPUESTA_XML_PAYLOAD_OFFSET),
            base64::engine::general_purpose::STANDARD.encode(xml)
        )
    }

    #[test]
    fn extracts_consecutive_number() {
        let xml = "<FacturaElectronica><NumeroConsecutivo>00100001010000000042</NumeroConsecutivo></FacturaElectronica>";
        let body = serde_json::json!({ "solaria": { "RespuestaXML": respuesta_for(xml) } });
        let doc = extract_document(&body).unwrap();
        assert_eq!(doc.consecutive_number, "00100001010000000042");
        assert_eq!(doc.xml_content, xml);
        assert_eq!(doc.file_name(), "factura_00100001010000000042.xml");
    }

    #[test]
    fn offset_exactly_at_minimum() {
        let respuesta = "p".repeat(RESPUESTA_XML_PAYLOAD_OFFSET + 1);
        assert_eq!(payload_from_respuesta(&respuesta).unwrap(), "p");
        let short = "p".repeat(RESPUESTA_XML_PAYLOAD_OFFSET);
        assert!(matches!(
            payload_from_respuesta(&short),
            Err(SolariaError::MalformedDocument(_))
        ));
    }

    #[test]
    fn offset_inside_multibyte_char() {
        // 66 ASCII bytes then a 2-byte 'ñ' spanning offsets 66..68.
        let respuesta = format!("{}ñAAAA", "x".repeat(66));
        assert!(matches!(
            payload_from_respuesta(&respuesta),
            Err(SolariaError::MalformedDocument(_))
        ));
    }

    #[test]
    fn unpadded_and_wrapped_base64() {
        // "<a/>" is "PGEvPg==" in padded form.
        assert_eq!(decode_payload("PGEvPg").unwrap(), "<a/>");
        assert_eq!(decode_payload("PGEv\r\nPg==").unwrap(), "<a/>");
    }

    #[test]
    fn invalid_base64_and_utf8() {
        assert!(matches!(decode_payload("not base64!"), Err(SolariaError::Decode(_))));
        // 0xff 0xfe is not valid UTF-8.
        assert!(matches!(decode_payload("//4="), Err(SolariaError::Decode(_))));
    }

    #[test]
    fn consecutive_with_namespace_prefix_and_whitespace() {
        let xml = "<fe:Doc><fe:NumeroConsecutivo>\n  77 \n</fe:NumeroConsecutivo></fe:Doc>";
        assert_eq!(consecutive_number(xml).as_deref(), Some("77"));
    }

    #[test]
    fn empty_consecutive_is_skipped() {
        let xml = "<a><NumeroConsecutivo></NumeroConsecutivo><NumeroConsecutivo>9</NumeroConsecutivo></a>";
        assert_eq!(consecutive_number(xml).as_deref(), Some("9"));
        assert_eq!(consecutive_number("<a><NumeroConsecutivo/></a>"), None);
    }

    #[test]
    fn text_scan_ignores_spans_across_lines() {
        let text = "x <NumeroConsecutivo>1\n2</NumeroConsecutivo> < <NumeroConsecutivo>3</NumeroConsecutivo>";
        assert_eq!(scanned_consecutive_number(text).as_deref(), Some("3"));
        assert_eq!(scanned_consecutive_number("<NumeroConsecutivo>4"), None);
    }

    #[test]
    fn file_name_is_single_component() {
        let doc = DecodedInvoiceDocument {
            consecutive_number: "../../etc/passwd".into(),
            xml_content: String::new(),
        };
        assert_eq!(doc.file_name(), "factura_.._.._etc_passwd.xml");
        assert!(!doc.file_name().contains('/'));
    }
}
