#![cfg(feature = "document")]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use solaria::core::SolariaError;
use solaria::document::*;

const PREFIX: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?><MensajeHacienda><Respuesta>";

fn prefix() -> String {
    // Exactly RESPUESTA_XML_PAYLOAD_OFFSET bytes of vendor prefix.
    let mut p = PREFIX.to_string();
    p.truncate(RESPUESTA_XML_PAYLOAD_OFFSET);
    while p.len() < RESPUESTA_XML_PAYLOAD_OFFSET {
        p.push('_');
    }
    p
}

fn body_for(xml: &str) -> Value {
    json!({ "solaria": { "RespuestaXML": format!("{}{}", prefix(), STANDARD.encode(xml)) } })
}

fn invoice_xml(consecutivo: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <FacturaElectronica xmlns=\"https://cdn.comprobanteselectronicos.go.cr/xml-schemas/v4.4/facturaElectronica\">\
         <Clave>50601072400310112345600100001010000000042199999999</Clave>\
         <NumeroConsecutivo>{consecutivo}</NumeroConsecutivo>\
         <FechaEmision>2024-07-01T12:00:00-06:00</FechaEmision>\
         </FacturaElectronica>"
    )
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

#[test]
fn names_file_after_consecutive_number() {
    let doc = extract_document(&body_for("<NumeroConsecutivo>1234</NumeroConsecutivo>")).unwrap();
    assert_eq!(doc.consecutive_number, "1234");
    assert_eq!(doc.file_name(), "factura_1234.xml");
}

#[test]
fn full_invoice_document() {
    let xml = invoice_xml("00100001010000000042");
    let doc = extract_document(&body_for(&xml)).unwrap();
    assert_eq!(doc.xml_content, xml);
    assert_eq!(doc.file_name(), "factura_00100001010000000042.xml");

    let artifact = doc.artifact();
    assert_eq!(artifact.mime_type, "application/xml");
    assert_eq!(artifact.content, xml.as_bytes());
}

#[test]
fn falls_back_to_timestamp_name() {
    let before = chrono::Utc::now().timestamp_millis();
    let doc = extract_document(&body_for("<FacturaElectronica/>")).unwrap();
    let after = chrono::Utc::now().timestamp_millis();

    let stamp: i64 = doc.consecutive_number.parse().unwrap();
    assert!((before..=after).contains(&stamp));
    assert_eq!(doc.file_name(), format!("factura_{stamp}.xml"));
}

#[test]
fn non_xml_text_still_decodes() {
    let doc = extract_document(&body_for("plain text, no markup")).unwrap();
    assert_eq!(doc.xml_content, "plain text, no markup");
    assert!(doc.consecutive_number.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn first_consecutive_wins() {
    let xml = "<a><NumeroConsecutivo>1</NumeroConsecutivo><NumeroConsecutivo>2</NumeroConsecutivo></a>";
    assert_eq!(consecutive_number(xml).as_deref(), Some("1"));
}

#[test]
fn escaped_consecutive_is_unescaped_and_sanitized() {
    let doc = extract_document(&body_for("<NumeroConsecutivo>A&amp;B</NumeroConsecutivo>")).unwrap();
    assert_eq!(doc.consecutive_number, "A&B");
    assert_eq!(doc.file_name(), "factura_A_B.xml");
}

#[test]
fn consecutive_found_in_broken_markup() {
    for text in [
        "1 < 2 <NumeroConsecutivo>1234</NumeroConsecutivo>",
        "<<NumeroConsecutivo>1234</NumeroConsecutivo>",
        "<? broken <NumeroConsecutivo>1234</NumeroConsecutivo>",
        "<Factura><Clave>5<6</Clave><NumeroConsecutivo>1234</NumeroConsecutivo>",
    ] {
        assert_eq!(consecutive_number(text).as_deref(), Some("1234"), "{text}");
        let doc = extract_document(&body_for(text)).unwrap();
        assert_eq!(doc.file_name(), "factura_1234.xml");
    }
}

#[test]
fn consecutive_with_stray_angle_bracket_is_kept_verbatim() {
    let doc = extract_document(&body_for("<NumeroConsecutivo>12<34</NumeroConsecutivo>")).unwrap();
    assert_eq!(doc.consecutive_number, "12<34");
    assert_eq!(doc.file_name(), "factura_12_34.xml");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn missing_document() {
    for body in [
        json!({}),
        json!({ "solaria": null }),
        json!({ "solaria": {} }),
        json!({ "solaria": { "RespuestaXML": 42 } }),
        json!({ "solaria": { "RespuestaXML": "" } }),
        json!({ "message": "Factura generated successfully!" }),
    ] {
        assert!(
            matches!(extract_document(&body), Err(SolariaError::MissingDocument)),
            "{body} did not report a missing document"
        );
    }
}

#[test]
fn shorter_than_68_is_malformed() {
    for len in 1..=RESPUESTA_XML_PAYLOAD_OFFSET {
        let body = json!({ "solaria": { "RespuestaXML": "A".repeat(len) } });
        assert!(
            matches!(extract_document(&body), Err(SolariaError::MalformedDocument(_))),
            "length {len} not rejected"
        );
    }
}

#[test]
fn invalid_base64_is_decode_error() {
    let body = json!({ "solaria": { "RespuestaXML": format!("{}@@not-base64@@", prefix()) } });
    assert!(matches!(extract_document(&body), Err(SolariaError::Decode(_))));
}

#[test]
fn non_utf8_payload_is_decode_error() {
    let body = json!({
        "solaria": { "RespuestaXML": format!("{}{}", prefix(), STANDARD.encode([0xC3u8, 0x28])) }
    });
    assert!(matches!(extract_document(&body), Err(SolariaError::Decode(_))));
}

#[test]
fn error_display() {
    let err = payload_from_respuesta("short").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed RespuestaXML: expected at least 68 bytes, got 5"
    );
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

#[test]
fn saves_into_download_directory() {
    let dir = std::env::temp_dir().join(format!("solaria-doc-tests-{}", std::process::id()));
    let doc = extract_document(&body_for(&invoice_xml("777"))).unwrap();

    let saved = DirectorySink::new(&dir).save(&doc.artifact()).unwrap();
    assert_eq!(saved.file_name, "factura_777.xml");
    let on_disk = std::fs::read_to_string(saved.path.unwrap()).unwrap();
    assert_eq!(on_disk, doc.xml_content);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn memory_sink_collects() {
    let sink = MemorySink::new();
    let doc = extract_document(&body_for(&invoice_xml("9"))).unwrap();
    sink.save(&doc.artifact()).unwrap();
    assert_eq!(sink.artifacts()[0].file_name, "factura_9.xml");
}
