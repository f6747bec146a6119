#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text as RespuestaXML must not panic.
    if let Ok(respuesta) = std::str::from_utf8(data) {
        let body = serde_json::json!({ "solaria": { "RespuestaXML": respuesta } });
        let _ = solaria::document::extract_document(&body);
    }
});
