use std::io::Read;

use solaria::document::*;

/// Reads a send-factura JSON response from stdin and writes the invoice XML
/// into `./downloads`.
fn main() {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("failed to read stdin");
    let body: serde_json::Value = serde_json::from_str(&input).expect("stdin is not JSON");

    match extract_document(&body) {
        Ok(doc) => {
            println!("NumeroConsecutivo: {}", doc.consecutive_number);
            println!("XML size: {} bytes", doc.xml_content.len());

            let saved = DirectorySink::new("downloads")
                .save(&doc.artifact())
                .expect("failed to save document");
            println!("saved as {}", saved.file_name);
        }
        Err(e) => {
            eprintln!("no document: {e}");
            std::process::exit(1);
        }
    }
}
