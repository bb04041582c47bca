// src/core/pdf.rs
//! PDF bytes → plain text, page by page.
//!
//! Receipts are small generated PDFs; nothing here depends on layout. The
//! field extractor only needs the text in page order, with a break wherever
//! the content stream moves to a new line.
use std::collections::BTreeMap;

use lopdf::{Document, Encoding, Object, ObjectId, content::Content};

use crate::core::sanitize::newlines_to_spaces;
use crate::error::{ReceiptError, Result};

/// Best-effort text extraction. One string per page, in page order.
pub trait PdfText {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

/// `lopdf`-backed extraction.
#[derive(Clone, Copy, Debug, Default)]
pub struct LopdfText;

impl PdfText for LopdfText {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| ReceiptError::Pdf(e.to_string()))?;

        let mut pages = Vec::new();
        for (page_num, page_id) in doc.get_pages() {
            match page_text(&doc, page_id) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    // one unreadable page should not cost the others
                    loge!("PDF: page {page_num} has no extractable text: {e}");
                    pages.push(String::new());
                }
            }
        }
        Ok(pages)
    }
}

/// Operators that move the text cursor to a new line or a new position.
const LINE_OPS: &[&str] = &["BT", "ET", "Td", "TD", "T*", "Tm"];

fn page_text(doc: &Document, page_id: ObjectId) -> lopdf::Result<String> {
    let encodings: BTreeMap<Vec<u8>, Encoding> = doc
        .get_page_fonts(page_id)?
        .into_iter()
        .filter_map(|(name, font)| match font.get_font_encoding(doc) {
            Ok(enc) => Some((name, enc)),
            Err(e) => {
                logd!("PDF: font {} has no usable encoding: {e}", String::from_utf8_lossy(&name));
                None
            }
        })
        .collect();

    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut text = String::new();
    let mut encoding: Option<&Encoding> = None;
    for op in &content.operations {
        match op.operator.as_str() {
            "Tf" => {
                encoding = op.operands.first()
                    .and_then(|o| o.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "Tj" | "TJ" => show(&mut text, encoding, &op.operands),
            // move to next line, then show the last operand
            "'" | "\"" => {
                line_break(&mut text);
                if let Some(last) = op.operands.last() {
                    show(&mut text, encoding, std::slice::from_ref(last));
                }
            }
            other if LINE_OPS.contains(&other) => line_break(&mut text),
            _ => {}
        }
    }
    Ok(text)
}

fn line_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push('\n');
    }
}

fn show(text: &mut String, encoding: Option<&Encoding>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&decode(encoding, bytes)),
            Object::Array(items) => show(text, encoding, items),
            // wide negative kerning inside TJ is a word gap
            Object::Integer(i) if *i < -100 => text.push(' '),
            Object::Real(r) if *r < -100.0 => text.push(' '),
            _ => {}
        }
    }
}

fn decode(encoding: Option<&Encoding>, bytes: &[u8]) -> String {
    encoding
        .and_then(|enc| Document::decode_text(enc, bytes).ok())
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned())
}

/// Join pages into the single line the extractor searches.
pub fn receipt_text(pages: &[String]) -> String {
    pages.iter().map(|p| newlines_to_spaces(p)).collect()
}
