//! PDF-backed page source using lopdf.
//!
//! Walks each page's content stream, tracking the text cursor through
//! BT/Td/TD/Tm/T* and collecting show-text operators as positioned
//! spans, which the grid builder turns into tables and text lines.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use crate::detect::pdf_version_from_path;
use crate::error::{Error, Result};
use crate::model::PageContent;

use super::grid::{GridBuilder, TextSpan};
use super::options::{ErrorMode, SourceOptions};
use super::PageSource;

/// Page identifier: (object number, generation number).
type PageId = (u32, u16);

/// Page source backed by a lopdf document.
///
/// The document is loaded into memory once; the handle is released when
/// the source is dropped, on every exit path.
pub struct PdfSource {
    doc: LopdfDocument,
    options: SourceOptions,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, SourceOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: SourceOptions) -> Result<Self> {
        let path = path.as_ref();

        // Fail with a clear error before lopdf sees a non-PDF file.
        pdf_version_from_path(path)?;

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc, options)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, SourceOptions::default())
    }

    /// Load a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: SourceOptions) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc, options)
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument, options: SourceOptions) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc, options })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn extract_page(&self, number: u32, page_id: PageId) -> Result<PageContent> {
        let content = self.page_content(page_id)?;
        let spans = self.content_spans(page_id, &content)?;
        let (tables, text_lines) = GridBuilder::new().build(spans);

        Ok(PageContent {
            number,
            tables,
            text_lines,
        })
    }

    /// Decompressed content stream bytes for a page.
    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Walk the decoded content stream and emit positioned text spans.
    fn content_spans(&self, page_id: PageId, content: &[u8]) -> Result<Vec<TextSpan>> {
        let content = lopdf::content::Content::decode(content)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();

        let mut spans = Vec::new();
        let mut font_name: Vec<u8> = Vec::new();
        let mut cursor = TextCursor::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    cursor = TextCursor::default();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let Some(Object::Name(name)) = op.operands.first() {
                        font_name = name.clone();
                    }
                }
                "TL" => {
                    if let Some(l) = op.operands.first().and_then(as_number) {
                        cursor.leading = l;
                    }
                }
                "Td" => {
                    if op.operands.len() >= 2 {
                        cursor.translate(
                            as_number(&op.operands[0]).unwrap_or(0.0),
                            as_number(&op.operands[1]).unwrap_or(0.0),
                        );
                    }
                }
                "TD" => {
                    if op.operands.len() >= 2 {
                        let ty = as_number(&op.operands[1]).unwrap_or(0.0);
                        cursor.leading = -ty;
                        cursor.translate(as_number(&op.operands[0]).unwrap_or(0.0), ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        cursor.set(
                            as_number(&op.operands[4]).unwrap_or(0.0),
                            as_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => cursor.next_line(),
                "Tj" | "'" => {
                    if op.operator == "'" {
                        cursor.next_line();
                    }
                    if in_text_block {
                        if let Some(Object::String(bytes, _)) = op.operands.first() {
                            let text = self.decode_text(&font_name, bytes, &fonts);
                            push_span(&mut spans, &cursor, text);
                        }
                    }
                }
                "TJ" => {
                    if in_text_block {
                        if let Some(Object::Array(arr)) = op.operands.first() {
                            let mut combined = String::new();
                            for item in arr {
                                match item {
                                    Object::String(bytes, _) => combined.push_str(
                                        &self.decode_text(&font_name, bytes, &fonts),
                                    ),
                                    // Large negative adjustments are word gaps.
                                    Object::Integer(n) if *n < -180 => {
                                        if !combined.ends_with(' ') {
                                            combined.push(' ');
                                        }
                                    }
                                    Object::Real(n) if *n < -180.0 => {
                                        if !combined.ends_with(' ') {
                                            combined.push(' ');
                                        }
                                    }
                                    _ => {}
                                }
                            }
                            push_span(&mut spans, &cursor, combined);
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Decode a show-text byte string using the font's encoding, falling
    /// back to simple decoding when the encoding is unavailable.
    fn decode_text(
        &self,
        font_name: &[u8],
        bytes: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        if let Some(font_dict) = fonts.get(font_name) {
            if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }
}

impl PageSource for PdfSource {
    fn pages(&self) -> Result<Vec<PageContent>> {
        let mut pages = Vec::new();

        for (number, page_id) in self.doc.get_pages() {
            match self.extract_page(number, page_id) {
                Ok(page) => pages.push(page),
                Err(e) => match self.options.error_mode {
                    ErrorMode::Lenient => {
                        log::warn!("page {}: {} (skipped)", number, e);
                        pages.push(PageContent::new(number));
                    }
                    ErrorMode::Strict => return Err(e),
                },
            }
        }

        Ok(pages)
    }
}

/// Text cursor through the page's text-positioning operators. Only the
/// line start position matters for grid reconstruction.
#[derive(Debug, Default)]
struct TextCursor {
    x: f32,
    y: f32,
    leading: f32,
}

impl TextCursor {
    fn translate(&mut self, tx: f32, ty: f32) {
        self.x += tx;
        self.y += ty;
    }

    fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn next_line(&mut self) {
        self.y -= self.leading;
    }
}

fn push_span(spans: &mut Vec<TextSpan>, cursor: &TextCursor, text: String) {
    if !text.trim().is_empty() {
        spans.push(TextSpan {
            x: cursor.x,
            y: cursor.y,
            text,
        });
    }
}

fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Simple text decoding fallback when no font encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter(|c| c.len() == 2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1 fallback
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
