use lopdf::Document as LopdfDocument;
use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

fn resolve_dict<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Dictionary> {
    match object {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        other => other.as_dict().ok(),
    }
}

/// BaseFont names referenced from a page's resources.
pub fn page_font_names(doc: &LopdfDocument, page_id: ObjectId) -> Vec<String> {
    let mut names = Vec::new();
    let fonts = doc
        .get_dictionary(page_id)
        .ok()
        .and_then(|page| page.get(b"Resources").ok())
        .and_then(|resources| resolve_dict(doc, resources))
        .and_then(|resources| resources.get(b"Font").ok())
        .and_then(|fonts| resolve_dict(doc, fonts));
    if let Some(fonts) = fonts {
        for (_, font) in fonts.iter() {
            if let Some(base) = resolve_dict(doc, font).and_then(|f| f.get(b"BaseFont").ok()) {
                if let Ok(name) = base.as_name() {
                    names.push(String::from_utf8_lossy(name).to_string());
                }
            }
        }
    }
    names
}

/// Content stream operations of the 1-based `page_num`.
pub fn page_operations(doc: &LopdfDocument, page_num: u32) -> Vec<lopdf::content::Operation> {
    let Some(page_id) = doc.get_pages().get(&page_num).copied() else {
        return Vec::new();
    };
    doc.get_page_content(page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// Strings shown with `Tj` on the 1-based `page_num`, in stream order.
pub fn shown_text(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    page_operations(doc, page_num)
        .into_iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(bytes.iter().map(|&b| b as char).collect()),
            _ => None,
        })
        .collect()
}

/// Value of the document information dictionary entry `key`.
pub fn info_entry(doc: &LopdfDocument, key: &[u8]) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?;
    let info = resolve_dict(doc, info)?;
    let value = info.get(key).ok()?.as_str().ok()?;
    Some(value.iter().map(|&b| b as char).collect())
}

// ============================================================================
// Fluent Assertion Macros
// ============================================================================

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, found {}",
            $count,
            $pdf.page_count()
        );
    };
}
