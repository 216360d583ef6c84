#![allow(dead_code)]

pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use xmlpdf::{RenderError, Renderer};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

/// Render markup with the default renderer on the current tokio runtime.
pub async fn render_pdf(markup: &str) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    init_logging();
    let bytes = Renderer::default().render(markup).await?;
    GeneratedPdf::from_bytes(bytes)
}

pub async fn render_err(markup: &str) -> RenderError {
    init_logging();
    match Renderer::default().render(markup).await {
        Ok(bytes) => panic!("expected the render to fail, got {} bytes", bytes.len()),
        Err(e) => e,
    }
}
