//! PDF document session backed by lopdf.
//!
//! [`LopdfSession`] keeps one lopdf content stream per page while the
//! interpreter runs. Finalizing moves the pages to a blocking worker that
//! serializes them with [`StreamingPdfWriter`] straight into the output sink.

mod fonts;
mod layout;
mod page;
mod session;
mod writer;

pub use fonts::{ASCENT_FACTOR, FontMetrics, LINE_HEIGHT_FACTOR};
pub use layout::{Line, wrap_text};
pub use session::{LopdfSession, LopdfSessionFactory};
pub use writer::StreamingPdfWriter;
