use crate::error::InterpretError;
use crate::registry::{TagData, TagHandler};
use xmlpdf_render_core::DocumentSession;

/// `<page/>`: starts a new page. Attributes and text are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageHandler;

impl TagHandler for PageHandler {
    fn handle(&self, session: &mut dyn DocumentSession, _tag: &TagData<'_>) -> Result<(), InterpretError> {
        session.add_page()?;
        Ok(())
    }
}
