use crate::attributes::optional_positive;
use crate::error::InterpretError;
use crate::registry::{TagData, TagHandler};
use xmlpdf_render_core::DocumentSession;
use xmlpdf_types::{TextAlign, TextOptions};

/// `<text>`: applies the optional `font`, `fontSize` and `color` attributes
/// to the session, then draws the text payload with the optional `width` and
/// `align` options.
///
/// Numeric attributes are coerced before anything touches the session, so a
/// bad value leaves the session untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextHandler;

impl TagHandler for TextHandler {
    fn handle(&self, session: &mut dyn DocumentSession, tag: &TagData<'_>) -> Result<(), InterpretError> {
        let font_size = optional_positive(tag, "fontSize")?;
        let options = TextOptions {
            width: optional_positive(tag, "width")?,
            align: tag.attribute("align").map(TextAlign::parse),
        };

        if let Some(font) = tag.attribute("font") {
            session.set_font(font)?;
        }
        if let Some(size) = font_size {
            session.set_font_size(size)?;
        }
        if let Some(color) = tag.attribute("color") {
            session.set_fill_color(color)?;
        }
        session.draw_text(tag.text, &options)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingSession};
    use xmlpdf_markup::Attributes;
    use xmlpdf_render_core::SessionError;
    use xmlpdf_types::{Color, DocumentOptions};

    fn run(attrs: &[(&str, &str)], text: &str) -> (RecordingSession, Result<(), InterpretError>) {
        let attributes: Attributes = attrs.iter().copied().collect();
        let tag = TagData { name: "text", attributes: &attributes, text };
        let mut session = RecordingSession::new(&DocumentOptions::default());
        session.add_page().unwrap();
        let result = TextHandler.handle(&mut session, &tag);
        (session, result)
    }

    #[test]
    fn absent_options_are_omitted() {
        let (session, result) = run(&[], "plain");
        result.unwrap();
        assert_eq!(
            session.calls().last(),
            Some(&Call::DrawText {
                text: "plain".to_string(),
                font: "Helvetica".to_string(),
                font_size: 12.0,
                color: Color::BLACK,
                options: TextOptions::default(),
            })
        );
    }

    #[test]
    fn attributes_are_applied_before_drawing() {
        let (session, result) = run(
            &[("font", "Courier"), ("fontSize", "9"), ("color", "#00f"), ("width", "200"), ("align", "right")],
            "styled",
        );
        result.unwrap();
        assert_eq!(
            session.calls()[1..],
            [
                Call::SetFont { name: "Courier".to_string() },
                Call::SetFontSize { size: 9.0 },
                Call::SetFillColor { color: Color { r: 0, g: 0, b: 255 } },
                Call::DrawText {
                    text: "styled".to_string(),
                    font: "Courier".to_string(),
                    font_size: 9.0,
                    color: Color { r: 0, g: 0, b: 255 },
                    options: TextOptions { width: Some(200.0), align: Some(TextAlign::Right) },
                },
            ]
        );
    }

    #[test]
    fn bad_number_leaves_the_session_untouched() {
        let (session, result) = run(&[("font", "Courier"), ("fontSize", "abc")], "never");
        assert!(matches!(result, Err(InterpretError::InvalidAttribute { ref attribute, .. }) if attribute == "fontSize"));
        assert_eq!(session.calls(), &[Call::AddPage]);
    }

    #[test]
    fn unknown_font_surfaces_from_the_session() {
        let (_, result) = run(&[("font", "Wingdings")], "x");
        assert_eq!(
            result.unwrap_err(),
            InterpretError::Session(SessionError::FontNotFound("Wingdings".to_string()))
        );
    }

    #[test]
    fn unrecognized_alignment_is_passed_through() {
        let (session, result) = run(&[("align", "diagonal")], "x");
        result.unwrap();
        match session.calls().last() {
            Some(Call::DrawText { options, .. }) => {
                assert_eq!(options.align, Some(TextAlign::Other("diagonal".to_string())))
            }
            other => panic!("expected a draw, got {:?}", other),
        }
    }
}
