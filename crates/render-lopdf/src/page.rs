use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use xmlpdf_types::Color;

/// Text state last emitted into a page's content stream.
#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font_resource: String,
    font_size: f32,
    fill_color: Option<Color>,
    word_spacing: f32,
}

/// A positioned, fully resolved line of text.
pub(crate) struct TextRun<'a> {
    pub text: &'a str,
    pub x: f32,
    /// Baseline in PDF coordinates (origin at the bottom left).
    pub baseline: f32,
    pub font_resource: &'a str,
    pub font_size: f32,
    pub fill_color: &'a Color,
    pub word_spacing: f32,
}

/// Accumulates the content stream of one page.
pub(crate) struct PageContext {
    content: Content,
    state: PageRenderState,
}

impl PageContext {
    pub fn new() -> Self {
        Self {
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.content.operations.is_empty()
    }

    fn set_font(&mut self, resource: &str, size: f32) {
        if self.state.font_resource != resource || self.state.font_size != size {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(resource.as_bytes().to_vec()), size.into()],
            ));
            self.state.font_resource = resource.to_string();
            self.state.font_size = size;
        }
    }

    fn set_fill_color(&mut self, color: &Color) {
        if self.state.fill_color.as_ref() != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.content
                .operations
                .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            self.state.fill_color = Some(color.clone());
        }
    }

    fn set_word_spacing(&mut self, spacing: f32) {
        if self.state.word_spacing != spacing {
            self.content
                .operations
                .push(Operation::new("Tw", vec![spacing.into()]));
            self.state.word_spacing = spacing;
        }
    }

    pub fn draw_text(&mut self, run: &TextRun<'_>) {
        if run.text.is_empty() {
            return;
        }
        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(run.font_resource, run.font_size);
        self.set_fill_color(run.fill_color);
        self.set_word_spacing(run.word_spacing);
        self.content
            .operations
            .push(Operation::new("Td", vec![run.x.into(), run.baseline.into()]));
        self.content.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(run.text), StringFormat::Literal)],
        ));
        self.content.operations.push(Operation::new("ET", vec![]));
    }
}

pub(crate) fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<'a>(text: &'a str, color: &'a Color) -> TextRun<'a> {
        TextRun {
            text,
            x: 72.0,
            baseline: 700.0,
            font_resource: "F1",
            font_size: 12.0,
            fill_color: color,
            word_spacing: 0.0,
        }
    }

    fn operators(page: PageContext) -> Vec<String> {
        page.finish().operations.into_iter().map(|op| op.operator).collect()
    }

    #[test]
    fn repeated_state_is_emitted_once() {
        let black = Color::BLACK;
        let mut page = PageContext::new();
        page.draw_text(&run("one", &black));
        page.draw_text(&run("two", &black));
        assert_eq!(
            operators(page),
            vec!["BT", "Tf", "rg", "Td", "Tj", "ET", "BT", "Td", "Tj", "ET"]
        );
    }

    #[test]
    fn empty_text_emits_nothing() {
        let black = Color::BLACK;
        let mut page = PageContext::new();
        page.draw_text(&run("", &black));
        assert!(page.is_empty());
    }

    #[test]
    fn non_latin_characters_are_replaced() {
        assert_eq!(to_win_ansi("café ✓"), vec![b'c', b'a', b'f', 0xE9, b' ', b'?']);
    }
}
