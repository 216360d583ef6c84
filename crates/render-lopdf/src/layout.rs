//! Greedy line breaking for a single text run.

/// One laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
    /// Number of inter-word spaces in `text`.
    pub gaps: usize,
    /// Last line of a paragraph; never stretched when justifying.
    pub ends_paragraph: bool,
}

/// Breaks `text` into lines no wider than `max_width`.
///
/// Explicit newlines start new paragraphs and runs of whitespace collapse to a
/// single space. A word wider than `max_width` gets a line of its own.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<Line> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut gaps = 0;
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate_width = measure(&format!("{} {}", current, word));
            if candidate_width <= max_width {
                current.push(' ');
                current.push_str(word);
                gaps += 1;
            } else {
                let width = measure(&current);
                lines.push(Line {
                    text: std::mem::take(&mut current),
                    width,
                    gaps,
                    ends_paragraph: false,
                });
                current.push_str(word);
                gaps = 0;
            }
        }
        let width = measure(&current);
        lines.push(Line { text: current, width, gaps, ends_paragraph: true });
    }
    lines
}
