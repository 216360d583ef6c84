use crate::fonts::{ASCENT_FACTOR, FontMetrics, LINE_HEIGHT_FACTOR};
use crate::layout::{Line, wrap_text};
use crate::page::{PageContext, TextRun, to_win_ansi};
use crate::writer::StreamingPdfWriter;
use log::{debug, trace, warn};
use lopdf::{Dictionary, Object, StringFormat, dictionary};
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use xmlpdf_render_core::completion::DEFAULT_CHUNK_SIZE;
use xmlpdf_render_core::{ChunkWriter, DocumentSession, OutputSink, SessionError, SessionFactory};
use xmlpdf_types::{Color, DocumentInfo, DocumentOptions, Size, StandardFont, TextAlign, TextOptions};

const PDF_VERSION: &str = "1.7";

/// Creates a [`LopdfSession`] for every render.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfSessionFactory;

impl SessionFactory for LopdfSessionFactory {
    type Session = LopdfSession;

    fn create(&self, options: &DocumentOptions) -> Result<LopdfSession, SessionError> {
        LopdfSession::new(options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Open,
    Closed,
}

/// A document session that lays text out on standard-14 font pages and writes
/// PDF bytes on a blocking worker once finalized.
///
/// Text flows from the top-left corner of the content box. Each draw starts on
/// a new line below the previous one, and a page is appended automatically
/// when a line would cross the bottom margin.
pub struct LopdfSession {
    page_size: Size,
    margin: f32,
    info: DocumentInfo,
    pages: Vec<PageContext>,
    /// Distance from the top edge of the current page to the next line's top.
    cursor_y: f32,
    font: StandardFont,
    font_size: f32,
    fill_color: Color,
    /// Fonts in first-use order; a font's resource name is `F{index + 1}`.
    fonts_used: Vec<StandardFont>,
    state: SessionState,
    cancel: Arc<AtomicBool>,
}

impl LopdfSession {
    pub fn new(options: &DocumentOptions) -> Result<Self, SessionError> {
        let font = StandardFont::from_name(&options.font)
            .ok_or_else(|| SessionError::FontNotFound(options.font.clone()))?;
        check_positive("font size", options.font_size)?;
        let page_size = options.page_dimensions();
        if !(options.margin >= 0.0 && options.margin * 2.0 < page_size.width.min(page_size.height)) {
            return Err(SessionError::InvalidValue { what: "margin", value: options.margin });
        }
        Ok(Self {
            page_size,
            margin: options.margin,
            info: options.info.clone(),
            pages: Vec::new(),
            cursor_y: options.margin,
            font,
            font_size: options.font_size,
            fill_color: Color::BLACK,
            fonts_used: Vec::new(),
            state: SessionState::Open,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Open => Ok(()),
            SessionState::Closed => Err(SessionError::Finalized),
        }
    }

    fn content_width(&self) -> f32 {
        self.page_size.width - 2.0 * self.margin
    }

    fn font_resource(&mut self, font: StandardFont) -> String {
        let index = match self.fonts_used.iter().position(|f| *f == font) {
            Some(index) => index,
            None => {
                self.fonts_used.push(font);
                self.fonts_used.len() - 1
            }
        };
        format!("F{}", index + 1)
    }

    fn start_page(&mut self) {
        self.pages.push(PageContext::new());
        self.cursor_y = self.margin;
        trace!("Started page {}", self.pages.len());
    }

    fn line_offset(align: &TextAlign, line: &Line, width: f32) -> (f32, f32) {
        let slack = (width - line.width).max(0.0);
        match align {
            TextAlign::Center => (slack / 2.0, 0.0),
            TextAlign::Right => (slack, 0.0),
            TextAlign::Justify if !line.ends_paragraph && line.gaps > 0 => (0.0, slack / line.gaps as f32),
            _ => (0.0, 0.0),
        }
    }

    fn font_dictionary(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for (index, font) in self.fonts_used.iter().enumerate() {
            let mut font_dict = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.postscript_name(),
            };
            if !matches!(font, StandardFont::Symbol | StandardFont::ZapfDingbats) {
                font_dict.set("Encoding", "WinAnsiEncoding");
            }
            fonts.set(format!("F{}", index + 1), font_dict);
        }
        fonts
    }
}

fn check_positive(what: &'static str, value: f32) -> Result<(), SessionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SessionError::InvalidValue { what, value })
    }
}

impl DocumentSession for LopdfSession {
    fn add_page(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.start_page();
        Ok(())
    }

    fn set_font(&mut self, name: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.font = StandardFont::from_name(name).ok_or_else(|| SessionError::FontNotFound(name.to_string()))?;
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) -> Result<(), SessionError> {
        self.ensure_open()?;
        check_positive("font size", size)?;
        self.font_size = size;
        Ok(())
    }

    fn set_fill_color(&mut self, value: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.fill_color = Color::parse(value).map_err(|message| SessionError::UnsupportedColor {
            value: value.to_string(),
            message,
        })?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, options: &TextOptions) -> Result<(), SessionError> {
        self.ensure_open()?;
        if self.pages.is_empty() {
            return Err(SessionError::NoActivePage);
        }
        let align = options.align.clone().unwrap_or(TextAlign::Left);
        if let TextAlign::Other(value) = &align {
            return Err(SessionError::UnsupportedAlignment(value.clone()));
        }
        let width = match options.width {
            Some(width) => {
                check_positive("text width", width)?;
                width
            }
            None => self.content_width(),
        };
        if text.is_empty() {
            return Ok(());
        }

        let metrics = FontMetrics::for_font(self.font);
        let size = self.font_size;
        let lines = wrap_text(text, width, |s| metrics.measure(s, size));
        let resource = self.font_resource(self.font);
        let line_height = size * LINE_HEIGHT_FACTOR;
        let fill_color = self.fill_color.clone();

        for line in &lines {
            let page_has_content = self.cursor_y > self.margin;
            if page_has_content && self.cursor_y + line_height > self.page_size.height - self.margin {
                debug!("Text overflowed page {}, continuing on a new page", self.pages.len());
                self.start_page();
            }
            let (offset, word_spacing) = Self::line_offset(&align, line, width);
            let run = TextRun {
                text: &line.text,
                x: self.margin + offset,
                baseline: self.page_size.height - (self.cursor_y + size * ASCENT_FACTOR),
                font_resource: &resource,
                font_size: size,
                fill_color: &fill_color,
                word_spacing,
            };
            if let Some(page) = self.pages.last_mut() {
                page.draw_text(&run);
            }
            self.cursor_y += line_height;
        }
        Ok(())
    }

    fn finalize(&mut self, sink: OutputSink) -> Result<(), SessionError> {
        if self.state == SessionState::Closed {
            return Err(if self.cancel.load(Ordering::Acquire) {
                SessionError::Finalized
            } else {
                SessionError::AlreadyFinalized
            });
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        self.state = SessionState::Closed;

        let contents = std::mem::take(&mut self.pages)
            .into_iter()
            .map(|page| page.finish().encode())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SessionError::Pdf(e.to_string()))?;
        let job = DocumentJob {
            contents,
            page_size: self.page_size,
            fonts: self.font_dictionary(),
            info: info_dictionary(&self.info),
        };
        debug!(
            "Finalizing document: {} page(s), {} font(s)",
            job.contents.len(),
            self.fonts_used.len()
        );

        let cancel = Arc::clone(&self.cancel);
        runtime.spawn_blocking(move || {
            let mut writer = ChunkWriter::new(sink, DEFAULT_CHUNK_SIZE, cancel);
            let result = job.write(&mut writer).and_then(|()| {
                let total = writer.position();
                writer.finish()?;
                Ok(total)
            });
            match result {
                Ok(total) => debug!("Document written: {} bytes", total),
                Err(e) => warn!("Document output stopped: {}", e),
            }
        });
        Ok(())
    }

    fn abandon(&mut self) {
        if self.state == SessionState::Open {
            debug!("Abandoning session with {} page(s)", self.pages.len());
        }
        self.cancel.store(true, Ordering::Release);
        self.state = SessionState::Closed;
        self.pages.clear();
    }
}

fn info_dictionary(info: &DocumentInfo) -> Option<Dictionary> {
    if info.is_empty() {
        return None;
    }
    let mut dict = Dictionary::new();
    for (key, value) in info.entries() {
        dict.set(key, Object::String(to_win_ansi(value), StringFormat::Literal));
    }
    Some(dict)
}

/// Everything the blocking writer needs, detached from the session.
struct DocumentJob {
    contents: Vec<Vec<u8>>,
    page_size: Size,
    fonts: Dictionary,
    info: Option<Dictionary>,
}

impl DocumentJob {
    fn write<W: Write>(self, out: W) -> io::Result<()> {
        let mut writer = StreamingPdfWriter::new(out, PDF_VERSION, self.fonts)?;
        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(self.page_size.width),
            Object::Real(self.page_size.height),
        ];
        let mut page_ids = Vec::with_capacity(self.contents.len());
        for content in self.contents {
            let content_id = writer.buffer_content_stream(content);
            let page = dictionary! {
                "Type" => "Page",
                "Parent" => writer.pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => writer.resources_id,
            };
            page_ids.push(writer.buffer_object(page.into()));
        }
        writer.set_page_ids(page_ids);
        if let Some(info) = self.info {
            writer.set_info(info);
        }
        writer.finish()?;
        Ok(())
    }
}
