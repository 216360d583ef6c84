//! A recording [`DocumentSession`] for asserting on builder calls without
//! decoding PDF output.
//!
//! Validation mirrors the production session (standard fonts, the shared
//! color syntax, no drawing before the first page), so error paths can be
//! exercised too. Finalizing emits the recorded calls as JSON, which makes the
//! output deterministic for identical input.

use log::warn;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use xmlpdf_render_core::{DocumentSession, OutputSink, SessionError, SessionFactory};
use xmlpdf_types::{Color, DocumentOptions, StandardFont, TextOptions};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    AddPage,
    SetFont { name: String },
    SetFontSize { size: f32 },
    SetFillColor { color: Color },
    /// A draw together with the text state in effect when it happened.
    DrawText {
        text: String,
        font: String,
        font_size: f32,
        color: Color,
        options: TextOptions,
    },
    Finalize,
    Abandon,
}

/// Everything one session saw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recording {
    pub options: DocumentOptions,
    pub calls: Vec<Call>,
}

impl Recording {
    pub fn page_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::AddPage)).count()
    }

    pub fn drawn_text(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

type SharedRecording = Arc<Mutex<Recording>>;

fn lock(recording: &SharedRecording) -> MutexGuard<'_, Recording> {
    recording.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RecordingSession {
    recording: SharedRecording,
    // Local mirror of the recorded calls, for borrowing without a lock guard.
    calls: Vec<Call>,
    font: StandardFont,
    font_size: f32,
    color: Color,
    has_page: bool,
    closed: bool,
}

impl RecordingSession {
    pub fn new(options: &DocumentOptions) -> Self {
        Self::with_recording(Arc::new(Mutex::new(Recording {
            options: options.clone(),
            calls: Vec::new(),
        })))
    }

    fn with_recording(recording: SharedRecording) -> Self {
        let options = lock(&recording).options.clone();
        Self {
            recording,
            calls: Vec::new(),
            font: StandardFont::from_name(&options.font).unwrap_or_default(),
            font_size: options.font_size,
            color: Color::BLACK,
            has_page: false,
            closed: false,
        }
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    fn record(&mut self, call: Call) {
        lock(&self.recording).calls.push(call.clone());
        self.calls.push(call);
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed { Err(SessionError::Finalized) } else { Ok(()) }
    }
}

impl DocumentSession for RecordingSession {
    fn add_page(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.has_page = true;
        self.record(Call::AddPage);
        Ok(())
    }

    fn set_font(&mut self, name: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.font = StandardFont::from_name(name).ok_or_else(|| SessionError::FontNotFound(name.to_string()))?;
        self.record(Call::SetFont { name: name.to_string() });
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) -> Result<(), SessionError> {
        self.ensure_open()?;
        if !(size.is_finite() && size > 0.0) {
            return Err(SessionError::InvalidValue { what: "font size", value: size });
        }
        self.font_size = size;
        self.record(Call::SetFontSize { size });
        Ok(())
    }

    fn set_fill_color(&mut self, value: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        let color = Color::parse(value).map_err(|message| SessionError::UnsupportedColor {
            value: value.to_string(),
            message,
        })?;
        self.color = color.clone();
        self.record(Call::SetFillColor { color });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, options: &TextOptions) -> Result<(), SessionError> {
        self.ensure_open()?;
        if !self.has_page {
            return Err(SessionError::NoActivePage);
        }
        let call = Call::DrawText {
            text: text.to_string(),
            font: self.font.postscript_name().to_string(),
            font_size: self.font_size,
            color: self.color.clone(),
            options: options.clone(),
        };
        self.record(call);
        Ok(())
    }

    fn finalize(&mut self, sink: OutputSink) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::AlreadyFinalized);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        self.closed = true;
        self.record(Call::Finalize);
        let bytes = serde_json::to_vec(&self.calls).map_err(|e| SessionError::Output(e.to_string()))?;
        runtime.spawn(async move {
            if sink.send(bytes).await.is_err() {
                warn!("Recorded output was dropped before it could be delivered");
            } else if let Err(e) = sink.finish().await {
                warn!("Failed to signal the end of recorded output: {}", e);
            }
        });
        Ok(())
    }

    fn abandon(&mut self) {
        if !self.closed {
            self.closed = true;
            self.record(Call::Abandon);
        }
    }
}

/// Hands out [`RecordingSession`]s and keeps every recording for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    recordings: Arc<Mutex<Vec<SharedRecording>>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots of every session created so far, oldest first.
    pub fn recordings(&self) -> Vec<Recording> {
        self.recordings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|r| lock(r).clone())
            .collect()
    }

    pub fn last(&self) -> Option<Recording> {
        self.recordings().pop()
    }
}

impl SessionFactory for RecordingFactory {
    type Session = RecordingSession;

    fn create(&self, options: &DocumentOptions) -> Result<RecordingSession, SessionError> {
        if StandardFont::from_name(&options.font).is_none() {
            return Err(SessionError::FontNotFound(options.font.clone()));
        }
        let recording = Arc::new(Mutex::new(Recording {
            options: options.clone(),
            calls: Vec::new(),
        }));
        self.recordings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&recording));
        Ok(RecordingSession::with_recording(recording))
    }
}
