use std::time::Duration;
use xmlpdf_markup::ParseOptions;
use xmlpdf_render_core::completion::DEFAULT_CHANNEL_CAPACITY;

/// Settings shared by every render a `Renderer` performs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub parse: ParseOptions,
    /// Upper bound on the wait for finalized output. `None` waits indefinitely.
    pub completion_timeout: Option<Duration>,
    /// Output chunks that may be buffered before the session's writer waits.
    pub channel_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            completion_timeout: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
