use super::builder::RendererBuilder;
use super::config::RenderConfig;
use crate::error::RenderError;
use log::{debug, warn};
use std::path::Path;
use std::sync::Arc;
use xmlpdf_core::{HandlerRegistry, Interpreter, document_options};
use xmlpdf_markup::{Element, parse_document};
use xmlpdf_render_core::completion::{self, Completion};
use xmlpdf_render_core::{CompletionError, DocumentSession, SessionFactory};
use xmlpdf_render_lopdf::LopdfSessionFactory;

/// Runs complete renders: parse, interpret into a fresh session, finalize,
/// then wait for the session's output.
///
/// A `Renderer` holds no per-render state. Concurrent renders share the
/// registry and factory and get a session each.
pub struct Renderer<F: SessionFactory = LopdfSessionFactory> {
    registry: Arc<HandlerRegistry>,
    factory: F,
    config: RenderConfig,
}

impl Default for Renderer<LopdfSessionFactory> {
    fn default() -> Self {
        Self::new(Arc::new(HandlerRegistry::with_builtins()), LopdfSessionFactory, RenderConfig::default())
    }
}

impl Renderer<LopdfSessionFactory> {
    pub fn builder() -> RendererBuilder<LopdfSessionFactory> {
        RendererBuilder::new()
    }
}

impl<F: SessionFactory> Renderer<F> {
    pub(crate) fn new(registry: Arc<HandlerRegistry>, factory: F, config: RenderConfig) -> Self {
        Self { registry, factory, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    pub fn session_factory(&self) -> &F {
        &self.factory
    }

    /// Parses `markup` into the tree the interpreter walks.
    pub fn parse(&self, markup: &str) -> Result<Element, RenderError> {
        Ok(parse_document(markup, &self.config.parse)?)
    }

    /// Renders `markup` into a finished document.
    ///
    /// No bytes are returned unless the session signalled the end of its
    /// output; any failure abandons the session first.
    pub async fn render(&self, markup: &str) -> Result<Vec<u8>, RenderError> {
        let root = self.parse(markup)?;
        self.render_element(&root).await
    }

    /// Renders an already parsed tree. `root` carries the document attributes.
    pub async fn render_element(&self, root: &Element) -> Result<Vec<u8>, RenderError> {
        let options = document_options(root)?;
        let mut session = self.factory.create(&options)?;

        debug!("Render phase: Building");
        let summary = match Interpreter::new(&self.registry).run(&mut session, root.children()) {
            Ok(summary) => summary,
            Err(e) => {
                session.abandon();
                return Err(e.into());
            }
        };

        debug!(
            "Render phase: Finalizing ({} element(s) handled, {} without a handler)",
            summary.dispatched, summary.unhandled
        );
        let (sink, completion) = completion::channel(self.config.channel_capacity);
        if let Err(e) = session.finalize(sink) {
            session.abandon();
            return Err(e.into());
        }

        let bytes = self.await_completion(&mut session, completion).await?;
        debug!("Render phase: Complete ({} bytes)", bytes.len());
        Ok(bytes)
    }

    async fn await_completion(
        &self,
        session: &mut F::Session,
        completion: Completion,
    ) -> Result<Vec<u8>, RenderError> {
        let result = match self.config.completion_timeout {
            Some(limit) => match tokio::time::timeout(limit, completion.wait()).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Output did not complete within {:?}; abandoning the session", limit);
                    session.abandon();
                    return Err(RenderError::Timeout(limit));
                }
            },
            None => completion.await,
        };
        if let Err(CompletionError::Abandoned) = result {
            session.abandon();
        }
        Ok(result?)
    }

    /// Renders on a private current-thread runtime.
    ///
    /// Fails with [`RenderError::Config`] when called from within an async
    /// context; use [`render`](Self::render) there.
    pub fn render_blocking(&self, markup: &str) -> Result<Vec<u8>, RenderError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(RenderError::Config(
                "render_blocking called from within an async runtime; await render instead".to_string(),
            ));
        }
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(self.render(markup))
    }

    /// Renders `markup` and writes the document to `path`. Nothing is written
    /// when the render fails.
    pub async fn render_to_file(&self, markup: &str, path: impl AsRef<Path>) -> Result<usize, RenderError> {
        let bytes = self.render(markup).await?;
        tokio::fs::write(path.as_ref(), &bytes).await?;
        Ok(bytes.len())
    }
}
