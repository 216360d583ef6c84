use super::config::RenderConfig;
use super::renderer::Renderer;
use crate::error::RenderError;
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use xmlpdf_core::{DocumentSession, HandlerRegistry, HandlerRegistryBuilder, InterpretError, TagData, TagHandler};
use xmlpdf_markup::{ParseOptions, SiblingOrder};
use xmlpdf_render_core::SessionFactory;
use xmlpdf_render_lopdf::LopdfSessionFactory;

enum RegistrySource {
    Building(HandlerRegistryBuilder),
    Shared(Arc<HandlerRegistry>),
}

/// A builder for creating a [`Renderer`].
///
/// Starts from the built-in `page` and `text` handlers, the lopdf session and
/// default parse options.
pub struct RendererBuilder<F = LopdfSessionFactory> {
    registry: RegistrySource,
    factory: F,
    config: RenderConfig,
    // Names passed to `with_handler` after `with_registry`; reported by `build`.
    rejected_handlers: Vec<String>,
}

impl Default for RendererBuilder<LopdfSessionFactory> {
    fn default() -> Self {
        Self {
            registry: RegistrySource::Building(HandlerRegistry::builder().with_builtins()),
            factory: LopdfSessionFactory,
            config: RenderConfig::default(),
            rejected_handlers: Vec::new(),
        }
    }
}

impl RendererBuilder<LopdfSessionFactory> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<F: SessionFactory> RendererBuilder<F> {
    /// Uses a prebuilt registry. It can be shared with other renderers.
    pub fn with_registry(mut self, registry: impl Into<Arc<HandlerRegistry>>) -> Self {
        self.registry = RegistrySource::Shared(registry.into());
        self
    }

    /// Adds or replaces a tag handler. Not available together with `with_registry`.
    pub fn with_handler<H>(mut self, name: impl Into<String>, handler: H) -> Self
    where
        H: TagHandler + 'static,
    {
        let name = name.into();
        self.registry = match self.registry {
            RegistrySource::Building(builder) => RegistrySource::Building(builder.register(name, handler)),
            shared @ RegistrySource::Shared(_) => {
                self.rejected_handlers.push(name);
                shared
            }
        };
        self
    }

    /// [`with_handler`](Self::with_handler) for closures.
    pub fn with_handler_fn<H>(self, name: impl Into<String>, handler: H) -> Self
    where
        H: Fn(&mut dyn DocumentSession, &TagData<'_>) -> Result<(), InterpretError> + Send + Sync + 'static,
    {
        self.with_handler(name, handler)
    }

    /// Replaces the session backend.
    pub fn with_session_factory<G: SessionFactory>(self, factory: G) -> RendererBuilder<G> {
        RendererBuilder {
            registry: self.registry,
            factory,
            config: self.config,
            rejected_handlers: self.rejected_handlers,
        }
    }

    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.config.parse = options;
        self
    }

    pub fn with_sibling_order(mut self, order: SiblingOrder) -> Self {
        self.config.parse.sibling_order = order;
        self
    }

    /// Bounds the wait for finalized output. On expiry the session is
    /// abandoned and the render fails with [`RenderError::Timeout`].
    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.config.completion_timeout = Some(timeout);
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Consumes the builder and creates the `Renderer`.
    pub fn build(self) -> Result<Renderer<F>, RenderError> {
        if !self.rejected_handlers.is_empty() {
            return Err(RenderError::Config(format!(
                "Handlers {:?} cannot be added to a prebuilt registry; register them before building it",
                self.rejected_handlers
            )));
        }
        if self.config.channel_capacity == 0 {
            return Err(RenderError::Config("Channel capacity must be at least 1".to_string()));
        }
        if self.config.completion_timeout == Some(Duration::ZERO) {
            return Err(RenderError::Config("Completion timeout must be greater than zero".to_string()));
        }
        let registry = match self.registry {
            RegistrySource::Building(builder) => Arc::new(builder.build()),
            RegistrySource::Shared(registry) => registry,
        };
        debug!("Building renderer with handlers for {:?}", registry.names());
        Ok(Renderer::new(registry, self.factory, self.config))
    }
}
