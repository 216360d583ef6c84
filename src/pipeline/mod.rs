//! The render driver: builder, configuration and the `Renderer` itself.

mod builder;
mod config;
mod renderer;

pub use builder::RendererBuilder;
pub use config::RenderConfig;
pub use renderer::Renderer;
