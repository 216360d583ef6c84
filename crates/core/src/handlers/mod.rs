//! Built-in tag handlers.

mod page;
mod text;

pub use page::PageHandler;
pub use text::TextHandler;

use crate::registry::HandlerRegistryBuilder;

pub const PAGE_TAG: &str = "page";
pub const TEXT_TAG: &str = "text";

pub(crate) fn register_builtins(builder: HandlerRegistryBuilder) -> HandlerRegistryBuilder {
    builder.register(PAGE_TAG, PageHandler).register(TEXT_TAG, TextHandler)
}
