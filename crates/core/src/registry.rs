use crate::error::InterpretError;
use crate::handlers;
use std::collections::HashMap;
use std::fmt;
use xmlpdf_markup::{Attributes, Element};
use xmlpdf_render_core::DocumentSession;

/// What a handler sees of an element: its name, attributes and text payload.
/// Children are deliberately absent; recursion belongs to the interpreter.
#[derive(Debug, Clone, Copy)]
pub struct TagData<'a> {
    pub name: &'a str,
    pub attributes: &'a Attributes,
    pub text: &'a str,
}

impl<'a> TagData<'a> {
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes.get(name)
    }
}

impl<'a> From<&'a Element> for TagData<'a> {
    fn from(element: &'a Element) -> Self {
        Self {
            name: element.name(),
            attributes: element.attributes(),
            text: element.text(),
        }
    }
}

/// Translates one element into session mutations.
pub trait TagHandler: Send + Sync {
    fn handle(&self, session: &mut dyn DocumentSession, tag: &TagData<'_>) -> Result<(), InterpretError>;
}

impl<F> TagHandler for F
where
    F: Fn(&mut dyn DocumentSession, &TagData<'_>) -> Result<(), InterpretError> + Send + Sync,
{
    fn handle(&self, session: &mut dyn DocumentSession, tag: &TagData<'_>) -> Result<(), InterpretError> {
        self(session, tag)
    }
}

/// Tag name to handler mapping. Immutable once built, so one registry can be
/// shared by any number of concurrent renders.
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn TagHandler>>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// A registry holding only the built-in `page` and `text` handlers.
    pub fn with_builtins() -> Self {
        Self::builder().with_builtins().build()
    }

    pub fn empty() -> Self {
        Self::builder().build()
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn TagHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered tag names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry").field("tags", &self.names()).finish()
    }
}

#[derive(Default)]
pub struct HandlerRegistryBuilder {
    handlers: HashMap<String, Box<dyn TagHandler>>,
}

impl HandlerRegistryBuilder {
    pub fn with_builtins(self) -> Self {
        handlers::register_builtins(self)
    }

    /// Adds or replaces the handler for `name`.
    pub fn register<H>(mut self, name: impl Into<String>, handler: H) -> Self
    where
        H: TagHandler + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    /// Like [`register`](Self::register), with the closure signature spelled out
    /// so argument types can be inferred.
    pub fn register_fn<F>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut dyn DocumentSession, &TagData<'_>) -> Result<(), InterpretError> + Send + Sync + 'static,
    {
        self.register(name, handler)
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry { handlers: self.handlers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_cover_page_and_text() {
        let registry = HandlerRegistry::with_builtins();
        assert_eq!(registry.names(), vec!["page", "text"]);
        assert!(registry.lookup("page").is_some());
        assert!(registry.lookup("section").is_none());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let registry = HandlerRegistry::builder()
            .with_builtins()
            .register_fn("page", |_, _| Ok(()))
            .register_fn("rule", |session, _| Ok(session.add_page()?))
            .build();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("rule"));
    }

    #[test]
    fn empty_registry_has_no_handlers() {
        let registry = HandlerRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(format!("{:?}", registry), "HandlerRegistry { tags: [] }");
    }
}
