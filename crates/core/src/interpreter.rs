use crate::error::InterpretError;
use crate::registry::{HandlerRegistry, TagData};
use log::{debug, trace};
use xmlpdf_markup::{ATTRIBUTES_KEY, Child, Children, Element, TEXT_KEY};
use xmlpdf_render_core::DocumentSession;

/// Counts gathered during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpretSummary {
    /// Elements a handler was invoked for.
    pub dispatched: usize,
    /// Elements with no registered handler; their children were still visited.
    pub unhandled: usize,
}

/// Walks an element tree depth-first, pre-order, invoking the registered
/// handler for every element before visiting its children.
///
/// The interpreter never catches handler failures: the first error ends the
/// pass and is returned as is.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'r> {
    registry: &'r HandlerRegistry,
}

impl<'r> Interpreter<'r> {
    pub fn new(registry: &'r HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Interprets every field of `children` in order.
    pub fn run(
        &self,
        session: &mut dyn DocumentSession,
        children: &Children,
    ) -> Result<InterpretSummary, InterpretError> {
        let mut summary = InterpretSummary::default();
        self.walk(session, children, &mut summary)?;
        Ok(summary)
    }

    fn walk(
        &self,
        session: &mut dyn DocumentSession,
        children: &Children,
        summary: &mut InterpretSummary,
    ) -> Result<(), InterpretError> {
        for field in children {
            if field.name() == ATTRIBUTES_KEY || field.name() == TEXT_KEY {
                continue;
            }
            match field.value() {
                Child::Single(element) => self.visit(session, element, summary)?,
                Child::Repeated(elements) => {
                    for element in elements {
                        self.visit(session, element, summary)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn visit(
        &self,
        session: &mut dyn DocumentSession,
        element: &Element,
        summary: &mut InterpretSummary,
    ) -> Result<(), InterpretError> {
        trace!("{} {:?} {:?}", element.name(), element.attributes(), element.text());
        match self.registry.lookup(element.name()) {
            Some(handler) => {
                handler.handle(session, &TagData::from(element))?;
                summary.dispatched += 1;
            }
            None => {
                debug!("No handler for <{}>, treating it as a container", element.name());
                summary.unhandled += 1;
            }
        }
        self.walk(session, element.children(), summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingSession};
    use std::sync::{Arc, Mutex};
    use xmlpdf_markup::{ParseOptions, SiblingOrder, parse_document};
    use xmlpdf_render_core::SessionError;
    use xmlpdf_types::DocumentOptions;

    fn parse(markup: &str) -> Element {
        parse_document(markup, &ParseOptions::default()).unwrap()
    }

    fn record(registry: &HandlerRegistry, markup: &str) -> Result<Vec<Call>, InterpretError> {
        let root = parse(markup);
        let mut session = RecordingSession::new(&DocumentOptions::default());
        Interpreter::new(registry).run(&mut session, root.children())?;
        Ok(session.calls().to_vec())
    }

    /// Registry whose handlers log `"<name>:<text>"` in visit order.
    fn tracing_registry(names: &[&str]) -> (HandlerRegistry, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut builder = HandlerRegistry::builder();
        for name in names {
            let log = Arc::clone(&log);
            builder = builder.register_fn(*name, move |_, tag| {
                log.lock().unwrap().push(format!("{}:{}", tag.name, tag.text));
                Ok(())
            });
        }
        (builder.build(), log)
    }

    #[test]
    fn repeated_siblings_dispatch_once_each_in_order() {
        let (registry, log) = tracing_registry(&["item"]);
        let root = parse("<document><item>a</item><item>b</item><item>c</item></document>");
        let mut session = RecordingSession::new(&DocumentOptions::default());
        let summary = Interpreter::new(&registry).run(&mut session, root.children()).unwrap();
        assert_eq!(summary.dispatched, 3);
        assert_eq!(*log.lock().unwrap(), vec!["item:a", "item:b", "item:c"]);
    }

    #[test]
    fn parents_run_before_descendants() {
        let (registry, log) = tracing_registry(&["outer", "inner"]);
        let root = parse("<document><outer>1<inner>2</inner></outer><inner>3</inner></document>");
        let mut session = RecordingSession::new(&DocumentOptions::default());
        Interpreter::new(&registry).run(&mut session, root.children()).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["outer:1", "inner:2", "inner:3"]);
    }

    #[test]
    fn unknown_tags_are_transparent_containers() {
        let (registry, log) = tracing_registry(&["leaf"]);
        let root = parse("<document><section><group><leaf>x</leaf></group></section></document>");
        let mut session = RecordingSession::new(&DocumentOptions::default());
        let summary = Interpreter::new(&registry).run(&mut session, root.children()).unwrap();
        assert_eq!(summary, InterpretSummary { dispatched: 1, unhandled: 2 });
        assert_eq!(*log.lock().unwrap(), vec!["leaf:x"]);
    }

    #[test]
    fn document_order_is_kept_across_names() {
        let (registry, log) = tracing_registry(&["a", "b"]);
        let root = parse("<document><a>1</a><b>2</b><a>3</a></document>");
        let mut session = RecordingSession::new(&DocumentOptions::default());
        Interpreter::new(&registry).run(&mut session, root.children()).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a:1", "b:2", "a:3"]);
    }

    #[test]
    fn grouped_order_visits_names_by_first_appearance() {
        let (registry, log) = tracing_registry(&["a", "b"]);
        let options = ParseOptions { sibling_order: SiblingOrder::GroupedByName, ..Default::default() };
        let root = parse_document("<document><a>1</a><b>2</b><a>3</a></document>", &options).unwrap();
        let mut session = RecordingSession::new(&DocumentOptions::default());
        Interpreter::new(&registry).run(&mut session, root.children()).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a:1", "a:3", "b:2"]);
    }

    #[test]
    fn first_handler_error_stops_the_pass() {
        let registry = HandlerRegistry::builder()
            .with_builtins()
            .register_fn("fail", |_, _| Err(SessionError::Pdf("boom".to_string()).into()))
            .build();
        let root = parse("<document><page/><fail/><page/></document>");
        let mut session = RecordingSession::new(&DocumentOptions::default());
        let err = Interpreter::new(&registry).run(&mut session, root.children()).unwrap_err();
        assert_eq!(err, InterpretError::Session(SessionError::Pdf("boom".to_string())));
        assert_eq!(session.calls(), &[Call::AddPage]);
    }

    #[test]
    fn pages_alone_draw_no_text() {
        let calls = record(&HandlerRegistry::with_builtins(), "<document><page/><page/></document>").unwrap();
        assert_eq!(calls, vec![Call::AddPage, Call::AddPage]);
    }

    #[test]
    fn programmatic_reserved_fields_are_skipped() {
        let (registry, log) = tracing_registry(&["attrs", "text"]);
        let root = Element::new("document")
            .with_child(Element::new("attrs").with_text("hidden"))
            .with_child(Element::new("text").with_text("shown"));
        let mut session = RecordingSession::new(&DocumentOptions::default());
        Interpreter::new(&registry).run(&mut session, root.children()).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["text:shown"]);
    }
}
