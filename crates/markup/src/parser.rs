//! Builds an [`Element`] tree from markup text using `roxmltree`.

use crate::element::{ATTRIBUTES_KEY, Element, SiblingOrder, TEXT_KEY};
use crate::error::{Location, MarkupError};
use log::{trace, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Name the document element must carry.
    pub root_tag: String,
    pub sibling_order: SiblingOrder,
    /// Strip leading and trailing whitespace from text payloads.
    pub trim_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            root_tag: "document".to_string(),
            sibling_order: SiblingOrder::default(),
            trim_text: true,
        }
    }
}

/// Parses `markup` and returns its document element.
///
/// The root's attributes are the document-level attributes and its children
/// the content to interpret.
pub fn parse_document(markup: &str, options: &ParseOptions) -> Result<Element, MarkupError> {
    let doc = roxmltree::Document::parse(markup)?;
    let root = doc.root_element();
    let root_name = root.tag_name().name();
    if root_name != options.root_tag {
        return Err(MarkupError::UnexpectedRoot {
            expected: options.root_tag.clone(),
            found: root_name.to_string(),
            location: doc.text_pos_at(root.range().start).into(),
        });
    }
    Ok(build_element(&doc, root, options))
}

fn build_element(
    doc: &roxmltree::Document<'_>,
    node: roxmltree::Node<'_, '_>,
    options: &ParseOptions,
) -> Element {
    let mut element = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        element.attributes_mut().insert(attr.name(), attr.value());
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_text() {
            if let Some(t) = child.text() {
                text.push_str(t);
            }
        } else if child.is_element() {
            let name = child.tag_name().name();
            if name == ATTRIBUTES_KEY || name == TEXT_KEY {
                let location: Location = doc.text_pos_at(child.range().start).into();
                warn!("Skipping <{}> at {}: the name is reserved", name, location);
                continue;
            }
            let built = build_element(doc, child, options);
            element.children_mut().push(built, options.sibling_order);
        }
        // Comments and processing instructions carry no content.
    }

    let text = if options.trim_text {
        text.trim().to_string()
    } else if text.trim().is_empty() {
        String::new()
    } else {
        text
    };
    trace!("Parsed <{}> with {} attribute(s)", element.name(), element.attributes().len());
    element.set_text(text);
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Child;

    const SAMPLE: &str = r#"
        <document size="A4">
            <page>
                <text color="red" fontSize="20" align="center">
                    Title
                </text>
                <text color="black" fontSize="12">Paragraph</text>
            </page>
        </document>"#;

    #[test]
    fn parses_root_attributes_and_children() {
        let root = parse_document(SAMPLE, &ParseOptions::default()).unwrap();
        assert_eq!(root.name(), "document");
        assert_eq!(root.attribute("size"), Some("A4"));
        assert_eq!(root.text(), "");

        let page = &root.children().get("page").unwrap().elements()[0];
        match page.children().get("text").unwrap() {
            Child::Repeated(texts) => {
                assert_eq!(texts.len(), 2);
                assert_eq!(texts[0].text(), "Title");
                assert_eq!(texts[0].attribute("fontSize"), Some("20"));
                assert_eq!(texts[1].text(), "Paragraph");
            }
            other => panic!("expected two text elements, got {:?}", other),
        }
    }

    #[test]
    fn missing_text_is_empty_string() {
        let root = parse_document("<document><page/></document>", &ParseOptions::default()).unwrap();
        let page = &root.children().get("page").unwrap().elements()[0];
        assert_eq!(page.text(), "");
        assert!(page.children().is_empty());
    }

    #[test]
    fn untrimmed_text_keeps_whitespace() {
        let options = ParseOptions { trim_text: false, ..Default::default() };
        let root = parse_document("<document><text>  hi </text></document>", &options).unwrap();
        let text = &root.children().get("text").unwrap().elements()[0];
        assert_eq!(text.text(), "  hi ");
    }

    #[test]
    fn entities_and_cdata_become_text() {
        let root = parse_document(
            "<document><text>a &amp; b<![CDATA[ <c>]]></text></document>",
            &ParseOptions::default(),
        )
        .unwrap();
        let text = &root.children().get("text").unwrap().elements()[0];
        assert_eq!(text.text(), "a & b <c>");
    }

    #[test]
    fn reserved_child_names_are_skipped() {
        let root = parse_document(
            "<document><attrs/><textNode/><page/></document>",
            &ParseOptions::default(),
        )
        .unwrap();
        let names: Vec<_> = root.children().iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, vec!["page"]);
    }

    #[test]
    fn malformed_markup_reports_location() {
        let err = parse_document("<document>\n  <page>\n</document>", &ParseOptions::default())
            .unwrap_err();
        match err {
            MarkupError::Xml { location, .. } => assert!(location.line >= 2),
            other => panic!("expected XML error, got {:?}", other),
        }
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = parse_document("<doc/>", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, MarkupError::UnexpectedRoot { ref found, .. } if found == "doc"));
    }

    #[test]
    fn grouped_sibling_order_is_configurable() {
        let options = ParseOptions { sibling_order: SiblingOrder::GroupedByName, ..Default::default() };
        let root =
            parse_document("<document><text/><page/><text/></document>", &options).unwrap();
        let names: Vec<_> = root.children().iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, vec!["text", "page"]);
    }
}
