use serde::Serialize;
use std::collections::BTreeMap;
use std::slice;

/// Key under which attributes are carried when a tree is serialized.
pub const ATTRIBUTES_KEY: &str = "attrs";
/// Key under which the text payload is carried when a tree is serialized.
pub const TEXT_KEY: &str = "textNode";

/// How sibling elements sharing a name are grouped into fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiblingOrder {
    /// Only adjacent same-name siblings share a field, so iterating the fields
    /// visits elements in markup order.
    #[default]
    Document,
    /// All same-name siblings share one field placed where the name first
    /// appears.
    GroupedByName,
}

/// Attribute name to value mapping of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One parsed markup tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    #[serde(skip)]
    name: String,
    #[serde(rename = "textNode")]
    text: String,
    #[serde(rename = "attrs", skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
    #[serde(skip_serializing_if = "Children::is_empty")]
    children: Children,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            attributes: Attributes::new(),
            children: Children::default(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Appends a child in document order.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child, SiblingOrder::Document);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text payload, `""` when the tag has none.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub(crate) fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }
}

/// The value stored under one child field name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Child {
    Single(Element),
    Repeated(Vec<Element>),
}

impl Child {
    /// The elements in this field, in markup order.
    pub fn elements(&self) -> &[Element] {
        match self {
            Child::Single(element) => slice::from_ref(element),
            Child::Repeated(elements) => elements,
        }
    }

    fn append(&mut self, element: Element) {
        let previous = std::mem::replace(self, Child::Repeated(Vec::new()));
        let mut elements = match previous {
            Child::Single(first) => vec![first],
            Child::Repeated(elements) => elements,
        };
        elements.push(element);
        *self = Child::Repeated(elements);
    }
}

/// A named child slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value: Child,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Child {
        &self.value
    }
}

/// Ordered child fields of an element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Children {
    fields: Vec<Field>,
}

impl Children {
    /// Adds `element` under its own name, merging it into an existing field as
    /// `order` dictates.
    pub fn push(&mut self, element: Element, order: SiblingOrder) {
        let existing = match order {
            SiblingOrder::Document => self
                .fields
                .last_mut()
                .filter(|field| field.name == element.name),
            SiblingOrder::GroupedByName => self
                .fields
                .iter_mut()
                .find(|field| field.name == element.name),
        };

        match existing {
            Some(field) => field.value.append(element),
            None => self.fields.push(Field {
                name: element.name.clone(),
                value: Child::Single(element),
            }),
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The first field named `name`.
    pub fn get(&self, name: &str) -> Option<&Child> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Every element named `name` across all fields, in field order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.fields
            .iter()
            .filter(move |field| field.name == name)
            .flat_map(|field| field.value.elements())
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a Field;
    type IntoIter = slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Children {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.fields.len()))?;
        for field in &self.fields {
            let mut entry = BTreeMap::new();
            entry.insert(field.name.as_str(), &field.value);
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(children: &Children) -> Vec<(&str, usize)> {
        children
            .iter()
            .map(|f| (f.name(), f.value().elements().len()))
            .collect()
    }

    #[test]
    fn adjacent_siblings_collapse_into_repeated_field() {
        let mut children = Children::default();
        children.push(Element::new("text").with_text("a"), SiblingOrder::Document);
        children.push(Element::new("text").with_text("b"), SiblingOrder::Document);

        assert_eq!(children.len(), 1);
        match children.get("text").unwrap() {
            Child::Repeated(items) => {
                assert_eq!(items[0].text(), "a");
                assert_eq!(items[1].text(), "b");
            }
            other => panic!("expected repeated field, got {:?}", other),
        }
    }

    #[test]
    fn document_order_keeps_interleaved_names_apart() {
        let mut children = Children::default();
        for name in ["text", "page", "text"] {
            children.push(Element::new(name), SiblingOrder::Document);
        }
        assert_eq!(names(&children), vec![("text", 1), ("page", 1), ("text", 1)]);
        assert_eq!(children.elements_named("text").count(), 2);
    }

    #[test]
    fn grouped_order_gathers_names_at_first_appearance() {
        let mut children = Children::default();
        for name in ["text", "page", "text"] {
            children.push(Element::new(name), SiblingOrder::GroupedByName);
        }
        assert_eq!(names(&children), vec![("text", 2), ("page", 1)]);
    }

    #[test]
    fn serializes_with_reserved_keys() {
        let element = Element::new("text")
            .with_attribute("color", "red")
            .with_text("Title");
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json[TEXT_KEY], "Title");
        assert_eq!(json[ATTRIBUTES_KEY]["color"], "red");
        assert!(json.get("children").is_none());
    }
}
