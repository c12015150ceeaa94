//! Owned XML element tree.
//!
//! Elements hold a tag name, an optional namespace, attributes in insertion
//! order, and a mixed list of child elements and text nodes. Namespace
//! declarations are rendered as `xmlns` attributes only where the namespace
//! differs from the parent's, so `<query xmlns="jabber:iq:rpc">` carries the
//! declaration once and its descendants inherit it.

use std::fmt;

use crate::error::Result;

/// A single node inside an element: a child element or character data.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(Element),
    Text(String),
}

/// An owned XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    namespace: Option<String>,
    attrs: Vec<(String, String)>,
    nodes: Vec<Node>,
}

impl Element {
    /// Create an empty element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attrs: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Set the element's namespace (builder form).
    pub fn with_ns(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set an attribute (builder form).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child element (builder form).
    pub fn with_child(mut self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    /// Append character data (builder form).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.nodes.push(Node::Text(text.into()));
        self
    }

    /// Tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace, if one was set or inherited from the source document.
    pub fn ns(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Append a child element.
    pub fn append_child(&mut self, child: Element) {
        self.nodes.push(Node::Element(child));
    }

    /// Iterate over child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Iterate over child elements with the given tag name.
    pub fn children_named<'a: 'n, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Element> + 'n {
        self.children().filter(move |el| el.name == name)
    }

    /// First child element with the given tag name.
    pub fn get_child(&self, name: &str) -> Option<&Element> {
        self.children_named(name).next()
    }

    /// First child element with the given tag name and namespace.
    pub fn get_child_ns(&self, name: &str, namespace: &str) -> Option<&Element> {
        self.children_named(name)
            .find(|el| el.ns() == Some(namespace))
    }

    /// Concatenated direct character data of this element.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            if let Node::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }

    /// Text content of the first child element with the given name.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.get_child(name).map(Element::text)
    }

    /// Parse XML text into an element tree.
    ///
    /// Whitespace-only text nodes are dropped so that pretty-printed input
    /// produces the same tree as compact input.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Xml`](crate::RpcError::Xml) if the input is not
    /// well-formed XML.
    pub fn parse(xml: &str) -> Result<Element> {
        let doc = roxmltree::Document::parse(xml)?;
        Ok(convert(doc.root_element()))
    }
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());
    if let Some(namespace) = node.tag_name().namespace() {
        element.namespace = Some(namespace.to_string());
    }
    for attr in node.attributes() {
        element.attrs.push((attr.name().to_string(), attr.value().to_string()));
    }
    for child in node.children() {
        if child.is_element() {
            element.nodes.push(Node::Element(convert(child)));
        } else if child.is_text() {
            let text = child.text().unwrap_or("");
            if !text.trim().is_empty() {
                element.nodes.push(Node::Text(text.to_string()));
            }
        }
    }
    element
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

fn escape_attr(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
}

fn render(element: &Element, parent_ns: Option<&str>, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    if element.namespace.is_some() && element.ns() != parent_ns {
        out.push_str(" xmlns=\"");
        escape_attr(element.ns().unwrap_or(""), out);
        out.push('"');
    }
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(value, out);
        out.push('"');
    }
    if element.nodes.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    let ns = element.ns().or(parent_ns);
    for node in &element.nodes {
        match node {
            Node::Element(child) => render(child, ns, out),
            Node::Text(text) => escape_text(text, out),
        }
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        render(self, None, &mut out);
        f.write_str(&out)
    }
}
