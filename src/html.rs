//! Minimal HTML tree builder.
//!
//! The renderer produces a widget tree of [`Node`]s rather than concatenated
//! strings, so tests can assert on structure and serialization stays in one
//! place. Serialization escapes all text and attribute values; only
//! [`Node::Raw`] bypasses escaping, for content the caller explicitly trusts.

use std::fmt::Write as _;

/// Tags serialized without a closing tag
const VOID_TAGS: &[&str] = &["input", "img", "br", "hr", "meta", "link"];

/// A node in the widget tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with attributes and children
    Element(Element),
    /// Text content, escaped on serialization
    Text(String),
    /// Pre-rendered markup emitted verbatim
    Raw(String),
}

impl Node {
    /// Escaped text node
    pub fn text(content: impl Into<String>) -> Node {
        Node::Text(content.into())
    }

    /// Unescaped markup node
    pub fn raw(content: impl Into<String>) -> Node {
        Node::Raw(content.into())
    }

    /// Serialize the subtree to an HTML string
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Raw(markup) => out.push_str(markup),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Node {
        Node::Element(el)
    }
}

/// An HTML element under construction
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    flags: Vec<&'static str>,
    children: Vec<Node>,
}

impl Element {
    /// Start building an element
    pub fn new(tag: &'static str) -> Element {
        Element {
            tag,
            attrs: Vec::new(),
            flags: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the class attribute
    pub fn class(self, value: impl Into<String>) -> Element {
        self.attr("class", value)
    }

    /// Append a key="value" attribute
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Element {
        self.attrs.push((name, value.into()));
        self
    }

    /// Append an attribute only when the value is present
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Element {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Append a boolean attribute (`required`, `checked`, ...)
    pub fn flag(mut self, name: &'static str) -> Element {
        self.flags.push(name);
        self
    }

    /// Append a boolean attribute conditionally
    pub fn flag_if(self, name: &'static str, condition: bool) -> Element {
        if condition {
            self.flag(name)
        } else {
            self
        }
    }

    /// Append a child node
    pub fn child(mut self, node: impl Into<Node>) -> Element {
        self.children.push(node.into());
        self
    }

    /// Append several child nodes
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Element {
        self.children.extend(nodes);
        self
    }

    /// Append an escaped text child
    pub fn text(self, content: impl Into<String>) -> Element {
        self.child(Node::text(content))
    }

    /// Value of an attribute, if set
    #[cfg(test)]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
        }
        for flag in &self.flags {
            let _ = write!(out, " {}", flag);
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text content for element bodies
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for a double-quoted attribute
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(el: Element) -> String {
        Node::from(el).to_html()
    }

    #[test]
    fn test_element_serialization() {
        let el = Element::new("div")
            .class("forms-expert-group")
            .child(Element::new("span").text("hi"));
        assert_eq!(html(el), "<div class=\"forms-expert-group\"><span>hi</span></div>");
    }

    #[test]
    fn test_void_tags_have_no_closing_tag() {
        let el = Element::new("input").attr("type", "text").flag("required");
        assert_eq!(html(el), "<input type=\"text\" required>");
    }

    #[test]
    fn test_text_is_escaped() {
        let node = Node::text("<script>alert('x')</script>");
        assert_eq!(node.to_html(), "&lt;script&gt;alert('x')&lt;/script&gt;");
    }

    #[test]
    fn test_attribute_quotes_escaped() {
        let el = Element::new("input").attr("value", "say \"hi\" & 'bye'");
        assert_eq!(
            html(el),
            "<input value=\"say &quot;hi&quot; &amp; &#x27;bye&#x27;\">"
        );
    }

    #[test]
    fn test_raw_bypasses_escaping() {
        let node = Node::raw("<b>bold</b>");
        assert_eq!(node.to_html(), "<b>bold</b>");
    }
}
