//! Structural element trees produced by widgets.
//!
//! An [`Element`] is a tag with classes, ordered attributes, optional text
//! and children. Widgets render into it; hosts turn it into DOM nodes or
//! HTML text, and tests query it with selectors.

use crate::event::{Event, TARGET_ATTR};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Attribute carrying a stable test identifier.
pub const TEST_ID_ATTR: &str = "data-testid";

/// Tags rendered without a closing tag.
const VOID_TAGS: [&str; 4] = ["input", "br", "hr", "img"];

/// A node in a rendered element tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add a class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add a class when `condition` holds.
    #[must_use]
    pub fn class_if(self, condition: bool, class: impl Into<String>) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set a valueless attribute such as `disabled` when `condition` holds.
    #[must_use]
    pub fn flag(self, condition: bool, name: impl Into<String>) -> Self {
        if condition {
            self.attr(name, "")
        } else {
            self
        }
    }

    /// Set the event target.
    #[must_use]
    pub fn target(self, target: impl Into<String>) -> Self {
        self.attr(TARGET_ATTR, target)
    }

    /// Set the test identifier.
    #[must_use]
    pub fn test_id(self, id: impl Into<String>) -> Self {
        self.attr(TEST_ID_ATTR, id)
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Attribute value, if set.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether an attribute is set.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Event target, if the element is addressable.
    #[must_use]
    pub fn event_target(&self) -> Option<&str> {
        self.get_attr(TARGET_ATTR)
    }

    /// Whether the element is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.has_attr("disabled")
    }

    /// The element's own text, excluding children.
    #[must_use]
    pub fn own_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Concatenated text of the element and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Direct children.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// The element and all descendants in document order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.walk(&mut out);
        out
    }

    fn walk<'a>(&'a self, out: &mut Vec<&'a Self>) {
        out.push(self);
        for child in &self.children {
            child.walk(out);
        }
    }

    /// First element in document order matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&Self) -> bool) -> Option<&Self> {
        self.descendants().into_iter().find(|e| predicate(e))
    }

    /// All elements in document order matching `predicate`.
    pub fn find_all(&self, predicate: impl Fn(&Self) -> bool) -> Vec<&Self> {
        self.descendants()
            .into_iter()
            .filter(|e| predicate(e))
            .collect()
    }

    /// Find the element with the given test identifier.
    #[must_use]
    pub fn find_by_test_id(&self, id: &str) -> Option<&Self> {
        self.find(|e| e.get_attr(TEST_ID_ATTR) == Some(id))
    }

    /// Click event aimed at this element.
    ///
    /// Returns `None` when the element has no target.
    #[must_use]
    pub fn click(&self) -> Option<Event> {
        self.event_target().map(Event::click)
    }

    /// Serialize the tree as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape(value));
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Element {
        Element::new("div")
            .class("root")
            .child(Element::new("span").class("label").text("Name:"))
            .child(
                Element::new("button")
                    .test_id("go")
                    .target("go")
                    .flag(true, "disabled")
                    .text("Go"),
            )
    }

    #[test]
    fn test_element_builder() {
        let el = Element::new("div").class("a").class("a").class_if(false, "b");
        assert_eq!(el.tag(), "div");
        assert_eq!(el.classes(), ["a".to_string()]);
        assert!(el.has_class("a"));
        assert!(!el.has_class("b"));
    }

    #[test]
    fn test_element_queries() {
        let root = tree();
        assert_eq!(root.descendants().len(), 3);
        let button = root.find_by_test_id("go").unwrap();
        assert!(button.is_disabled());
        assert_eq!(button.event_target(), Some("go"));
        assert_eq!(root.text_content(), "Name:Go");
        assert_eq!(root.find_all(|e| e.tag() == "span").len(), 1);
    }

    #[test]
    fn test_element_click() {
        let root = tree();
        assert_eq!(root.click(), None);
        let button = root.find_by_test_id("go").unwrap();
        assert_eq!(button.click(), Some(Event::click("go")));
    }

    #[test]
    fn test_element_to_html() {
        let html = tree().to_html();
        assert_eq!(
            html,
            "<div class=\"root\"><span class=\"label\">Name:</span>\
             <button data-testid=\"go\" data-target=\"go\" disabled>Go</button></div>"
        );
    }

    #[test]
    fn test_element_to_html_void_and_escape() {
        let el = Element::new("input").attr("value", "a<b & \"c\"");
        assert_eq!(el.to_html(), "<input value=\"a&lt;b &amp; &quot;c&quot;\">");
        let el = Element::new("td").text("<script>");
        assert_eq!(el.to_html(), "<td>&lt;script&gt;</td>");
    }
}
