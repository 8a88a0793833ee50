//! CSS-like selector parsing for element queries.
//!
//! Supports:
//! - `"button"` - by tag
//! - `"#submit-btn"` - by `id` attribute
//! - `".active"` - by class
//! - `"[data-testid='login']"` - by test ID
//! - `"[disabled]"`, `"[aria-label='Close']"` - by attribute
//! - `"tr.table-row.active"` - compound selectors
//! - `"tbody tr"`, `".table-header-cell > .flex-contents"` - combinators

use tabula_core::{Element, TEST_ID_ATTR};

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by tag name
    Type(String),
    /// Match by ID (e.g., `#my-id`)
    Id(String),
    /// Match by test ID (e.g., `[data-testid='foo']`)
    TestId(String),
    /// Match by class (e.g., `.my-class`)
    Class(String),
    /// Match by attribute presence or value (e.g., `[aria-label='foo']`)
    Attribute {
        /// Attribute name
        name: String,
        /// Required value; `None` only checks presence
        value: Option<String>,
    },
    /// All parts match the same element (e.g., `div.column.visible`)
    Compound(Vec<Selector>),
    /// Descendant combinator (e.g., `tbody tr`)
    Descendant(Box<Selector>, Box<Selector>),
    /// Child combinator (e.g., `tr > td`)
    Child(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches a single element, ignoring ancestry.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        self.matches_path(&[element])
    }

    /// Check if this selector matches the last element of `path`.
    ///
    /// `path` runs from the root down to the candidate element.
    #[must_use]
    pub fn matches_path(&self, path: &[&Element]) -> bool {
        let Some((element, ancestors)) = path.split_last() else {
            return false;
        };
        match self {
            Self::Type(tag) => element.tag() == tag,
            Self::Id(id) => element.get_attr("id") == Some(id.as_str()),
            Self::TestId(id) => element.get_attr(TEST_ID_ATTR) == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Attribute { name, value } => match value {
                Some(value) => element.get_attr(name) == Some(value.as_str()),
                None => element.has_attr(name),
            },
            Self::Compound(parts) => parts.iter().all(|p| p.matches_path(path)),
            Self::Descendant(ancestor, selector) => {
                selector.matches_path(path)
                    && (1..=ancestors.len()).any(|end| ancestor.matches_path(&ancestors[..end]))
            }
            Self::Child(parent, selector) => {
                selector.matches_path(path)
                    && !ancestors.is_empty()
                    && parent.matches_path(ancestors)
            }
        }
    }

    /// All elements under `root` (inclusive) matching this selector, in
    /// document order.
    #[must_use]
    pub fn query_all<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let mut path = Vec::new();
        let mut out = Vec::new();
        self.collect(root, &mut path, &mut out);
        out
    }

    /// First element under `root` (inclusive) matching this selector.
    #[must_use]
    pub fn query<'a>(&self, root: &'a Element) -> Option<&'a Element> {
        self.query_all(root).into_iter().next()
    }

    fn collect<'a>(
        &self,
        element: &'a Element,
        path: &mut Vec<&'a Element>,
        out: &mut Vec<&'a Element>,
    ) {
        path.push(element);
        if self.matches_path(path) {
            out.push(element);
        }
        for child in element.children() {
            self.collect(child, path, out);
        }
        path.pop();
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();

        if self.peek_char().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selector = self.parse_compound()?;
        loop {
            let had_space = self.skip_whitespace();
            match self.peek_char() {
                None => return Ok(selector),
                Some('>') => {
                    self.advance();
                    self.skip_whitespace();
                    let rhs = self.parse_compound()?;
                    selector = Selector::Child(Box::new(selector), Box::new(rhs));
                }
                Some(_) if had_space => {
                    let rhs = self.parse_compound()?;
                    selector = Selector::Descendant(Box::new(selector), Box::new(rhs));
                }
                Some(c) => return Err(SelectorError::UnexpectedChar(c)),
            }
        }
    }

    fn parse_compound(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = Vec::new();
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == '>' {
                break;
            }
            parts.push(self.parse_simple()?);
        }

        match parts.len() {
            0 => match self.peek_char() {
                Some(c) => Err(SelectorError::UnexpectedChar(c)),
                None => Err(SelectorError::ExpectedIdentifier),
            },
            1 => Ok(parts.remove(0)),
            _ => Ok(Selector::Compound(parts)),
        }
    }

    fn parse_simple(&mut self) -> Result<Selector, SelectorError> {
        let first = self.peek_char().ok_or(SelectorError::Empty)?;

        match first {
            '#' => self.parse_id(),
            '.' => self.parse_class(),
            '[' => self.parse_attribute(),
            _ if first.is_alphabetic() => self.parse_type(),
            _ => Err(SelectorError::UnexpectedChar(first)),
        }
    }

    fn parse_id(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '#'
        let id = self.read_identifier()?;
        Ok(Selector::Id(id))
    }

    fn parse_class(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '.'
        let class = self.read_identifier()?;
        Ok(Selector::Class(class))
    }

    fn parse_type(&mut self) -> Result<Selector, SelectorError> {
        let name = self.read_identifier()?;
        Ok(Selector::Type(name))
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '['

        let name = self.read_until_any(&['=', ']']).trim().to_string();
        if name.is_empty() {
            return Err(SelectorError::InvalidAttribute);
        }

        let value = if self.peek_char() == Some('=') {
            self.advance();
            let quote = self.peek_char().filter(|c| *c == '\'' || *c == '"');
            let value = match quote {
                Some(q) => {
                    self.advance();
                    let value = self.read_until_any(&[q]);
                    if self.peek_char() != Some(q) {
                        return Err(SelectorError::UnclosedAttribute);
                    }
                    self.advance();
                    value
                }
                None => self.read_until_any(&[']']).trim().to_string(),
            };
            Some(value)
        } else {
            None
        };

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        match value {
            Some(value) if name == TEST_ID_ATTR => Ok(Selector::TestId(value)),
            value => Ok(Selector::Attribute { name, value }),
        }
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
        self.pos > start
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Empty selector
    Empty,
    /// Unexpected character
    UnexpectedChar(char),
    /// Expected identifier
    ExpectedIdentifier,
    /// Invalid attribute syntax
    InvalidAttribute,
    /// Unclosed attribute bracket or quote
    UnclosedAttribute,
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character: '{c}'"),
            Self::ExpectedIdentifier => write!(f, "expected identifier"),
            Self::InvalidAttribute => write!(f, "invalid attribute syntax"),
            Self::UnclosedAttribute => write!(f, "unclosed attribute bracket"),
        }
    }
}

impl std::error::Error for SelectorError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> Element {
        Element::new("table").test_id("dynamic-table").with_children([
            Element::new("thead").child(
                Element::new("tr").child(
                    Element::new("th")
                        .class("table-header-cell")
                        .class("sortable")
                        .child(Element::new("div").class("flex-contents").text("Name")),
                ),
            ),
            Element::new("tbody").with_children([
                Element::new("tr").class("table-row").class("active").attr("id", "r1"),
                Element::new("tr").class("table-row").flag(true, "disabled"),
            ]),
        ])
    }

    #[test]
    fn test_parse_type() {
        let sel = Selector::parse("button").unwrap();
        assert_eq!(sel, Selector::Type("button".to_string()));
    }

    #[test]
    fn test_parse_id() {
        let sel = Selector::parse("#submit-btn").unwrap();
        assert_eq!(sel, Selector::Id("submit-btn".to_string()));
    }

    #[test]
    fn test_parse_class() {
        let sel = Selector::parse(".primary").unwrap();
        assert_eq!(sel, Selector::Class("primary".to_string()));
    }

    #[test]
    fn test_parse_test_id() {
        let sel = Selector::parse("[data-testid='login']").unwrap();
        assert_eq!(sel, Selector::TestId("login".to_string()));
        let sel = Selector::parse("[data-testid=\"login\"]").unwrap();
        assert_eq!(sel, Selector::TestId("login".to_string()));
    }

    #[test]
    fn test_parse_attribute() {
        let sel = Selector::parse("[aria-label='Close']").unwrap();
        assert_eq!(
            sel,
            Selector::Attribute {
                name: "aria-label".to_string(),
                value: Some("Close".to_string()),
            }
        );
        let sel = Selector::parse("[disabled]").unwrap();
        assert_eq!(
            sel,
            Selector::Attribute {
                name: "disabled".to_string(),
                value: None,
            }
        );
    }

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse("div.column.visible").unwrap();
        assert_eq!(
            sel,
            Selector::Compound(vec![
                Selector::Type("div".into()),
                Selector::Class("column".into()),
                Selector::Class("visible".into()),
            ])
        );
    }

    #[test]
    fn test_parse_combinators() {
        let sel = Selector::parse("tbody tr").unwrap();
        assert!(matches!(sel, Selector::Descendant(_, _)));
        let sel = Selector::parse(".table-header-cell>.flex-contents").unwrap();
        assert!(matches!(sel, Selector::Child(_, _)));
        let sel = Selector::parse("a  >  b c").unwrap();
        match sel {
            Selector::Descendant(lhs, _) => assert!(matches!(*lhs, Selector::Child(_, _))),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("[=x]"), Err(SelectorError::InvalidAttribute));
        assert_eq!(Selector::parse("[a='x"), Err(SelectorError::UnclosedAttribute));
        assert_eq!(Selector::parse("[a=x"), Err(SelectorError::UnclosedAttribute));
        assert_eq!(Selector::parse("@"), Err(SelectorError::UnexpectedChar('@')));
        assert_eq!(Selector::parse("a >"), Err(SelectorError::ExpectedIdentifier));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(SelectorError::Empty.to_string(), "empty selector");
        assert_eq!(
            SelectorError::UnexpectedChar('!').to_string(),
            "unexpected character: '!'"
        );
    }

    #[test]
    fn test_query_descendant() {
        let root = table();
        let rows = Selector::parse("tbody tr").unwrap().query_all(&root);
        assert_eq!(rows.len(), 2);
        let header_rows = Selector::parse("thead tr").unwrap().query_all(&root);
        assert_eq!(header_rows.len(), 1);
    }

    #[test]
    fn test_query_child() {
        let root = table();
        let labels = Selector::parse(".table-header-cell>.flex-contents")
            .unwrap()
            .query_all(&root);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text_content(), "Name");
        let none = Selector::parse("table > tr").unwrap().query_all(&root);
        assert!(none.is_empty());
    }

    #[test]
    fn test_query_compound_and_attrs() {
        let root = table();
        assert_eq!(Selector::parse("tr.table-row.active").unwrap().query_all(&root).len(), 1);
        assert_eq!(Selector::parse("tr[disabled]").unwrap().query_all(&root).len(), 1);
        assert!(Selector::parse("#r1").unwrap().query(&root).is_some());
        assert!(Selector::parse("table[data-testid='dynamic-table']")
            .unwrap()
            .query(&root)
            .is_some());
    }

    #[test]
    fn test_matches_single_element() {
        let el = Element::new("div").class("column").class("hidden");
        assert!(Selector::parse("div.column").unwrap().matches(&el));
        assert!(!Selector::parse("div.visible").unwrap().matches(&el));
        assert!(!Selector::parse("section div").unwrap().matches(&el));
    }

    proptest! {
        #[test]
        fn prop_class_selector_counts_classed_children(
            flags in prop::collection::vec(any::<bool>(), 0..12),
        ) {
            let root = Element::new("div").with_children(
                flags.iter().map(|on| Element::new("span").class_if(*on, "hit")),
            );
            let expected = flags.iter().filter(|on| **on).count();
            let found = Selector::parse("div > span.hit").unwrap().query_all(&root).len();
            prop_assert_eq!(found, expected);
        }

        #[test]
        fn prop_identifier_parses_as_class(name in "[a-z][a-z0-9_-]{0,10}") {
            let sel = Selector::parse(&format!(".{name}")).unwrap();
            prop_assert_eq!(sel, Selector::Class(name));
        }
    }
}
