//! Test harness for Tabula widgets.
//!
//! Mounts a widget, queries its rendered tree with selectors, triggers
//! events on matched elements and records the messages the widget emits.

use std::any::Any;
use std::fmt;

use tabula_core::{Element, Event, Key, Widget};

use crate::selector::Selector;

/// Test harness for interacting with a mounted widget.
pub struct Harness {
    /// Root widget being tested
    root: Box<dyn Widget>,
    /// Messages emitted so far, oldest first
    emitted: Vec<Box<dyn Any + Send>>,
}

impl Harness {
    /// Mount a widget.
    pub fn mount(root: impl Widget + 'static) -> Self {
        Self {
            root: Box::new(root),
            emitted: Vec::new(),
        }
    }

    /// Render the widget's current tree.
    #[must_use]
    pub fn render(&self) -> Element {
        self.root.render()
    }

    /// Render the widget as HTML.
    #[must_use]
    pub fn html(&self) -> String {
        self.root.to_html()
    }

    /// The mounted widget.
    #[must_use]
    pub fn widget(&self) -> &dyn Widget {
        &*self.root
    }

    // === Event Simulation ===

    /// Deliver an event to the widget, recording any message.
    pub fn dispatch(&mut self, event: &Event) -> &mut Self {
        if let Some(message) = self.root.event(event) {
            self.emitted.push(message);
        }
        self
    }

    /// Click the first element matching the selector.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        self.click_nth(selector, 0)
    }

    /// Click the `index`-th element matching the selector.
    ///
    /// Nothing happens when the element is missing or has no event target.
    pub fn click_nth(&mut self, selector: &str, index: usize) -> &mut Self {
        let event = self
            .find_all(selector)
            .get(index)
            .and_then(Element::click);
        if let Some(event) = event {
            self.dispatch(&event);
        }
        self
    }

    /// Set the value of the first field matching the selector.
    pub fn set_value(&mut self, selector: &str, value: &str) -> &mut Self {
        let target = self
            .find(selector)
            .and_then(|e| e.event_target().map(str::to_string));
        if let Some(target) = target {
            self.dispatch(&Event::input(target, value));
        }
        self
    }

    /// Press and release a key on the first element matching the selector.
    pub fn press_key(&mut self, selector: &str, key: Key) -> &mut Self {
        let target = self
            .find(selector)
            .and_then(|e| e.event_target().map(str::to_string));
        if let Some(target) = target {
            self.dispatch(&Event::KeyDown {
                target: target.clone(),
                key,
            });
            self.dispatch(&Event::KeyUp { target, key });
        }
        self
    }

    // === Queries ===

    /// First element matching the selector.
    #[must_use]
    pub fn find(&self, selector: &str) -> Option<Element> {
        let sel = Selector::parse(selector).ok()?;
        sel.query(&self.render()).cloned()
    }

    /// All elements matching the selector, in document order.
    #[must_use]
    pub fn find_all(&self, selector: &str) -> Vec<Element> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        sel.query_all(&self.render()).into_iter().cloned().collect()
    }

    /// Text content of the first matching element.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.find(selector)
            .map(|e| e.text_content().trim().to_string())
            .unwrap_or_default()
    }

    /// Check if an element exists.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.find(selector).is_some()
    }

    /// Number of elements matching the selector.
    #[must_use]
    pub fn count(&self, selector: &str) -> usize {
        self.find_all(selector).len()
    }

    // === Emitted messages ===

    /// Emitted messages of type `T`, oldest first.
    #[must_use]
    pub fn emitted<T: Clone + 'static>(&self) -> Vec<T> {
        self.emitted
            .iter()
            .filter_map(|m| m.downcast_ref::<T>())
            .cloned()
            .collect()
    }

    /// Total number of emitted messages.
    #[must_use]
    pub fn emitted_count(&self) -> usize {
        self.emitted.len()
    }

    /// Forget recorded messages.
    pub fn clear_emitted(&mut self) -> &mut Self {
        self.emitted.clear();
        self
    }

    /// Take all recorded messages.
    pub fn take_emitted(&mut self) -> Vec<Box<dyn Any + Send>> {
        std::mem::take(&mut self.emitted)
    }

    // === Assertions ===

    /// Assert that an element exists.
    ///
    /// # Panics
    ///
    /// Panics if the element does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected element matching '{selector}' to exist"
        );
        self
    }

    /// Assert that an element does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the element exists.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected element matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching elements.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.count(selector);
        assert_eq!(
            actual, expected,
            "Expected {expected} elements matching '{selector}' but found {actual}"
        );
        self
    }

    /// Assert the number of emitted messages.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_emitted_count(&self, expected: usize) -> &Self {
        let actual = self.emitted_count();
        assert_eq!(
            actual, expected,
            "Expected {expected} emitted messages but found {actual}"
        );
        self
    }
}

impl fmt::Debug for Harness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("html", &self.html())
            .field("emitted", &self.emitted.len())
            .finish()
    }
}
