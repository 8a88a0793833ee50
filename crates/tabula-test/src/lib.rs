#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
//! Testing harness for Tabula widgets.
//!
//! Mount a widget, query its rendered element tree with CSS-like
//! selectors, trigger clicks and input, and inspect emitted messages:
//!
//! ```
//! use tabula_core::{Element, Event, TypeId, Widget};
//! use tabula_test::Harness;
//! use std::any::Any;
//!
//! struct Hello;
//!
//! impl Widget for Hello {
//!     fn type_id(&self) -> TypeId {
//!         TypeId::of::<Self>()
//!     }
//!
//!     fn render(&self) -> Element {
//!         Element::new("p").class("greeting").text("Hello")
//!     }
//!
//!     fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
//!         None
//!     }
//! }
//!
//! let harness = Harness::mount(Hello);
//! harness.assert_text("p.greeting", "Hello");
//! ```

mod harness;
mod selector;

pub use harness::Harness;
pub use selector::{Selector, SelectorError, SelectorParser};
