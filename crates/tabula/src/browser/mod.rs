//! Browser runtime for Tabula WASM builds.
//!
//! Provides the host capabilities the core leaves abstract: file download
//! through an anchor element, timer-driven debouncing, and a mounted
//! [`TableApp`] that routes DOM events into a [`TableState`](crate::TableState).

pub mod app;
pub mod download;
pub mod timer;

pub use app::TableApp;
pub use download::BrowserFileSaver;
pub use timer::TimeoutDebouncer;
