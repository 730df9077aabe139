//! Browser-side behavior of the todo page, as a plain state machine.
//!
//! `assets/js/todo_edit.js` drives the real popup; this module states the
//! same contract in Rust so it can be tested without a browser.

pub mod popup;

pub use popup::{Effect, EditSession, EditTrigger, Element, Key, PopupEvent, PopupState};
