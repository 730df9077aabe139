//! Declarative form schemas.
//!
//! A form is a set of fields, each carrying an ordered
//! [`ValidationChain`](validators::ValidationChain). Binding a form to
//! submitted data validates every field; the form then either exposes its
//! cleaned value or per-field error messages, and can be rendered again
//! with the submitted (non-secret) values.

pub mod fields;
pub mod form;
pub mod validators;

pub use fields::{CharField, FieldView, RepeatedField, Widget};
pub use form::{ALL_FIELDS_KEY, BoundForm, Form, FormContext, FormData, FormErrors};
pub use validators::{Rule, ValidationChain};
