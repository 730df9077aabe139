//! Push notifications shown by the service worker.

pub mod push;

pub use push::{Notification, PushError, PushPayload};
