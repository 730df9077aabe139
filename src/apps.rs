//! Installed applications.
//!
//! Each application owns its models, repository, forms, views and route
//! table, the way a Django-style project splits its apps.

pub mod auth;
pub mod todos;
