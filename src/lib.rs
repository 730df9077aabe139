//! # admin-suite
//!
//! A small server-rendered admin suite: user authentication
//! (login / register / logout), a password-change page and a personal
//! todo-list manager.
//!
//! The crate is organised the way a project built on a Django-style
//! framework is:
//!
//! - [`http`], [`urls`], [`server`], [`middleware`]: request plumbing on
//!   top of hyper and tokio
//! - [`forms`], [`templates`], [`staticfiles`]: declarative form schemas,
//!   tera templates and embedded browser assets
//! - [`apps`]: the `auth` and `todos` applications (models, repositories,
//!   forms, views, routes)
//! - [`client`], [`notifications`]: the browser-side behaviors (edit
//!   popup, push notifications) modelled as plain Rust so their contract
//!   is testable
//! - [`config`]: route table, access table and the middleware stack
//! - [`conf`], [`logging`], [`db`], [`di`]: settings, tracing setup,
//!   the SQLite pool and the dependency container
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use admin_suite::conf::Settings;
//!
//! # async fn run() -> admin_suite::Result<()> {
//! let settings = Settings::load().map_err(|e| admin_suite::Error::Internal(e.to_string()))?;
//! admin_suite::config::serve(settings).await
//! # }
//! ```

pub mod apps;
pub mod client;
pub mod conf;
pub mod config;
pub mod db;
pub mod di;
pub mod exception;
pub mod forms;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod notifications;
pub mod server;
pub mod staticfiles;
pub mod templates;
pub mod urls;

pub use di::Container;
pub use exception::{Error, Result};
pub use http::{Handler, Middleware, MiddlewareChain, Request, Response};
