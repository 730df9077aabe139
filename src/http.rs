//! Request/response types and the handler and middleware traits.
//!
//! ## Handler
//!
//! ```rust
//! use admin_suite::http::{Handler, Request, Response};
//! use async_trait::async_trait;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     async fn handle(&self, _request: Request) -> admin_suite::Result<Response> {
//!         Ok(Response::ok().with_body("Hello!"))
//!     }
//! }
//! ```
//!
//! ## Middleware
//!
//! Middleware wraps the next handler in the chain:
//!
//! ```rust
//! use admin_suite::http::{Handler, Middleware, Request, Response};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Passthrough;
//!
//! #[async_trait]
//! impl Middleware for Passthrough {
//!     async fn process(&self, request: Request, next: Arc<dyn Handler>) -> admin_suite::Result<Response> {
//!         next.handle(request).await
//!     }
//! }
//! ```

mod request;
mod response;

pub use request::{Request, RequestBuilder};
pub use response::{Response, SetCookie};

use crate::exception::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Processes a request into a response.
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Wraps a handler to add a cross-cutting concern.
#[async_trait]
pub trait Middleware: Send + Sync {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;

	/// Whether this middleware runs for `request`. Skipped middleware hands
	/// the request straight to the next handler.
	fn should_continue(&self, _request: &Request) -> bool {
		true
	}
}

/// Composes middleware around a final handler.
///
/// Middleware run in insertion order: the first one added sees the request
/// first and the response last.
pub struct MiddlewareChain {
	middlewares: Vec<Arc<dyn Middleware>>,
	handler: Arc<dyn Handler>,
}

impl MiddlewareChain {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			middlewares: Vec::new(),
			handler,
		}
	}

	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	pub fn len(&self) -> usize {
		self.middlewares.len()
	}

	pub fn is_empty(&self) -> bool {
		self.middlewares.is_empty()
	}
}

struct Next {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for Next {
	async fn handle(&self, request: Request) -> Result<Response> {
		if self.middleware.should_continue(&request) {
			self.middleware.process(request, self.next.clone()).await
		} else {
			self.next.handle(request).await
		}
	}
}

#[async_trait]
impl Handler for MiddlewareChain {
	async fn handle(&self, request: Request) -> Result<Response> {
		let mut next = self.handler.clone();
		for middleware in self.middlewares.iter().rev() {
			next = Arc::new(Next {
				middleware: middleware.clone(),
				next,
			});
		}
		next.handle(request).await
	}
}
