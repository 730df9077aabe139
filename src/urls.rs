//! Named route table.
//!
//! Every route has a name. The authorization layer keys its access rules on
//! these names, so access control never depends on reflection over the
//! handlers themselves.

use crate::di::Container;
use crate::exception::{Error, Result};
use crate::http::{Handler, Request, Response};
use async_trait::async_trait;
use hyper::Method;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Name of the route a request resolved to, stored in the request
/// extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteName(pub &'static str);

/// How a route matches a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
	Exact(&'static str),
	/// Matches every path starting with the prefix.
	Prefix(&'static str),
}

impl PathPattern {
	fn matches(&self, path: &str) -> bool {
		match self {
			PathPattern::Exact(pattern) => *pattern == path,
			PathPattern::Prefix(prefix) => path.starts_with(prefix),
		}
	}
}

pub struct Route {
	pub name: &'static str,
	pub method: Method,
	pub pattern: PathPattern,
	handler: Arc<dyn Handler>,
}

/// Routes matched in registration order.
#[derive(Default)]
pub struct Router {
	routes: Vec<Route>,
}

impl Router {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn route(
		mut self,
		method: Method,
		pattern: PathPattern,
		name: &'static str,
		handler: impl Handler + 'static,
	) -> Self {
		self.routes.push(Route {
			name,
			method,
			pattern,
			handler: Arc::new(handler),
		});
		self
	}

	pub fn get(self, path: &'static str, name: &'static str, handler: impl Handler + 'static) -> Self {
		self.route(Method::GET, PathPattern::Exact(path), name, handler)
	}

	pub fn post(self, path: &'static str, name: &'static str, handler: impl Handler + 'static) -> Self {
		self.route(Method::POST, PathPattern::Exact(path), name, handler)
	}

	/// Serve every `GET` below `prefix` with `handler`.
	pub fn mount(
		self,
		prefix: &'static str,
		name: &'static str,
		handler: impl Handler + 'static,
	) -> Self {
		self.route(Method::GET, PathPattern::Prefix(prefix), name, handler)
	}

	/// Route serving `method` on `path`, if any.
	pub fn resolve(&self, method: &Method, path: &str) -> Option<&Route> {
		self.routes
			.iter()
			.find(|route| route.method == *method && route.pattern.matches(path))
	}

	/// Path registered under `name`. Prefix routes return their prefix.
	pub fn reverse(&self, name: &str) -> Option<&'static str> {
		self.routes
			.iter()
			.find(|route| route.name == name)
			.map(|route| match route.pattern {
				PathPattern::Exact(path) | PathPattern::Prefix(path) => path,
			})
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}
}

#[async_trait]
impl Handler for Router {
	async fn handle(&self, request: Request) -> Result<Response> {
		if let Some(route) = self.resolve(&request.method, request.path()) {
			return route.handler.handle(request).await;
		}
		if self
			.routes
			.iter()
			.any(|route| route.pattern.matches(request.path()))
		{
			return Err(Error::MethodNotAllowed(format!(
				"{} {}",
				request.method,
				request.path()
			)));
		}
		Err(Error::NotFound(request.path().to_string()))
	}
}

type ViewFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send>>;
type ViewFn = Box<dyn Fn(Arc<Container>, Request) -> ViewFuture + Send + Sync>;

/// Adapts an async view function `fn(Arc<Container>, Request)` to [`Handler`].
pub struct View {
	container: Arc<Container>,
	view: ViewFn,
}

/// Bind `view` to the container it reads its dependencies from.
pub fn view<F, Fut>(container: &Arc<Container>, view: F) -> View
where
	F: Fn(Arc<Container>, Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Response>> + Send + 'static,
{
	View {
		container: container.clone(),
		view: Box::new(move |container, request| Box::pin(view(container, request))),
	}
}

#[async_trait]
impl Handler for View {
	async fn handle(&self, request: Request) -> Result<Response> {
		(self.view)(self.container.clone(), request).await
	}
}
