//! Role-based access control keyed on route names.

use crate::apps::auth::models::CurrentUser;
use crate::apps::auth::urls::LOGIN_PATH;
use crate::di::Container;
use crate::exception::{Error, Result};
use crate::http::{Handler, Middleware, Request, Response};
use crate::urls::{RouteName, Router};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Required role per route name. Routes without an entry are public.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessTable {
	rules: HashMap<&'static str, String>,
}

impl AccessTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Require `role` for the route named `route`.
	pub fn require(mut self, route: &'static str, role: impl Into<String>) -> Self {
		self.rules.insert(route, role.into());
		self
	}

	pub fn required_role(&self, route: &str) -> Option<&str> {
		self.rules.get(route).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}

/// Enforces an [`AccessTable`].
///
/// For a guarded route, an anonymous request is redirected to the login
/// page and a user lacking the role is refused with `403`. Otherwise the
/// user is attached to the request as [`CurrentUser`].
pub struct AuthorizationMiddleware {
	router: Arc<Router>,
	access: AccessTable,
	container: Arc<Container>,
}

impl AuthorizationMiddleware {
	pub fn new(router: Arc<Router>, access: AccessTable, container: Arc<Container>) -> Self {
		Self {
			router,
			access,
			container,
		}
	}
}

#[async_trait]
impl Middleware for AuthorizationMiddleware {
	async fn process(&self, mut request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let Some(route) = self.router.resolve(&request.method, request.path()) else {
			return next.handle(request).await;
		};
		let name = route.name;
		request.extensions.insert(RouteName(name));
		let Some(role) = self.access.required_role(name) else {
			return next.handle(request).await;
		};

		match self.container.auth.current_user(&request).await? {
			None => {
				debug!(route = name, "anonymous request to guarded route");
				Ok(Response::redirect(LOGIN_PATH))
			}
			Some(user) if !user.has_role(role) => {
				debug!(route = name, user_id = user.id, role = %user.role, required = role, "role check failed");
				Err(Error::Forbidden(format!("{role} required")))
			}
			Some(user) => {
				request.extensions.insert(CurrentUser(user));
				next.handle(request).await
			}
		}
	}
}
