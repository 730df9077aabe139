//! Application-scoped dependency container.
//!
//! Built once at startup and shared behind an `Arc`; every view receives
//! it. All services are trait objects, so tests can replace any of them.

use crate::apps::auth::{
	Argon2Hasher, AuthService, DefaultAuthService, SqliteUserRepository, UserRepository,
};
use crate::apps::todos::{SqliteTodoRepository, TodoRepository};
use crate::conf::Settings;
use crate::exception::Result;
use crate::templates::Templates;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Container {
	pub settings: Settings,
	pub templates: Templates,
	pub users: Arc<dyn UserRepository>,
	pub todos: Arc<dyn TodoRepository>,
	pub auth: Arc<dyn AuthService>,
}

impl Container {
	/// Wire the default SQLite-backed services on `pool`.
	pub fn new(settings: Settings, pool: SqlitePool) -> Result<Self> {
		let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
		let auth = Arc::new(DefaultAuthService::new(
			users.clone(),
			Arc::new(Argon2Hasher::new()),
			settings.session_cookie.clone(),
		));
		Ok(Self {
			templates: Templates::new()?,
			todos: Arc::new(SqliteTodoRepository::new(pool)),
			users,
			auth,
			settings,
		})
	}

	/// Replace the authentication service.
	pub fn with_auth_service(mut self, auth: Arc<dyn AuthService>) -> Self {
		self.auth = auth;
		self
	}

	pub fn into_shared(self) -> Arc<Self> {
		Arc::new(self)
	}
}
