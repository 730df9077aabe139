//! The authentication seam.
//!
//! Views and the authorization middleware only talk to [`AuthService`], so
//! tests can swap in a double that reports any user as logged in.

use crate::apps::auth::hasher::PasswordHasher;
use crate::apps::auth::models::{NewUser, ROLE_USER, User};
use crate::apps::auth::repository::{LoginRecord, UserRepository};
use crate::exception::Result;
use crate::http::Request;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Where a login came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
}

impl ClientInfo {
	/// `trust_forwarded_for` mirrors the setting of the same name.
	pub fn from_request(request: &Request, trust_forwarded_for: bool) -> Self {
		Self {
			ip_address: request.client_ip(trust_forwarded_for),
			user_agent: request.user_agent().map(str::to_string),
		}
	}
}

#[async_trait]
pub trait AuthService: Send + Sync {
	/// The user whose password matches, if any.
	async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>>;

	/// The user the request's session cookie belongs to.
	async fn current_user(&self, request: &Request) -> Result<Option<User>>;

	/// Open a session for `user`, returning the token to put in the cookie.
	async fn start_session(&self, user: &User, client: ClientInfo) -> Result<String>;

	async fn end_session(&self, user: &User) -> Result<()>;

	/// Create an account with role `ROLE_USER`. `password` must already
	/// have passed the registration form.
	async fn register(&self, username: &str, password: &str) -> Result<User>;

	/// Store a new password. `password` must already have passed the
	/// password-change form.
	async fn change_password(&self, user: &User, password: &str) -> Result<()>;
}

/// [`AuthService`] backed by the user repository and a password hasher.
pub struct DefaultAuthService {
	users: Arc<dyn UserRepository>,
	hasher: Arc<dyn PasswordHasher>,
	cookie_name: String,
}

impl DefaultAuthService {
	pub fn new(
		users: Arc<dyn UserRepository>,
		hasher: Arc<dyn PasswordHasher>,
		cookie_name: impl Into<String>,
	) -> Self {
		Self {
			users,
			hasher,
			cookie_name: cookie_name.into(),
		}
	}
}

#[async_trait]
impl AuthService for DefaultAuthService {
	async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
		let Some(user) = self.users.find_by_username(username).await? else {
			debug!(username, "login for unknown user");
			return Ok(None);
		};
		if self.hasher.verify(password, &user.password)? {
			Ok(Some(user))
		} else {
			warn!(username, "login with wrong password");
			Ok(None)
		}
	}

	async fn current_user(&self, request: &Request) -> Result<Option<User>> {
		match request.cookie(&self.cookie_name) {
			Some(token) if !token.is_empty() => self.users.find_by_session_token(token).await,
			_ => Ok(None),
		}
	}

	async fn start_session(&self, user: &User, client: ClientInfo) -> Result<String> {
		let token = Uuid::new_v4().to_string();
		self.users
			.record_login(
				user.id,
				LoginRecord {
					session_token: token.clone(),
					ip_address: client.ip_address,
					user_agent: client.user_agent,
					at: Utc::now(),
				},
			)
			.await?;
		info!(user_id = user.id, username = %user.username, "session started");
		Ok(token)
	}

	async fn end_session(&self, user: &User) -> Result<()> {
		self.users.clear_session(user.id).await?;
		info!(user_id = user.id, username = %user.username, "session ended");
		Ok(())
	}

	async fn register(&self, username: &str, password: &str) -> Result<User> {
		let password = self.hasher.hash(password)?;
		let user = self
			.users
			.create(NewUser {
				username: username.to_string(),
				password,
				role: ROLE_USER.to_string(),
			})
			.await?;
		info!(user_id = user.id, username, "user registered");
		Ok(user)
	}

	async fn change_password(&self, user: &User, password: &str) -> Result<()> {
		let hash = self.hasher.hash(password)?;
		self.users.set_password(user.id, &hash).await?;
		info!(user_id = user.id, "password changed");
		Ok(())
	}
}
