use crate::exception::{Error, Result};
use crate::http::Request;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const ROLE_USER: &str = "ROLE_USER";
/// Holders of this role pass every role check.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
	pub id: i64,
	pub username: String,
	/// Argon2id PHC string.
	#[serde(skip_serializing)]
	pub password: String,
	pub role: String,
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
	pub registered_at: DateTime<Utc>,
	pub last_login_at: Option<DateTime<Utc>>,
	#[serde(skip_serializing)]
	pub session_token: Option<String>,
	pub profile_picture: Option<String>,
}

impl User {
	/// Whether this user may act with `role`.
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::apps::auth::{User, ROLE_ADMIN, ROLE_USER};
	/// use chrono::Utc;
	///
	/// let mut user = User {
	///     id: 1,
	///     username: "alice".into(),
	///     password: String::new(),
	///     role: ROLE_USER.into(),
	///     ip_address: None,
	///     user_agent: None,
	///     registered_at: Utc::now(),
	///     last_login_at: None,
	///     session_token: None,
	///     profile_picture: None,
	/// };
	/// assert!(user.has_role(ROLE_USER));
	/// assert!(!user.has_role(ROLE_ADMIN));
	///
	/// user.role = ROLE_ADMIN.into();
	/// assert!(user.has_role(ROLE_USER));
	/// ```
	pub fn has_role(&self, role: &str) -> bool {
		self.role == role || self.role == ROLE_ADMIN
	}
}

/// Fields needed to insert a user. `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
	pub username: String,
	pub password: String,
	pub role: String,
}

/// The authenticated user, stored in the request extensions by the
/// authorization middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
	pub fn user(&self) -> &User {
		&self.0
	}

	/// The user attached to `request`. Only guarded routes carry one.
	pub fn from_request(request: &Request) -> Result<&User> {
		request
			.extensions
			.get::<CurrentUser>()
			.map(CurrentUser::user)
			.ok_or_else(|| Error::Authentication("no authenticated user on request".to_string()))
	}
}
