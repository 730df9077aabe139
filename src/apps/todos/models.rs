use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of a user's todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Todo {
	pub id: i64,
	/// Owner, `users.id`.
	pub user_id: i64,
	pub text: String,
	pub created_at: DateTime<Utc>,
}
