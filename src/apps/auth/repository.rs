use crate::apps::auth::models::{NewUser, User};
use crate::exception::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

/// Session fields written on a successful login.
#[derive(Debug, Clone)]
pub struct LoginRecord {
	pub session_token: String,
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
	pub at: DateTime<Utc>,
}

/// Storage for [`User`] rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
	async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

	async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

	async fn find_by_session_token(&self, token: &str) -> Result<Option<User>>;

	/// Insert `user`. A taken username is [`Error::Conflict`].
	async fn create(&self, user: NewUser) -> Result<User>;

	async fn record_login(&self, id: i64, login: LoginRecord) -> Result<()>;

	async fn clear_session(&self, id: i64) -> Result<()>;

	/// Replace the stored hash.
	async fn set_password(&self, id: i64, password_hash: &str) -> Result<()>;
}

pub struct SqliteUserRepository {
	pool: SqlitePool,
}

impl SqliteUserRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

const SELECT_USER: &str = "SELECT id, username, password, role, ip_address, user_agent, \
	registered_at, last_login_at, session_token, profile_picture FROM users";

#[async_trait]
impl UserRepository for SqliteUserRepository {
	async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
		Ok(sqlx::query_as(&format!("{SELECT_USER} WHERE id = ?"))
			.bind(id)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
		Ok(sqlx::query_as(&format!("{SELECT_USER} WHERE username = ?"))
			.bind(username)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn find_by_session_token(&self, token: &str) -> Result<Option<User>> {
		Ok(sqlx::query_as(&format!("{SELECT_USER} WHERE session_token = ?"))
			.bind(token)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn create(&self, user: NewUser) -> Result<User> {
		let id = sqlx::query("INSERT INTO users (username, password, role, registered_at) VALUES (?, ?, ?, ?)")
			.bind(&user.username)
			.bind(&user.password)
			.bind(&user.role)
			.bind(Utc::now())
			.execute(&self.pool)
			.await
			.map_err(|err| match err {
				sqlx::Error::Database(db) if db.is_unique_violation() => {
					Error::Conflict(format!("username {} is taken", user.username))
				}
				other => Error::Database(other),
			})?
			.last_insert_rowid();
		debug!(id, username = %user.username, "user created");
		self.find_by_id(id)
			.await?
			.ok_or_else(|| Error::Internal(format!("user {id} vanished after insert")))
	}

	async fn record_login(&self, id: i64, login: LoginRecord) -> Result<()> {
		sqlx::query(
			"UPDATE users SET session_token = ?, ip_address = ?, user_agent = ?, last_login_at = ? WHERE id = ?",
		)
		.bind(login.session_token)
		.bind(login.ip_address)
		.bind(login.user_agent)
		.bind(login.at)
		.bind(id)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn clear_session(&self, id: i64) -> Result<()> {
		sqlx::query("UPDATE users SET session_token = NULL WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	async fn set_password(&self, id: i64, password_hash: &str) -> Result<()> {
		let result = sqlx::query("UPDATE users SET password = ? WHERE id = ?")
			.bind(password_hash)
			.bind(id)
			.execute(&self.pool)
			.await?;
		if result.rows_affected() == 0 {
			return Err(Error::NotFound(format!("user {id}")));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::apps::auth::models::ROLE_USER;
	use crate::db;
	use rstest::*;

	#[fixture]
	async fn repository() -> SqliteUserRepository {
		let pool = db::connect_in_memory().await.unwrap();
		db::migrate(&pool).await.unwrap();
		SqliteUserRepository::new(pool)
	}

	fn new_user(username: &str) -> NewUser {
		NewUser {
			username: username.into(),
			password: "$argon2id$stub".into(),
			role: ROLE_USER.into(),
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_and_find(#[future] repository: SqliteUserRepository) {
		let repository = repository.await;

		let created = repository.create(new_user("alice")).await.unwrap();
		let found = repository.find_by_username("alice").await.unwrap().unwrap();

		assert_eq!(created, found);
		assert_eq!(found.role, ROLE_USER);
		assert!(found.session_token.is_none());
	}

	#[rstest]
	#[tokio::test]
	async fn test_duplicate_username_is_conflict(#[future] repository: SqliteUserRepository) {
		let repository = repository.await;
		repository.create(new_user("alice")).await.unwrap();

		let result = repository.create(new_user("alice")).await;

		assert!(matches!(result, Err(Error::Conflict(_))));
	}

	#[rstest]
	#[tokio::test]
	async fn test_session_round_trip(#[future] repository: SqliteUserRepository) {
		let repository = repository.await;
		let user = repository.create(new_user("alice")).await.unwrap();

		repository
			.record_login(
				user.id,
				LoginRecord {
					session_token: "tok-1".into(),
					ip_address: Some("203.0.113.9".into()),
					user_agent: Some("curl/8".into()),
					at: Utc::now(),
				},
			)
			.await
			.unwrap();
		let logged_in = repository.find_by_session_token("tok-1").await.unwrap().unwrap();

		assert_eq!(logged_in.id, user.id);
		assert_eq!(logged_in.ip_address.as_deref(), Some("203.0.113.9"));
		assert!(logged_in.last_login_at.is_some());

		repository.clear_session(user.id).await.unwrap();

		assert!(repository.find_by_session_token("tok-1").await.unwrap().is_none());
	}

	#[rstest]
	#[tokio::test]
	async fn test_set_password_unknown_user(#[future] repository: SqliteUserRepository) {
		let repository = repository.await;

		let result = repository.set_password(404, "hash").await;

		assert!(matches!(result, Err(Error::NotFound(_))));
	}
}
