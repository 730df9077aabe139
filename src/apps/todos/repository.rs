use crate::apps::todos::models::Todo;
use crate::exception::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

/// Storage for [`Todo`] rows. Every operation is scoped to an owner.
#[async_trait]
pub trait TodoRepository: Send + Sync {
	/// The owner's todos, newest first.
	async fn list_for_user(&self, user_id: i64) -> Result<Vec<Todo>>;

	/// `None` when the todo does not exist or belongs to someone else.
	async fn find_for_user(&self, id: i64, user_id: i64) -> Result<Option<Todo>>;

	async fn create(&self, user_id: i64, text: &str) -> Result<Todo>;

	/// Returns whether a row owned by `user_id` was updated.
	async fn update_text(&self, id: i64, user_id: i64, text: &str) -> Result<bool>;

	/// Returns whether a row owned by `user_id` was deleted.
	async fn delete(&self, id: i64, user_id: i64) -> Result<bool>;
}

pub struct SqliteTodoRepository {
	pool: SqlitePool,
}

impl SqliteTodoRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
	async fn list_for_user(&self, user_id: i64) -> Result<Vec<Todo>> {
		Ok(sqlx::query_as(
			"SELECT id, user_id, text, created_at FROM todos WHERE user_id = ? ORDER BY id DESC",
		)
		.bind(user_id)
		.fetch_all(&self.pool)
		.await?)
	}

	async fn find_for_user(&self, id: i64, user_id: i64) -> Result<Option<Todo>> {
		Ok(
			sqlx::query_as("SELECT id, user_id, text, created_at FROM todos WHERE id = ? AND user_id = ?")
				.bind(id)
				.bind(user_id)
				.fetch_optional(&self.pool)
				.await?,
		)
	}

	async fn create(&self, user_id: i64, text: &str) -> Result<Todo> {
		let id = sqlx::query("INSERT INTO todos (user_id, text, created_at) VALUES (?, ?, ?)")
			.bind(user_id)
			.bind(text)
			.bind(Utc::now())
			.execute(&self.pool)
			.await?
			.last_insert_rowid();
		self.find_for_user(id, user_id)
			.await?
			.ok_or_else(|| Error::Internal(format!("todo {id} vanished after insert")))
	}

	async fn update_text(&self, id: i64, user_id: i64, text: &str) -> Result<bool> {
		let result = sqlx::query("UPDATE todos SET text = ? WHERE id = ? AND user_id = ?")
			.bind(text)
			.bind(id)
			.bind(user_id)
			.execute(&self.pool)
			.await?;
		Ok(result.rows_affected() > 0)
	}

	async fn delete(&self, id: i64, user_id: i64) -> Result<bool> {
		let result = sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
			.bind(id)
			.bind(user_id)
			.execute(&self.pool)
			.await?;
		Ok(result.rows_affected() > 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::apps::auth::{NewUser, ROLE_USER, SqliteUserRepository, UserRepository};
	use crate::db;
	use rstest::*;

	struct Fixture {
		todos: SqliteTodoRepository,
		users: SqliteUserRepository,
	}

	impl Fixture {
		async fn user(&self, username: &str) -> i64 {
			self.users
				.create(NewUser {
					username: username.into(),
					password: "$argon2id$stub".into(),
					role: ROLE_USER.into(),
				})
				.await
				.unwrap()
				.id
		}
	}

	#[fixture]
	async fn fixture() -> Fixture {
		let pool = db::connect_in_memory().await.unwrap();
		db::migrate(&pool).await.unwrap();
		Fixture {
			todos: SqliteTodoRepository::new(pool.clone()),
			users: SqliteUserRepository::new(pool),
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_list_is_scoped_and_newest_first(#[future] fixture: Fixture) {
		let fixture = fixture.await;
		let alice = fixture.user("alice").await;
		let bob = fixture.user("bob").await;
		fixture.todos.create(alice, "first").await.unwrap();
		fixture.todos.create(alice, "second").await.unwrap();
		fixture.todos.create(bob, "not yours").await.unwrap();

		let texts: Vec<String> = fixture
			.todos
			.list_for_user(alice)
			.await
			.unwrap()
			.into_iter()
			.map(|todo| todo.text)
			.collect();

		assert_eq!(texts, vec!["second", "first"]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_foreign_todo_is_untouchable(#[future] fixture: Fixture) {
		let fixture = fixture.await;
		let alice = fixture.user("alice").await;
		let bob = fixture.user("bob").await;
		let todo = fixture.todos.create(alice, "mine").await.unwrap();

		assert!(fixture.todos.find_for_user(todo.id, bob).await.unwrap().is_none());
		assert!(!fixture.todos.update_text(todo.id, bob, "hijacked").await.unwrap());
		assert!(!fixture.todos.delete(todo.id, bob).await.unwrap());
		assert_eq!(
			fixture.todos.find_for_user(todo.id, alice).await.unwrap().unwrap().text,
			"mine"
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_update_and_delete(#[future] fixture: Fixture) {
		let fixture = fixture.await;
		let alice = fixture.user("alice").await;
		let todo = fixture.todos.create(alice, "draft").await.unwrap();

		assert!(fixture.todos.update_text(todo.id, alice, "final").await.unwrap());
		assert_eq!(
			fixture.todos.find_for_user(todo.id, alice).await.unwrap().unwrap().text,
			"final"
		);
		assert!(fixture.todos.delete(todo.id, alice).await.unwrap());
		assert!(fixture.todos.list_for_user(alice).await.unwrap().is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_text_over_1024_rejected_by_schema(#[future] fixture: Fixture) {
		let fixture = fixture.await;
		let alice = fixture.user("alice").await;

		let result = fixture.todos.create(alice, &"x".repeat(1025)).await;

		assert!(matches!(result, Err(Error::Database(_))));
	}
}
