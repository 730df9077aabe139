//! SQLite connection pool and schema migrations.

use crate::exception::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Open a pool on `database_url`, creating the database file if needed.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
	let options = SqliteConnectOptions::from_str(database_url)?
		.create_if_missing(true)
		.foreign_keys(true);
	let pool = SqlitePoolOptions::new()
		.max_connections(5)
		.connect_with(options)
		.await?;
	info!(database_url, "database connected");
	Ok(pool)
}

/// A private in-memory database.
///
/// The pool holds exactly one connection that never expires: every SQLite
/// memory connection is its own database.
pub async fn connect_in_memory() -> Result<SqlitePool> {
	let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.min_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect_with(options)
		.await?;
	Ok(pool)
}

/// Apply the migrations under `migrations/`.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
	sqlx::migrate!("./migrations").run(pool).await?;
	Ok(())
}
