//! Shared helpers for the end-to-end view tests.
//!
//! Every test app runs on its own in-memory SQLite database with the real
//! route table and middleware stack. `login_as` swaps the authentication
//! service for a mock that reports a fixed user as logged in.

#![allow(dead_code)]

use admin_suite::apps::auth::{AuthService, ClientInfo, ROLE_USER, User};
use admin_suite::conf::Settings;
use admin_suite::config::middleware::application;
use admin_suite::http::{Handler, Request, Response};
use admin_suite::server::dispatch;
use admin_suite::{Container, Result, db};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use hyper::Method;
use mockall::mock;
use sqlx::SqlitePool;
use std::sync::Arc;

mock! {
	pub AuthService {}

	#[async_trait]
	impl AuthService for AuthService {
		async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>>;
		async fn current_user(&self, request: &Request) -> Result<Option<User>>;
		async fn start_session(&self, user: &User, client: ClientInfo) -> Result<String>;
		async fn end_session(&self, user: &User) -> Result<()>;
		async fn register(&self, username: &str, password: &str) -> Result<User>;
		async fn change_password(&self, user: &User, password: &str) -> Result<()>;
	}
}

/// A user with every field set.
pub fn fake_user(id: i64, username: &str, role: &str) -> User {
	User {
		id,
		username: username.to_string(),
		password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNo".to_string(),
		role: role.to_string(),
		ip_address: Some("192.0.2.10".to_string()),
		user_agent: Some("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0".to_string()),
		registered_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
		last_login_at: Some(Utc.with_ymd_and_hms(2024, 6, 7, 8, 9, 10).unwrap()),
		session_token: Some(format!("session-{id}")),
		profile_picture: Some(format!("/media/avatars/{username}.png")),
	}
}

/// A mocked [`AuthService`] whose `current_user` is always `user`.
/// Further expectations can be added before installing it.
pub fn login_as(user: &User) -> MockAuthService {
	let user = user.clone();
	let mut auth = MockAuthService::new();
	auth.expect_current_user()
		.returning(move |_| Ok(Some(user.clone())));
	auth
}

pub struct TestApp {
	pub pool: SqlitePool,
	pub container: Arc<Container>,
	handler: Arc<dyn Handler>,
}

impl TestApp {
	/// App with the real SQLite-backed authentication service.
	pub async fn new() -> Self {
		Self::build(Settings::default(), None).await
	}

	/// Real authentication service, custom settings.
	pub async fn with_settings(settings: Settings) -> Self {
		Self::build(settings, None).await
	}

	/// App whose authentication service is `auth`.
	pub async fn with_auth(auth: impl AuthService + 'static) -> Self {
		Self::build(Settings::default(), Some(Arc::new(auth))).await
	}

	async fn build(settings: Settings, auth: Option<Arc<dyn AuthService>>) -> Self {
		let pool = db::connect_in_memory().await.unwrap();
		db::migrate(&pool).await.unwrap();
		let mut container = Container::new(settings, pool.clone()).unwrap();
		if let Some(auth) = auth {
			container = container.with_auth_service(auth);
		}
		let container = container.into_shared();
		Self {
			pool,
			handler: application(container.clone()),
			container,
		}
	}

	pub async fn send(&self, request: Request) -> Response {
		dispatch(self.handler.as_ref(), request).await
	}

	pub async fn get(&self, uri: &str) -> Response {
		self.send(Request::builder().uri(uri).build().unwrap()).await
	}

	pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> Response {
		self.send(
			Request::builder()
				.uri(uri)
				.header("cookie", cookie)
				.build()
				.unwrap(),
		)
		.await
	}

	pub async fn post(&self, uri: &str, form: &[(&str, &str)]) -> Response {
		self.send(
			Request::builder()
				.method(Method::POST)
				.uri(uri)
				.form(form)
				.build()
				.unwrap(),
		)
		.await
	}

	/// Store `user` as-is, keeping its id.
	pub async fn insert_user(&self, user: &User) {
		sqlx::query(
			"INSERT INTO users (id, username, password, role, ip_address, user_agent, registered_at, \
			last_login_at, session_token, profile_picture) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
		)
		.bind(user.id)
		.bind(&user.username)
		.bind(&user.password)
		.bind(&user.role)
		.bind(&user.ip_address)
		.bind(&user.user_agent)
		.bind(user.registered_at)
		.bind(user.last_login_at)
		.bind(&user.session_token)
		.bind(&user.profile_picture)
		.execute(&self.pool)
		.await
		.unwrap();
	}

	pub async fn todo_text(&self, id: i64) -> Option<String> {
		sqlx::query_scalar("SELECT text FROM todos WHERE id = ?")
			.bind(id)
			.fetch_optional(&self.pool)
			.await
			.unwrap()
	}
}

/// App with a stored `ROLE_USER` user that the mocked auth service
/// reports as logged in.
pub async fn logged_in_app() -> (TestApp, User) {
	let user = fake_user(1, "testuser", ROLE_USER);
	let app = TestApp::with_auth(login_as(&user)).await;
	app.insert_user(&user).await;
	(app, user)
}

/// The `name=value` pair of the first `Set-Cookie` header.
pub fn set_cookie_pair(response: &Response) -> Option<(String, String)> {
	let header = response.headers.get("set-cookie")?.to_str().ok()?;
	let pair = header.split(';').next()?;
	let (name, value) = pair.split_once('=')?;
	Some((name.to_string(), value.to_string()))
}
