mod common;

use admin_suite::apps::auth::forms::{INVALID_CREDENTIALS, USERNAME_TAKEN};
use admin_suite::apps::auth::{AuthService, ROLE_USER, User, UserRepository};
use admin_suite::conf::Settings;
use admin_suite::forms::fields::MISMATCH_MESSAGE;
use admin_suite::http::{Request, Response};
use common::{TestApp, fake_user, login_as, set_cookie_pair};
use hyper::{Method, StatusCode};
use rstest::*;

const PASSWORD: &str = "correct horse";

#[fixture]
async fn app_with_alice() -> (TestApp, User) {
	let app = TestApp::new().await;
	let alice = app.container.auth.register("alice", PASSWORD).await.unwrap();
	(app, alice)
}

#[rstest]
#[case("/login", "Log in")]
#[case("/register", "Create account")]
#[tokio::test]
async fn test_pages_render(#[case] uri: &str, #[case] marker: &str) {
	let app = TestApp::new().await;

	let response = app.get(uri).await;

	assert_eq!(response.status, StatusCode::OK);
	assert!(response.body_text().contains(marker));
}

#[rstest]
#[tokio::test]
async fn test_register_stores_hashed_user() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/register",
			&[
				("username", "bob"),
				("password", PASSWORD),
				("password_confirm", PASSWORD),
			],
		)
		.await;

	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.header("location"), Some("/login"));
	let bob = app.container.users.find_by_username("bob").await.unwrap().unwrap();
	assert_eq!(bob.role, ROLE_USER);
	assert!(bob.password.starts_with("$argon2id$"));
}

#[rstest]
#[tokio::test]
async fn test_register_taken_username(#[future] app_with_alice: (TestApp, User)) {
	let (app, _) = app_with_alice.await;

	let response = app
		.post(
			"/register",
			&[
				("username", "alice"),
				("password", PASSWORD),
				("password_confirm", PASSWORD),
			],
		)
		.await;

	assert_eq!(response.status, StatusCode::OK);
	assert!(response.body_text().contains(USERNAME_TAKEN));
}

#[rstest]
#[tokio::test]
async fn test_register_password_mismatch() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/register",
			&[
				("username", "bob"),
				("password", PASSWORD),
				("password_confirm", "correct h0rse"),
			],
		)
		.await;

	assert_eq!(response.status, StatusCode::OK);
	assert!(response.body_text().contains(MISMATCH_MESSAGE));
	assert!(app.container.users.find_by_username("bob").await.unwrap().is_none());
}

async fn login_from_proxy(app: &TestApp) -> Response {
	app.send(
		Request::builder()
			.method(Method::POST)
			.uri("/login")
			.header("user-agent", "integration-test/1.0")
			.header("x-forwarded-for", "198.51.100.4")
			.remote_addr("192.0.2.50:4321".parse().unwrap())
			.form(&[("username", "alice"), ("password", PASSWORD)])
			.build()
			.unwrap(),
	)
	.await
}

#[rstest]
#[tokio::test]
async fn test_login_sets_cookie_and_stores_token(#[future] app_with_alice: (TestApp, User)) {
	let (app, alice) = app_with_alice.await;

	let response = login_from_proxy(&app).await;

	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.header("location"), Some("/manager/todo"));
	let (name, token) = set_cookie_pair(&response).unwrap();
	assert_eq!(name, app.container.settings.session_cookie);
	assert!(response.header("set-cookie").unwrap().contains("HttpOnly"));

	let stored = app.container.users.find_by_id(alice.id).await.unwrap().unwrap();
	assert_eq!(stored.session_token.as_deref(), Some(token.as_str()));
	assert_eq!(stored.ip_address.as_deref(), Some("192.0.2.50"));
	assert_eq!(stored.user_agent.as_deref(), Some("integration-test/1.0"));
	assert!(stored.last_login_at.is_some());
}

#[rstest]
#[case(false, "192.0.2.50")]
#[case(true, "198.51.100.4")]
#[tokio::test]
async fn test_login_records_forwarded_for_only_when_trusted(
	#[case] trust_forwarded_for: bool,
	#[case] expected_ip: &str,
) {
	let app = TestApp::with_settings(Settings {
		trust_forwarded_for,
		..Settings::default()
	})
	.await;
	let alice = app.container.auth.register("alice", PASSWORD).await.unwrap();

	let response = login_from_proxy(&app).await;

	assert_eq!(response.status, StatusCode::FOUND);
	let stored = app.container.users.find_by_id(alice.id).await.unwrap().unwrap();
	assert_eq!(stored.ip_address.as_deref(), Some(expected_ip));
}

#[rstest]
#[case("alice", "wrong horse")]
#[case("nobody", PASSWORD)]
#[tokio::test]
async fn test_login_failure_rerenders(
	#[future] app_with_alice: (TestApp, User),
	#[case] username: &str,
	#[case] password: &str,
) {
	let (app, _) = app_with_alice.await;

	let response = app
		.post("/login", &[("username", username), ("password", password)])
		.await;

	assert_eq!(response.status, StatusCode::OK);
	assert!(response.body_text().contains(INVALID_CREDENTIALS));
	assert!(response.header("set-cookie").is_none());
}

#[rstest]
#[tokio::test]
async fn test_login_then_browse_then_logout(#[future] app_with_alice: (TestApp, User)) {
	let (app, alice) = app_with_alice.await;
	let login = app
		.post("/login", &[("username", "alice"), ("password", PASSWORD)])
		.await;
	let (name, token) = set_cookie_pair(&login).unwrap();
	let cookie = format!("{name}={token}");

	let todos = app.get_with_cookie("/manager/todo", &cookie).await;
	assert_eq!(todos.status, StatusCode::OK);
	assert!(todos.body_text().contains("alice"));

	let logout = app.get_with_cookie("/logout", &cookie).await;
	assert_eq!(logout.status, StatusCode::OK);
	assert!(logout.body_text().contains("You have been logged out."));
	assert!(logout.header("set-cookie").unwrap().contains("Max-Age=0"));

	let stored = app.container.users.find_by_id(alice.id).await.unwrap().unwrap();
	assert!(stored.session_token.is_none());
	let after = app.get_with_cookie("/manager/todo", &cookie).await;
	assert_eq!(after.status, StatusCode::FOUND);
	assert_eq!(after.header("location"), Some("/login"));
}

#[rstest]
#[tokio::test]
async fn test_logout_without_session_renders_login() {
	let app = TestApp::new().await;

	let response = app.get("/logout").await;

	assert_eq!(response.status, StatusCode::OK);
	assert!(response.body_text().contains("<form method=\"post\" action=\"/login\">"));
}

#[rstest]
#[tokio::test]
async fn test_password_change_page_for_logged_in_user() {
	let user = fake_user(3, "carol", ROLE_USER);
	let app = TestApp::with_auth(login_as(&user)).await;

	let response = app.get("/manager/account/password").await;

	assert_eq!(response.status, StatusCode::OK);
	let body = response.body_text();
	assert!(body.contains("name=\"password\""));
	assert!(body.contains("name=\"password_confirm\""));
}

#[rstest]
#[case("short", "short")]
#[case("long enough", "long enougH")]
#[case("", "")]
#[tokio::test]
async fn test_invalid_password_never_reaches_service(
	#[case] password: &str,
	#[case] confirm: &str,
) {
	let user = fake_user(3, "carol", ROLE_USER);
	let mut auth = login_as(&user);
	auth.expect_change_password().times(0);
	let app = TestApp::with_auth(auth).await;

	let response = app
		.post(
			"/manager/account/password",
			&[("password", password), ("password_confirm", confirm)],
		)
		.await;

	assert_eq!(response.status, StatusCode::OK);
	assert!(response.body_text().contains("class=\"error\""));
}

#[rstest]
#[tokio::test]
async fn test_valid_password_change_redirects() {
	let user = fake_user(3, "carol", ROLE_USER);
	let mut auth = login_as(&user);
	auth.expect_change_password()
		.withf(|user, password| user.id == 3 && password == "battery staple")
		.times(1)
		.returning(|_, _| Ok(()));
	let app = TestApp::with_auth(auth).await;

	let response = app
		.post(
			"/manager/account/password",
			&[
				("password", "battery staple"),
				("password_confirm", "battery staple"),
			],
		)
		.await;

	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.header("location"), Some("/manager/todo"));
}
