use crate::apps::auth::views;
use crate::di::Container;
use crate::urls::{Router, view};
use std::sync::Arc;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const LOGOUT_PATH: &str = "/logout";
pub const PASSWORD_PATH: &str = "/manager/account/password";

pub const LOGIN: &str = "auth_login";
pub const LOGIN_SUBMIT: &str = "auth_login_submit";
pub const REGISTER: &str = "auth_register";
pub const REGISTER_SUBMIT: &str = "auth_register_submit";
pub const LOGOUT: &str = "auth_logout";
pub const PASSWORD: &str = "account_password";
pub const PASSWORD_SUBMIT: &str = "account_password_submit";

/// Add the account routes to `router`.
pub fn routes(router: Router, container: &Arc<Container>) -> Router {
	router
		.get(LOGIN_PATH, LOGIN, view(container, views::login))
		.post(LOGIN_PATH, LOGIN_SUBMIT, view(container, views::login_submit))
		.get(REGISTER_PATH, REGISTER, view(container, views::register))
		.post(REGISTER_PATH, REGISTER_SUBMIT, view(container, views::register_submit))
		.get(LOGOUT_PATH, LOGOUT, view(container, views::logout))
		.get(PASSWORD_PATH, PASSWORD, view(container, views::password_change))
		.post(PASSWORD_PATH, PASSWORD_SUBMIT, view(container, views::password_change_submit))
}
