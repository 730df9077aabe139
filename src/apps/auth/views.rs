use crate::apps::auth::forms::{
	INVALID_CREDENTIALS, LoginForm, PasswordChangeForm, RegistrationForm, USERNAME_TAKEN,
};
use crate::apps::auth::models::{CurrentUser, User};
use crate::apps::auth::service::ClientInfo;
use crate::apps::auth::urls::LOGIN_PATH;
use crate::apps::todos::urls::INDEX_PATH;
use crate::di::Container;
use crate::exception::{Error, Result};
use crate::forms::{ALL_FIELDS_KEY, BoundForm, Form, FormContext, FormData};
use crate::http::{Request, Response, SetCookie};
use crate::templates;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Serialize)]
struct LoginPage {
	form: FormContext,
	logged_out: bool,
}

#[derive(Serialize)]
struct FormPage<'a> {
	form: FormContext,
	user: Option<&'a User>,
}

fn render_login<F: Form>(
	container: &Container,
	form: &BoundForm<F>,
	logged_out: bool,
) -> Result<Response> {
	container.templates.render_response(
		templates::LOGIN,
		&LoginPage {
			form: form.context(),
			logged_out,
		},
	)
}

pub async fn login(container: Arc<Container>, _request: Request) -> Result<Response> {
	render_login(&container, &BoundForm::unbound(LoginForm::default()), false)
}

/// Check the credentials and open a session.
pub async fn login_submit(container: Arc<Container>, request: Request) -> Result<Response> {
	let mut form = BoundForm::bind(LoginForm::default(), FormData::from_request(&request)?);
	if let Some(credentials) = form.cleaned_data().cloned() {
		match container
			.auth
			.authenticate(&credentials.username, &credentials.password)
			.await?
		{
			Some(user) => {
				let token = container
					.auth
					.start_session(
						&user,
						ClientInfo::from_request(&request, container.settings.trust_forwarded_for),
					)
					.await?;
				let cookie = SetCookie::session(
					&container.settings.session_cookie,
					token,
					container.settings.secure_cookies,
				);
				return Response::redirect(INDEX_PATH).with_cookie(&cookie);
			}
			None => form.add_error(ALL_FIELDS_KEY, INVALID_CREDENTIALS),
		}
	}
	render_login(&container, &form, false)
}

pub async fn register(container: Arc<Container>, _request: Request) -> Result<Response> {
	let form = BoundForm::unbound(RegistrationForm::default());
	container.templates.render_response(
		templates::REGISTER,
		&FormPage {
			form: form.context(),
			user: None,
		},
	)
}

pub async fn register_submit(container: Arc<Container>, request: Request) -> Result<Response> {
	let mut form = BoundForm::bind(RegistrationForm::default(), FormData::from_request(&request)?);
	if let Some(registration) = form.cleaned_data().cloned() {
		match container
			.auth
			.register(&registration.username, &registration.password)
			.await
		{
			Ok(_) => return Ok(Response::redirect(LOGIN_PATH)),
			Err(Error::Conflict(_)) => form.add_error("username", USERNAME_TAKEN),
			Err(err) => return Err(err),
		}
	}
	container.templates.render_response(
		templates::REGISTER,
		&FormPage {
			form: form.context(),
			user: None,
		},
	)
}

/// End the session (if any), expire the cookie and show the login page.
pub async fn logout(container: Arc<Container>, request: Request) -> Result<Response> {
	if let Some(user) = container.auth.current_user(&request).await? {
		container.auth.end_session(&user).await?;
	}
	let cookie = SetCookie::expired(
		&container.settings.session_cookie,
		container.settings.secure_cookies,
	);
	render_login(&container, &BoundForm::unbound(LoginForm::default()), true)?.with_cookie(&cookie)
}

pub async fn password_change(container: Arc<Container>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let form = BoundForm::unbound(PasswordChangeForm::default());
	container.templates.render_response(
		templates::PASSWORD_CHANGE,
		&FormPage {
			form: form.context(),
			user: Some(user),
		},
	)
}

pub async fn password_change_submit(container: Arc<Container>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let form = BoundForm::bind(PasswordChangeForm::default(), FormData::from_request(&request)?);
	if let Some(password) = form.cleaned_data() {
		container.auth.change_password(user, &password.0).await?;
		info!(user_id = user.id, "password change accepted");
		return Ok(Response::redirect(INDEX_PATH));
	}
	container.templates.render_response(
		templates::PASSWORD_CHANGE,
		&FormPage {
			form: form.context(),
			user: Some(user),
		},
	)
}
