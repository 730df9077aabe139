use crate::apps::auth::models::{CurrentUser, User};
use crate::apps::todos::forms::TodoForm;
use crate::apps::todos::models::Todo;
use crate::apps::todos::urls::INDEX_PATH;
use crate::client::popup::POPUP_MAX_LENGTH;
use crate::di::Container;
use crate::exception::{Error, Result};
use crate::forms::{BoundForm, FormContext, FormData};
use crate::http::{Request, Response};
use crate::templates;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Serialize)]
struct IndexPage<'a> {
	user: &'a User,
	todos: Vec<Todo>,
	form: FormContext,
	popup_max_length: usize,
}

/// Query string of the edit endpoint, or form body of the delete endpoint.
/// Values are parsed by hand so a malformed id reads as a bad request.
#[derive(Debug, Deserialize)]
struct TodoQuery {
	id: Option<String>,
	todo: Option<String>,
}

impl TodoQuery {
	fn id(&self) -> Result<i64> {
		let raw = self
			.id
			.as_deref()
			.ok_or_else(|| Error::BadRequest("missing todo id".to_string()))?;
		raw.trim()
			.parse()
			.map_err(|_| Error::BadRequest(format!("invalid todo id {raw:?}")))
	}
}

async fn render_index(
	container: &Container,
	user: &User,
	form: &BoundForm<TodoForm>,
) -> Result<Response> {
	let todos = container.todos.list_for_user(user.id).await?;
	container.templates.render_response(
		templates::TODO_INDEX,
		&IndexPage {
			user,
			todos,
			form: form.context(),
			popup_max_length: POPUP_MAX_LENGTH,
		},
	)
}

pub async fn index(container: Arc<Container>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	render_index(&container, user, &BoundForm::unbound(TodoForm)).await
}

pub async fn create(container: Arc<Container>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let form = BoundForm::bind(TodoForm, FormData::from_request(&request)?);
	match form.cleaned_data() {
		Some(todo) => {
			let todo = container.todos.create(user.id, &todo.text).await?;
			info!(user_id = user.id, todo_id = todo.id, "todo created");
			Ok(Response::redirect(INDEX_PATH))
		}
		None => render_index(&container, user, &form).await,
	}
}

/// Target of the edit popup: `?id=<id>&todo=<text>`.
pub async fn edit(container: Arc<Container>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let query: TodoQuery = request.query()?;
	let id = query.id()?;
	let text = TodoForm
		.clean_text(query.todo.as_deref().unwrap_or_default())
		.map_err(Error::BadRequest)?;
	if !container.todos.update_text(id, user.id, &text.text).await? {
		return Err(Error::NotFound(format!("todo {id}")));
	}
	info!(user_id = user.id, todo_id = id, "todo edited");
	Ok(Response::redirect(INDEX_PATH))
}

/// `POST` with an `id` form field. Not a `GET` so that a cross-site link
/// cannot delete todos with the `SameSite=Lax` session cookie.
pub async fn delete(container: Arc<Container>, request: Request) -> Result<Response> {
	let user = CurrentUser::from_request(&request)?;
	let form: TodoQuery = request.form()?;
	let id = form.id()?;
	if !container.todos.delete(id, user.id).await? {
		return Err(Error::NotFound(format!("todo {id}")));
	}
	info!(user_id = user.id, todo_id = id, "todo deleted");
	Ok(Response::redirect(INDEX_PATH))
}

/// `GET /`: the todo list is the landing page.
pub async fn home(_container: Arc<Container>, _request: Request) -> Result<Response> {
	Ok(Response::redirect(INDEX_PATH))
}
