use crate::apps::todos::views;
use crate::di::Container;
use crate::urls::{Router, view};
use std::sync::Arc;

pub const INDEX_PATH: &str = "/manager/todo";
pub const CREATE_PATH: &str = "/manager/todo/create";
pub const EDIT_PATH: &str = "/manager/todo/edit";
pub const DELETE_PATH: &str = "/manager/todo/delete";

pub const INDEX: &str = "todo_index";
pub const CREATE: &str = "todo_create";
pub const EDIT: &str = "todo_edit";
pub const DELETE: &str = "todo_delete";

/// Add the todo manager routes to `router`.
pub fn routes(router: Router, container: &Arc<Container>) -> Router {
	router
		.get(INDEX_PATH, INDEX, view(container, views::index))
		.post(CREATE_PATH, CREATE, view(container, views::create))
		.get(EDIT_PATH, EDIT, view(container, views::edit))
		.post(DELETE_PATH, DELETE, view(container, views::delete))
}
