//! Tera templates embedded in the binary.
//!
//! Templates are compiled once, when the [`Templates`] set is built, so a
//! syntax error surfaces at startup instead of on the first request.

use crate::exception::Result;
use crate::http::Response;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

pub const BASE: &str = "base.html";
pub const LOGIN: &str = "auth/login.html";
pub const REGISTER: &str = "auth/register.html";
pub const TODO_INDEX: &str = "todo/index.html";
pub const PASSWORD_CHANGE: &str = "account/password.html";
const FORM_FIELDS: &str = "partials/form_fields.html";

const SOURCES: [(&str, &str); 6] = [
	(BASE, include_str!("../templates/base.html")),
	(FORM_FIELDS, include_str!("../templates/partials/form_fields.html")),
	(LOGIN, include_str!("../templates/auth/login.html")),
	(REGISTER, include_str!("../templates/auth/register.html")),
	(TODO_INDEX, include_str!("../templates/todo/index.html")),
	(PASSWORD_CHANGE, include_str!("../templates/account/password.html")),
];

/// The compiled template set.
pub struct Templates {
	tera: Tera,
}

impl Templates {
	pub fn new() -> Result<Self> {
		let mut tera = Tera::default();
		tera.add_raw_templates(SOURCES)?;
		// .html templates are autoescaped by default
		Ok(Self { tera })
	}

	/// Render `name` with a serializable context.
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::templates::{self, Templates};
	/// use serde_json::json;
	///
	/// let templates = Templates::new().unwrap();
	/// let html = templates
	///     .render(templates::LOGIN, &json!({ "form": { "fields": [], "non_field_errors": [] } }))
	///     .unwrap();
	///
	/// assert!(html.contains("<form"));
	/// ```
	pub fn render(&self, name: &str, context: &impl Serialize) -> Result<String> {
		let context = Context::from_serialize(context)?;
		debug!(template = name, "rendering template");
		Ok(self.tera.render(name, &context)?)
	}

	/// `200 OK` HTML response of `name` rendered with `context`.
	pub fn render_response(&self, name: &str, context: &impl Serialize) -> Result<Response> {
		Ok(Response::html(self.render(name, context)?))
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.tera.get_template_names()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;
	use serde_json::json;

	#[fixture]
	fn templates() -> Templates {
		Templates::new().unwrap()
	}

	#[rstest]
	fn test_every_template_is_registered(templates: Templates) {
		let mut names: Vec<&str> = templates.names().collect();
		names.sort_unstable();

		assert_eq!(
			names,
			vec![PASSWORD_CHANGE, LOGIN, REGISTER, BASE, FORM_FIELDS, TODO_INDEX]
		);
	}

	#[rstest]
	fn test_html_is_escaped(templates: Templates) {
		let html = templates
			.render(
				TODO_INDEX,
				&json!({
					"user": { "username": "alice" },
					"todos": [{ "id": 1, "text": "<script>x</script>", "created_at": "2024-01-01T00:00:00Z" }],
					"form": { "fields": [], "non_field_errors": [] },
					"popup_max_length": 255,
				}),
			)
			.unwrap();

		assert!(!html.contains("<script>x</script>"));
		assert!(html.contains("&lt;script&gt;"));
	}

	#[rstest]
	fn test_unknown_template_is_an_error(templates: Templates) {
		assert!(templates.render("missing.html", &json!({})).is_err());
	}
}
