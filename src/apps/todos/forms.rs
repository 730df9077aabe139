use crate::forms::{CharField, FieldView, Form, FormData, FormErrors, ValidationChain, Widget};

/// Server-side bounds on todo text, in characters.
pub const TODO_MIN_LENGTH: usize = 1;
pub const TODO_MAX_LENGTH: usize = 1024;

pub const TODO_FIELD: &str = "todo";

/// Create (and server-side edit) form for a todo.
#[derive(Debug, Default, Clone, Copy)]
pub struct TodoForm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoText {
	pub text: String,
}

impl TodoForm {
	fn field(&self) -> CharField {
		CharField::new(TODO_FIELD)
			.with_label("Todo")
			.with_widget(Widget::TextArea)
			.with_max_length(TODO_MAX_LENGTH)
			.with_validators(
				ValidationChain::new()
					.not_blank()
					.length(TODO_MIN_LENGTH, TODO_MAX_LENGTH),
				true,
			)
	}

	/// Validate a single text value outside a form submission.
	pub fn clean_text(&self, text: &str) -> Result<TodoText, String> {
		self.field()
			.clean(Some(text))
			.map(|text| TodoText { text })
	}
}

impl Form for TodoForm {
	type Cleaned = TodoText;

	fn clean(&self, data: &FormData) -> Result<TodoText, FormErrors> {
		let mut errors = FormErrors::default();
		match self.field().clean_into(data, &mut errors) {
			Some(text) => Ok(TodoText { text }),
			None => Err(errors),
		}
	}

	fn fields(&self, data: &FormData, errors: &FormErrors) -> Vec<FieldView> {
		vec![self.field().render(data, errors)]
	}
}
