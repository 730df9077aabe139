//! Form fields.

use crate::forms::form::{FormData, FormErrors};
use crate::forms::validators::ValidationChain;
use serde::Serialize;

/// How a field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
	TextInput,
	PasswordInput,
	TextArea,
}

impl Widget {
	/// Secret widgets never echo the submitted value back.
	pub fn is_secret(&self) -> bool {
		matches!(self, Widget::PasswordInput)
	}
}

/// Template-facing description of one rendered input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
	pub name: String,
	pub label: String,
	pub widget: Widget,
	pub value: String,
	pub required: bool,
	pub max_length: Option<usize>,
	pub errors: Vec<String>,
}

/// Single-line or multi-line text field.
#[derive(Debug)]
pub struct CharField {
	pub name: String,
	pub label: String,
	pub widget: Widget,
	pub required: bool,
	/// Rendered as the `maxlength` attribute.
	pub max_length: Option<usize>,
	chain: ValidationChain,
}

impl CharField {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			label: name.clone(),
			name,
			widget: Widget::TextInput,
			required: false,
			max_length: None,
			chain: ValidationChain::new(),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	pub fn with_widget(mut self, widget: Widget) -> Self {
		self.widget = widget;
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	/// Validation chain; a chain starting with "not blank" marks the field
	/// required.
	pub fn with_validators(mut self, chain: ValidationChain, required: bool) -> Self {
		self.chain = chain;
		self.required = required;
		self
	}

	/// Run the chain on `value` (missing counts as empty).
	pub fn clean(&self, value: Option<&str>) -> Result<String, String> {
		let value = value.unwrap_or_default();
		self.chain.validate(value)?;
		Ok(value.to_string())
	}

	/// Clean this field out of `data`, recording a failure in `errors`.
	pub fn clean_into(&self, data: &FormData, errors: &mut FormErrors) -> Option<String> {
		self.clean(data.get(&self.name))
			.map_err(|message| errors.add(&self.name, message))
			.ok()
	}

	pub fn render(&self, data: &FormData, errors: &FormErrors) -> FieldView {
		let value = if self.widget.is_secret() {
			String::new()
		} else {
			data.get(&self.name).unwrap_or_default().to_string()
		};
		FieldView {
			name: self.name.clone(),
			label: self.label.clone(),
			widget: self.widget,
			value,
			required: self.required,
			max_length: self.max_length,
			errors: errors.get(&self.name).to_vec(),
		}
	}
}

pub const MISMATCH_MESSAGE: &str = "The values do not match.";

/// A value entered twice (entry plus confirmation).
///
/// The entries must be equal; the first entry then runs through the
/// wrapped field's chain. Errors are reported on the first entry.
#[derive(Debug)]
pub struct RepeatedField {
	pub first: CharField,
	pub second_name: String,
	pub second_label: String,
}

impl RepeatedField {
	pub fn new(first: CharField, second_name: impl Into<String>) -> Self {
		let second_name = second_name.into();
		Self {
			second_label: second_name.clone(),
			first,
			second_name,
		}
	}

	pub fn with_second_label(mut self, label: impl Into<String>) -> Self {
		self.second_label = label.into();
		self
	}

	pub fn name(&self) -> &str {
		&self.first.name
	}

	pub fn clean(&self, first: Option<&str>, second: Option<&str>) -> Result<String, String> {
		if first.unwrap_or_default() != second.unwrap_or_default() {
			return Err(MISMATCH_MESSAGE.to_string());
		}
		self.first.clean(first)
	}

	pub fn clean_into(&self, data: &FormData, errors: &mut FormErrors) -> Option<String> {
		self.clean(data.get(&self.first.name), data.get(&self.second_name))
			.map_err(|message| errors.add(&self.first.name, message))
			.ok()
	}

	pub fn render(&self, data: &FormData, errors: &FormErrors) -> [FieldView; 2] {
		let first = self.first.render(data, errors);
		let second = FieldView {
			name: self.second_name.clone(),
			label: self.second_label.clone(),
			errors: Vec::new(),
			value: if self.first.widget.is_secret() {
				String::new()
			} else {
				data.get(&self.second_name).unwrap_or_default().to_string()
			},
			..first.clone()
		};
		[first, second]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[fixture]
	fn password() -> RepeatedField {
		RepeatedField::new(
			CharField::new("password")
				.with_widget(Widget::PasswordInput)
				.with_validators(ValidationChain::new().not_blank().length(8, 155), true),
			"password_confirm",
		)
	}

	#[rstest]
	fn test_missing_value_is_blank() {
		let field = CharField::new("todo")
			.with_validators(ValidationChain::new().not_blank(), true);

		assert!(field.clean(None).is_err());
		assert_eq!(field.clean(Some("x")).unwrap(), "x");
	}

	#[rstest]
	fn test_repeated_requires_equal_entries(password: RepeatedField) {
		assert_eq!(
			password.clean(Some("longenough"), Some("different1")).unwrap_err(),
			MISMATCH_MESSAGE
		);
		assert_eq!(
			password.clean(Some("longenough"), Some("longenough")).unwrap(),
			"longenough"
		);
	}

	#[rstest]
	fn test_repeated_runs_chain_after_match(password: RepeatedField) {
		assert!(password.clean(Some("short"), Some("short")).is_err());
	}

	#[rstest]
	fn test_secret_widget_never_echoes(password: RepeatedField) {
		let data = FormData::from_pairs([("password", "hunter22"), ("password_confirm", "hunter22")]);
		let [first, second] = password.render(&data, &FormErrors::default());

		assert_eq!(first.value, "");
		assert_eq!(second.value, "");
		assert_eq!(second.name, "password_confirm");
		assert_eq!(second.widget, Widget::PasswordInput);
	}

	#[rstest]
	fn test_render_reports_errors_and_max_length() {
		let field = CharField::new("todo")
			.with_widget(Widget::TextArea)
			.with_max_length(1024);
		let data = FormData::from_pairs([("todo", "draft")]);
		let mut errors = FormErrors::default();
		errors.add("todo", "bad");

		let view = field.render(&data, &errors);

		assert_eq!(view.value, "draft");
		assert_eq!(view.max_length, Some(1024));
		assert_eq!(view.errors, vec!["bad".to_string()]);
	}
}
