use crate::exception::Result;
use crate::forms::fields::FieldView;
use crate::http::Request;
use serde::Serialize;
use std::collections::HashMap;

/// Key for form-level (non-field-specific) errors.
pub const ALL_FIELDS_KEY: &str = "_all";

/// Submitted form values, keyed by input name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(HashMap<String, String>);

impl FormData {
	pub fn new() -> Self {
		Self::default()
	}

	/// Decode an urlencoded request body.
	pub fn from_request(request: &Request) -> Result<Self> {
		Ok(Self(request.form()?))
	}

	pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		Self(
			pairs
				.into_iter()
				.map(|(key, value)| (key.to_string(), value.to_string()))
				.collect(),
		)
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.insert(name.into(), value.into());
	}
}

/// Error messages per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(HashMap<String, Vec<String>>);

impl FormErrors {
	pub fn add(&mut self, field: &str, message: impl Into<String>) {
		self.0
			.entry(field.to_string())
			.or_default()
			.push(message.into());
	}

	pub fn get(&self, field: &str) -> &[String] {
		self.0.get(field).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn non_field_errors(&self) -> &[String] {
		self.get(ALL_FIELDS_KEY)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn as_map(&self) -> &HashMap<String, Vec<String>> {
		&self.0
	}
}

/// A declarative form schema.
pub trait Form {
	type Cleaned;

	/// Validate `data`, returning the typed values or every field error.
	fn clean(&self, data: &FormData) -> std::result::Result<Self::Cleaned, FormErrors>;

	/// Inputs to render, prefilled with `data` and annotated with `errors`.
	fn fields(&self, data: &FormData, errors: &FormErrors) -> Vec<FieldView>;
}

/// A form bound to submitted data.
pub struct BoundForm<F: Form> {
	form: F,
	data: FormData,
	errors: FormErrors,
	cleaned: Option<F::Cleaned>,
}

impl<F: Form> BoundForm<F> {
	/// An unbound form, rendered empty.
	pub fn unbound(form: F) -> Self {
		Self {
			form,
			data: FormData::new(),
			errors: FormErrors::default(),
			cleaned: None,
		}
	}

	/// Bind `data` and validate it right away.
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::apps::todos::forms::TodoForm;
	/// use admin_suite::forms::{BoundForm, FormData};
	///
	/// let form = BoundForm::bind(TodoForm, FormData::from_pairs([("todo", "water plants")]));
	/// assert!(form.is_valid());
	/// assert_eq!(form.cleaned_data().unwrap().text, "water plants");
	///
	/// let form = BoundForm::bind(TodoForm, FormData::new());
	/// assert!(!form.is_valid());
	/// assert_eq!(form.errors().get("todo"), ["This value should not be blank."]);
	/// ```
	pub fn bind(form: F, data: FormData) -> Self {
		let (cleaned, errors) = match form.clean(&data) {
			Ok(cleaned) => (Some(cleaned), FormErrors::default()),
			Err(errors) => (None, errors),
		};
		Self {
			form,
			data,
			errors,
			cleaned,
		}
	}

	pub fn is_valid(&self) -> bool {
		self.cleaned.is_some() && self.errors.is_empty()
	}

	pub fn cleaned_data(&self) -> Option<&F::Cleaned> {
		if self.errors.is_empty() {
			self.cleaned.as_ref()
		} else {
			None
		}
	}

	pub fn into_cleaned(self) -> Option<F::Cleaned> {
		if self.errors.is_empty() {
			self.cleaned
		} else {
			None
		}
	}

	pub fn errors(&self) -> &FormErrors {
		&self.errors
	}

	/// Attach an error found after cleaning (e.g. a taken username).
	/// The form is invalid from then on.
	pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
		self.errors.add(field, message);
	}

	/// Template context for this form.
	pub fn context(&self) -> FormContext {
		FormContext {
			fields: self.form.fields(&self.data, &self.errors),
			non_field_errors: self.errors.non_field_errors().to_vec(),
		}
	}
}

/// What templates see of a form.
#[derive(Debug, Clone, Serialize)]
pub struct FormContext {
	pub fields: Vec<FieldView>,
	pub non_field_errors: Vec<String>,
}
