use crate::forms::{
	CharField, FieldView, Form, FormData, FormErrors, RepeatedField, ValidationChain, Widget,
};

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 155;
pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 180;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const USERNAME_TAKEN: &str = "This username is already taken.";

/// `password` entered twice: non-blank, then 8..=155 characters.
fn repeated_password() -> RepeatedField {
	RepeatedField::new(
		CharField::new("password")
			.with_label("Password")
			.with_widget(Widget::PasswordInput)
			.with_max_length(PASSWORD_MAX_LENGTH)
			.with_validators(
				ValidationChain::new()
					.not_blank()
					.length(PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH),
				true,
			),
		"password_confirm",
	)
	.with_second_label("Repeat password")
}

/// Change the logged-in user's password.
#[derive(Debug)]
pub struct PasswordChangeForm {
	password: RepeatedField,
}

impl Default for PasswordChangeForm {
	fn default() -> Self {
		Self {
			password: repeated_password(),
		}
	}
}

/// A password that passed the change form, ready for hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassword(pub String);

impl Form for PasswordChangeForm {
	type Cleaned = NewPassword;

	fn clean(&self, data: &FormData) -> Result<NewPassword, FormErrors> {
		let mut errors = FormErrors::default();
		match self.password.clean_into(data, &mut errors) {
			Some(password) => Ok(NewPassword(password)),
			None => Err(errors),
		}
	}

	fn fields(&self, data: &FormData, errors: &FormErrors) -> Vec<FieldView> {
		self.password.render(data, errors).into()
	}
}

#[derive(Debug)]
pub struct RegistrationForm {
	username: CharField,
	password: RepeatedField,
}

impl Default for RegistrationForm {
	fn default() -> Self {
		Self {
			username: CharField::new("username")
				.with_label("Username")
				.with_max_length(USERNAME_MAX_LENGTH)
				.with_validators(
					ValidationChain::new()
						.not_blank()
						.length(USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH),
					true,
				),
			password: repeated_password(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
	pub username: String,
	pub password: String,
}

impl Form for RegistrationForm {
	type Cleaned = Registration;

	fn clean(&self, data: &FormData) -> Result<Registration, FormErrors> {
		let mut errors = FormErrors::default();
		let username = self.username.clean_into(data, &mut errors);
		let password = self.password.clean_into(data, &mut errors);
		match (username, password) {
			(Some(username), Some(password)) => Ok(Registration { username, password }),
			_ => Err(errors),
		}
	}

	fn fields(&self, data: &FormData, errors: &FormErrors) -> Vec<FieldView> {
		let mut fields = vec![self.username.render(data, errors)];
		fields.extend(self.password.render(data, errors));
		fields
	}
}

#[derive(Debug)]
pub struct LoginForm {
	username: CharField,
	password: CharField,
}

impl Default for LoginForm {
	fn default() -> Self {
		Self {
			username: CharField::new("username")
				.with_label("Username")
				.with_validators(ValidationChain::new().not_blank(), true),
			password: CharField::new("password")
				.with_label("Password")
				.with_widget(Widget::PasswordInput)
				.with_validators(ValidationChain::new().not_blank(), true),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

impl Form for LoginForm {
	type Cleaned = Credentials;

	fn clean(&self, data: &FormData) -> Result<Credentials, FormErrors> {
		let mut errors = FormErrors::default();
		let username = self.username.clean_into(data, &mut errors);
		let password = self.password.clean_into(data, &mut errors);
		match (username, password) {
			(Some(username), Some(password)) => Ok(Credentials { username, password }),
			_ => Err(errors),
		}
	}

	fn fields(&self, data: &FormData, errors: &FormErrors) -> Vec<FieldView> {
		vec![
			self.username.render(data, errors),
			self.password.render(data, errors),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::forms::validators::NOT_BLANK_MESSAGE;
	use crate::forms::fields::MISMATCH_MESSAGE;
	use rstest::rstest;

	fn passwords(first: &str, second: &str) -> FormData {
		FormData::from_pairs([("password", first), ("password_confirm", second)])
	}

	#[rstest]
	#[case("", NOT_BLANK_MESSAGE)]
	#[case("        ", NOT_BLANK_MESSAGE)]
	#[case("1234567", "This value is too short. It should have 8 characters or more.")]
	fn test_password_change_rejects(#[case] password: &str, #[case] message: &str) {
		let errors = PasswordChangeForm::default()
			.clean(&passwords(password, password))
			.unwrap_err();

		assert_eq!(errors.get("password"), [message]);
	}

	#[rstest]
	#[case(8)]
	#[case(155)]
	fn test_password_change_accepts_bounds(#[case] length: usize) {
		let password = "p".repeat(length);

		let cleaned = PasswordChangeForm::default()
			.clean(&passwords(&password, &password))
			.unwrap();

		assert_eq!(cleaned, NewPassword(password));
	}

	#[rstest]
	fn test_password_change_rejects_156_characters() {
		let password = "p".repeat(156);

		let errors = PasswordChangeForm::default()
			.clean(&passwords(&password, &password))
			.unwrap_err();

		assert_eq!(
			errors.get("password"),
			["This value is too long. It should have 155 characters or less."]
		);
	}

	#[rstest]
	fn test_password_mismatch_reported_before_length() {
		let errors = PasswordChangeForm::default()
			.clean(&passwords("short", "other"))
			.unwrap_err();

		assert_eq!(errors.get("password"), [MISMATCH_MESSAGE]);
	}

	#[rstest]
	fn test_password_change_renders_two_secret_inputs() {
		let fields = PasswordChangeForm::default()
			.fields(&passwords("hunter22", "hunter22"), &FormErrors::default());

		assert_eq!(fields.len(), 2);
		assert!(fields.iter().all(|f| f.widget == Widget::PasswordInput && f.value.is_empty()));
	}

	#[rstest]
	fn test_registration_collects_every_field_error() {
		let data = FormData::from_pairs([
			("username", "al"),
			("password", "x"),
			("password_confirm", "x"),
		]);

		let errors = RegistrationForm::default().clean(&data).unwrap_err();

		assert_eq!(errors.get("username").len(), 1);
		assert_eq!(errors.get("password").len(), 1);
	}

	#[rstest]
	fn test_login_requires_both_fields() {
		let errors = LoginForm::default()
			.clean(&FormData::from_pairs([("username", "alice")]))
			.unwrap_err();

		assert!(errors.get("username").is_empty());
		assert_eq!(errors.get("password"), [NOT_BLANK_MESSAGE]);
	}
}
