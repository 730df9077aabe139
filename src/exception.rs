//! Error type shared by every layer of the suite.
//!
//! Handlers, middleware and repositories all return [`Result`]. The server
//! turns an [`Error`] into a plain-text response whose status comes from
//! [`Error::status_code`].

use hyper::StatusCode;

/// Errors raised while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Bad request: {0}")]
	BadRequest(String),

	#[error("Method not allowed: {0}")]
	MethodNotAllowed(String),

	/// The request carries no (or an unknown) identity.
	#[error("Authentication failed: {0}")]
	Authentication(String),

	/// The identity is known but lacks the required role.
	#[error("Forbidden: {0}")]
	Forbidden(String),

	#[error("Validation error: {0}")]
	Validation(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Payload too large: {0}")]
	PayloadTooLarge(String),

	#[error("Template error: {0}")]
	Template(#[from] tera::Error),

	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("Migration error: {0}")]
	Migration(#[from] sqlx::migrate::MigrateError),

	#[error("Serialization error: {0}")]
	Serialization(String),

	#[error("HTTP error: {0}")]
	Http(String),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl Error {
	/// HTTP status the server answers with when a handler fails with `self`.
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			Error::BadRequest(_) | Error::Validation(_) | Error::Serialization(_) => {
				StatusCode::BAD_REQUEST
			}
			Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
			Error::Authentication(_) => StatusCode::UNAUTHORIZED,
			Error::Forbidden(_) => StatusCode::FORBIDDEN,
			Error::Conflict(_) => StatusCode::CONFLICT,
			Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
			Error::Http(_) => StatusCode::BAD_REQUEST,
			Error::Template(_) | Error::Database(_) | Error::Migration(_) | Error::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl From<serde_urlencoded::de::Error> for Error {
	fn from(err: serde_urlencoded::de::Error) -> Self {
		Error::BadRequest(err.to_string())
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Serialization(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, Error>;
