use crate::exception::{Error, Result};
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue, LOCATION, SET_COOKIE};
use hyper::{HeaderMap, StatusCode};
use std::fmt;

/// HTTP response representation
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	pub fn forbidden() -> Self {
		Self::new(StatusCode::FORBIDDEN)
	}

	/// `200 OK` with an HTML body.
	pub fn html(body: impl Into<Bytes>) -> Self {
		Self::ok()
			.with_typed_header(
				CONTENT_TYPE,
				HeaderValue::from_static("text/html; charset=utf-8"),
			)
			.with_body(body)
	}

	/// `302 Found` pointing at `location`.
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::redirect("/login");
	/// assert_eq!(response.status, StatusCode::FOUND);
	/// assert_eq!(response.header("location"), Some("/login"));
	/// ```
	pub fn redirect(location: &str) -> Self {
		let mut response = Self::new(StatusCode::FOUND);
		match HeaderValue::from_str(location) {
			Ok(value) => {
				response.headers.insert(LOCATION, value);
			}
			Err(_) => response.status = StatusCode::INTERNAL_SERVER_ERROR,
		}
		response
	}

	/// Plain-text response describing `error`.
	pub fn from_error(error: &Error) -> Self {
		Self::new(error.status_code())
			.with_typed_header(
				CONTENT_TYPE,
				HeaderValue::from_static("text/plain; charset=utf-8"),
			)
			.with_body(error.to_string())
	}

	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn with_typed_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Append a `Set-Cookie` header.
	pub fn with_cookie(mut self, cookie: &SetCookie) -> Result<Self> {
		let value = HeaderValue::from_str(&cookie.to_string())
			.map_err(|e| Error::Http(format!("invalid cookie {}: {e}", cookie.name)))?;
		self.headers.append(SET_COOKIE, value);
		Ok(self)
	}

	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	/// Body decoded as UTF-8 (lossy).
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
		let mut response = hyper::Response::new(Full::new(self.body));
		*response.status_mut() = self.status;
		*response.headers_mut() = self.headers;
		response
	}
}

/// A `Set-Cookie` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
	pub name: String,
	pub value: String,
	pub max_age: Option<i64>,
	pub secure: bool,
}

impl SetCookie {
	/// Session cookie: `HttpOnly`, `SameSite=Lax`, scoped to `/`.
	pub fn session(name: impl Into<String>, value: impl Into<String>, secure: bool) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			max_age: None,
			secure,
		}
	}

	/// A cookie that makes the browser drop `name` immediately.
	pub fn expired(name: impl Into<String>, secure: bool) -> Self {
		Self {
			name: name.into(),
			value: String::new(),
			max_age: Some(0),
			secure,
		}
	}
}

impl fmt::Display for SetCookie {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}={}; Path=/; HttpOnly; SameSite=Lax", self.name, self.value)?;
		if let Some(max_age) = self.max_age {
			write!(f, "; Max-Age={max_age}")?;
		}
		if self.secure {
			f.write_str("; Secure")?;
		}
		Ok(())
	}
}
