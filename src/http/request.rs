use crate::exception::{Error, Result};
use bytes::Bytes;
use hyper::header::{COOKIE, HeaderName, HeaderValue, USER_AGENT};
use hyper::http::{Extensions, request::Parts};
use hyper::{HeaderMap, Method, Uri, Version};
use serde::de::DeserializeOwned;
use std::net::SocketAddr;

/// HTTP request representation
///
/// The body is fully buffered. Typed per-request data (such as the
/// authenticated user) travels in [`Request::extensions`].
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub remote_addr: Option<SocketAddr>,
	pub extensions: Extensions,
}

impl Request {
	/// Start building a request.
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/manager/todo")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.path(), "/manager/todo");
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	pub(crate) fn from_parts(parts: Parts, body: Bytes, remote_addr: Option<SocketAddr>) -> Self {
		Self {
			method: parts.method,
			uri: parts.uri,
			version: parts.version,
			headers: parts.headers,
			body,
			remote_addr,
			extensions: parts.extensions,
		}
	}

	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Header value as a string, if present and valid ASCII.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	/// Deserialize the query string.
	///
	/// Both `%20` and `+` decode to a space.
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::http::Request;
	/// use std::collections::HashMap;
	///
	/// let request = Request::builder()
	///     .uri("/manager/todo/edit?id=42&todo=a%20b%26c")
	///     .build()
	///     .unwrap();
	///
	/// let query: HashMap<String, String> = request.query().unwrap();
	/// assert_eq!(query["id"], "42");
	/// assert_eq!(query["todo"], "a b&c");
	/// ```
	pub fn query<T: DeserializeOwned>(&self) -> Result<T> {
		Ok(serde_urlencoded::from_str(self.uri.query().unwrap_or(""))?)
	}

	/// Deserialize an `application/x-www-form-urlencoded` body.
	pub fn form<T: DeserializeOwned>(&self) -> Result<T> {
		Ok(serde_urlencoded::from_bytes(&self.body)?)
	}

	/// Value of the cookie `name` from the `Cookie` header(s).
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::http::Request;
	///
	/// let request = Request::builder()
	///     .uri("/")
	///     .header("cookie", "theme=dark; session=abc123")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.cookie("session"), Some("abc123"));
	/// assert_eq!(request.cookie("missing"), None);
	/// ```
	pub fn cookie(&self, name: &str) -> Option<&str> {
		self.headers
			.get_all(COOKIE)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.flat_map(|value| value.split(';'))
			.filter_map(|pair| pair.trim().split_once('='))
			.find(|(key, _)| *key == name)
			.map(|(_, value)| value)
	}

	pub fn user_agent(&self) -> Option<&str> {
		self.headers.get(USER_AGENT).and_then(|v| v.to_str().ok())
	}

	/// Client address.
	///
	/// The first `X-Forwarded-For` entry is only honored when
	/// `trust_forwarded_for` is set, i.e. when a proxy we control rewrites
	/// that header. Otherwise it is the peer address.
	pub fn client_ip(&self, trust_forwarded_for: bool) -> Option<String> {
		let forwarded = trust_forwarded_for
			.then(|| self.header("x-forwarded-for"))
			.flatten()
			.and_then(|value| value.split(',').next())
			.map(|ip| ip.trim().to_string())
			.filter(|ip| !ip.is_empty());
		forwarded.or_else(|| self.remote_addr.map(|addr| addr.ip().to_string()))
	}
}

/// Builder for [`Request`], used by tests and by the server glue.
#[derive(Default)]
pub struct RequestBuilder {
	method: Method,
	uri: Option<String>,
	headers: HeaderMap,
	body: Bytes,
	remote_addr: Option<SocketAddr>,
	error: Option<String>,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn header(mut self, name: &str, value: &str) -> Self {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				self.headers.append(name, value);
			}
			_ => self.error = Some(format!("invalid header {name}: {value}")),
		}
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Set a urlencoded form body and the matching content type.
	pub fn form(self, fields: &[(&str, &str)]) -> Self {
		let encoded = serde_urlencoded::to_string(fields).unwrap_or_default();
		self.header("content-type", "application/x-www-form-urlencoded")
			.body(encoded)
	}

	pub fn remote_addr(mut self, addr: SocketAddr) -> Self {
		self.remote_addr = Some(addr);
		self
	}

	pub fn build(self) -> Result<Request> {
		if let Some(error) = self.error {
			return Err(Error::Http(error));
		}
		let uri: Uri = self
			.uri
			.as_deref()
			.unwrap_or("/")
			.parse()
			.map_err(|e: hyper::http::uri::InvalidUri| Error::Http(e.to_string()))?;
		Ok(Request {
			method: self.method,
			uri,
			version: Version::HTTP_11,
			headers: self.headers,
			body: self.body,
			remote_addr: self.remote_addr,
			extensions: Extensions::new(),
		})
	}
}
