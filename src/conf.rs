//! Settings for the suite.
//!
//! Priority order (highest to lowest):
//! 1. Environment variables with the `ADMIN_SUITE_` prefix
//! 2. The TOML settings file (`settings/base.toml`, or the path in
//!    `ADMIN_SUITE_SETTINGS`)
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_PREFIX: &str = "ADMIN_SUITE_";
pub const DEFAULT_SETTINGS_PATH: &str = "settings/base.toml";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("invalid settings file: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("invalid value for {key}: {value:?} ({reason})")]
	InvalidEnv {
		key: String,
		value: String,
		reason: String,
	},
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Address the HTTP server binds to.
	pub bind: SocketAddr,
	pub database_url: String,
	/// `tracing-subscriber` filter used when `RUST_LOG` is unset.
	pub log_filter: String,
	pub session_cookie: String,
	/// Add `Secure` to the session cookie.
	pub secure_cookies: bool,
	/// Take the client address from `X-Forwarded-For`. Only enable behind
	/// a reverse proxy that overwrites the header.
	pub trust_forwarded_for: bool,
	pub debug: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
			database_url: "sqlite://admin_suite.db".to_string(),
			log_filter: "info".to_string(),
			session_cookie: "admin_suite_session".to_string(),
			secure_cookies: false,
			trust_forwarded_for: false,
			debug: false,
		}
	}
}

impl Settings {
	/// Load from the settings file and the process environment.
	pub fn load() -> Result<Self, SettingsError> {
		let path = env::var(format!("{ENV_PREFIX}SETTINGS"))
			.map(PathBuf::from)
			.unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH));
		let file = read_optional(&path)?;
		Self::from_sources(file.as_deref(), env::vars())
	}

	/// Build settings from an optional TOML document and `(key, value)`
	/// environment pairs. Keys without the prefix are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::conf::Settings;
	///
	/// let settings = Settings::from_sources(
	///     Some("log_filter = \"debug\""),
	///     [("ADMIN_SUITE_DEBUG".to_string(), "true".to_string())],
	/// )
	/// .unwrap();
	///
	/// assert_eq!(settings.log_filter, "debug");
	/// assert!(settings.debug);
	/// ```
	pub fn from_sources(
		toml_source: Option<&str>,
		vars: impl IntoIterator<Item = (String, String)>,
	) -> Result<Self, SettingsError> {
		let mut settings = match toml_source {
			Some(source) => toml::from_str(source)?,
			None => Self::default(),
		};
		for (key, value) in vars {
			if let Some(name) = key.strip_prefix(ENV_PREFIX) {
				settings.apply_env(name, &value)?;
			}
		}
		Ok(settings)
	}

	fn apply_env(&mut self, name: &str, value: &str) -> Result<(), SettingsError> {
		let invalid = |reason: String| SettingsError::InvalidEnv {
			key: format!("{ENV_PREFIX}{name}"),
			value: value.to_string(),
			reason,
		};
		match name {
			"BIND" => self.bind = value.parse().map_err(|e| invalid(format!("{e}")))?,
			"DATABASE_URL" => self.database_url = value.to_string(),
			"LOG_FILTER" => self.log_filter = value.to_string(),
			"SESSION_COOKIE" => self.session_cookie = value.to_string(),
			"SECURE_COOKIES" => {
				self.secure_cookies =
					parse_bool(value).ok_or_else(|| invalid("expected a boolean".into()))?
			}
			"TRUST_FORWARDED_FOR" => {
				self.trust_forwarded_for =
					parse_bool(value).ok_or_else(|| invalid("expected a boolean".into()))?
			}
			"DEBUG" => {
				self.debug = parse_bool(value).ok_or_else(|| invalid("expected a boolean".into()))?
			}
			"SETTINGS" => {}
			other => debug!(key = other, "ignoring unknown setting"),
		}
		Ok(())
	}
}

fn read_optional(path: &Path) -> Result<Option<String>, SettingsError> {
	if !path.exists() {
		return Ok(None);
	}
	std::fs::read_to_string(path)
		.map(Some)
		.map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}
