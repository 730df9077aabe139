use crate::staticfiles::{FAVICON, WARNING_ICON};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum PushError {
	#[error("malformed push payload: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// JSON body of a push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
	pub title: String,
	pub body: String,
}

/// What the service worker displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
	pub title: String,
	pub body: String,
	pub icon: &'static str,
	pub badge: &'static str,
}

impl Notification {
	pub fn from_payload(payload: PushPayload) -> Self {
		Self {
			title: payload.title,
			body: payload.body,
			icon: WARNING_ICON,
			badge: FAVICON,
		}
	}

	/// Parse push data and build the notification.
	///
	/// # Examples
	///
	/// ```
	/// use admin_suite::notifications::Notification;
	///
	/// let notification =
	///     Notification::from_payload_json(r#"{"title":"Disk","body":"90% full"}"#).unwrap();
	///
	/// assert_eq!(notification.title, "Disk");
	/// assert_eq!(notification.icon, "/assets/images/warning.png");
	/// assert_eq!(notification.badge, "/assets/images/favicon.png");
	/// ```
	pub fn from_payload_json(data: &str) -> Result<Self, PushError> {
		let payload: PushPayload = serde_json::from_str(data)?;
		Ok(Self::from_payload(payload))
	}
}
