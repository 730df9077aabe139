//! The todo edit popup.
//!
//! Opening the popup starts an [`EditSession`] holding the todo id and the
//! pending text. Confirming consumes the session: a valid text produces a
//! navigation to the edit endpoint, an invalid one an alert (the session
//! stays open). Cancelling drops it.

use crate::apps::todos::urls::EDIT_PATH;
use crate::forms::validators::char_count;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::HashMap;

/// Client-side bounds on todo text, in characters.
pub const POPUP_MIN_LENGTH: usize = 1;
pub const POPUP_MAX_LENGTH: usize = 255;

pub const ALERT_MESSAGE: &str = "Todo text must be between 1 and 255 characters.";

/// Characters `encodeURIComponent` leaves alone besides alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Percent-encode like JavaScript's `encodeURIComponent`.
pub fn encode_uri_component(value: &str) -> String {
	utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// URL the popup navigates to on a valid confirm.
///
/// # Examples
///
/// ```
/// use admin_suite::client::popup::edit_url;
///
/// assert_eq!(edit_url("42", "a b&c"), "/manager/todo/edit?id=42&todo=a%20b%26c");
/// ```
pub fn edit_url(todo_id: &str, text: &str) -> String {
	format!(
		"{EDIT_PATH}?id={}&todo={}",
		encode_uri_component(todo_id),
		encode_uri_component(text)
	)
}

/// A DOM element on a click's propagation path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
	pub tag: String,
	/// `data-*` attributes without the prefix (`todo-id`, `todo-text`).
	pub data: HashMap<String, String>,
}

impl Element {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			data: HashMap::new(),
		}
	}

	pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.data.insert(key.into(), value.into());
		self
	}
}

/// The todo an edit button refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTrigger {
	pub todo_id: String,
	pub todo_text: String,
}

impl EditTrigger {
	pub fn new(todo_id: impl Into<String>, todo_text: impl Into<String>) -> Self {
		Self {
			todo_id: todo_id.into(),
			todo_text: todo_text.into(),
		}
	}

	/// Read the trigger from the nearest `button` on `path` (the clicked
	/// element first, then its ancestors). A missing `todo-text` reads as
	/// empty; a button without `todo-id` is not a trigger.
	pub fn from_click_path(path: &[Element]) -> Option<Self> {
		let button = path
			.iter()
			.find(|element| element.tag.eq_ignore_ascii_case("button"))?;
		let todo_id = button.data.get("todo-id")?;
		let todo_text = button.data.get("todo-text").cloned().unwrap_or_default();
		Some(Self::new(todo_id.clone(), todo_text))
	}
}

/// The edit in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
	pub todo_id: String,
	/// Current content of the popup input.
	pub input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
	Enter,
	Escape,
	Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
	/// The confirm button.
	Confirm,
	/// The cancel button.
	Cancel,
	/// A key pressed in the popup input.
	Key(Key),
}

/// What the page does after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
	None,
	/// Full-page navigation.
	Navigate(String),
	/// Blocking alert with a message.
	Alert(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PopupState {
	#[default]
	Hidden,
	Editing(EditSession),
}

impl PopupState {
	/// Show the popup prefilled with the trigger's text. An open session
	/// is replaced.
	pub fn open(self, trigger: EditTrigger) -> PopupState {
		PopupState::Editing(EditSession {
			todo_id: trigger.todo_id,
			input: trigger.todo_text,
		})
	}

	/// Replace the pending text. Ignored while hidden.
	pub fn input(self, text: impl Into<String>) -> PopupState {
		match self {
			PopupState::Editing(session) => PopupState::Editing(EditSession {
				input: text.into(),
				..session
			}),
			PopupState::Hidden => PopupState::Hidden,
		}
	}

	pub fn handle(self, event: PopupEvent) -> (PopupState, Effect) {
		let PopupState::Editing(session) = self else {
			return (PopupState::Hidden, Effect::None);
		};
		match event {
			PopupEvent::Confirm | PopupEvent::Key(Key::Enter) => confirm(session),
			PopupEvent::Cancel | PopupEvent::Key(Key::Escape) => (PopupState::Hidden, Effect::None),
			PopupEvent::Key(Key::Other) => (PopupState::Editing(session), Effect::None),
		}
	}

	pub fn is_visible(&self) -> bool {
		matches!(self, PopupState::Editing(_))
	}

	pub fn session(&self) -> Option<&EditSession> {
		match self {
			PopupState::Editing(session) => Some(session),
			PopupState::Hidden => None,
		}
	}
}

fn confirm(session: EditSession) -> (PopupState, Effect) {
	let length = char_count(&session.input);
	if (POPUP_MIN_LENGTH..=POPUP_MAX_LENGTH).contains(&length) {
		let url = edit_url(&session.todo_id, &session.input);
		(PopupState::Hidden, Effect::Navigate(url))
	} else {
		(PopupState::Editing(session), Effect::Alert(ALERT_MESSAGE))
	}
}
