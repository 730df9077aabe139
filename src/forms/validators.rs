//! Ordered validation chains.
//!
//! A chain is a list of rules, each a predicate plus the message reported
//! when the predicate fails. Rules are evaluated in order and evaluation
//! stops at the first failure, so a blank value reports only the
//! "not blank" message and never a length message.

use std::fmt;

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

pub const NOT_BLANK_MESSAGE: &str = "This value should not be blank.";

/// Length in characters (Unicode scalar values), not bytes.
pub fn char_count(value: &str) -> usize {
	value.chars().count()
}

/// A single predicate with its failure message.
pub struct Rule {
	predicate: Predicate,
	message: String,
}

impl Rule {
	pub fn new(
		predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
		message: impl Into<String>,
	) -> Self {
		Self {
			predicate: Box::new(predicate),
			message: message.into(),
		}
	}

	/// Fails on empty or whitespace-only input.
	pub fn not_blank() -> Self {
		Self::new(|value| !value.trim().is_empty(), NOT_BLANK_MESSAGE)
	}

	pub fn min_length(min: usize) -> Self {
		Self::new(
			move |value| char_count(value) >= min,
			format!("This value is too short. It should have {min} characters or more."),
		)
	}

	pub fn max_length(max: usize) -> Self {
		Self::new(
			move |value| char_count(value) <= max,
			format!("This value is too long. It should have {max} characters or less."),
		)
	}

	pub fn check(&self, value: &str) -> Result<(), &str> {
		if (self.predicate)(value) {
			Ok(())
		} else {
			Err(&self.message)
		}
	}
}

impl fmt::Debug for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Rule")
			.field("message", &self.message)
			.finish_non_exhaustive()
	}
}

/// Rules evaluated in order, stopping at the first failure.
///
/// # Examples
///
/// ```
/// use admin_suite::forms::validators::ValidationChain;
///
/// let chain = ValidationChain::new().not_blank().length(8, 155);
///
/// assert!(chain.validate("correct horse").is_ok());
/// assert_eq!(
///     chain.validate("").unwrap_err(),
///     "This value should not be blank."
/// );
/// assert!(chain.validate("short").is_err());
/// ```
#[derive(Debug, Default)]
pub struct ValidationChain {
	rules: Vec<Rule>,
}

impl ValidationChain {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn rule(mut self, rule: Rule) -> Self {
		self.rules.push(rule);
		self
	}

	pub fn not_blank(self) -> Self {
		self.rule(Rule::not_blank())
	}

	/// Inclusive character-length bounds: a minimum rule, then a maximum rule.
	pub fn length(self, min: usize, max: usize) -> Self {
		self.rule(Rule::min_length(min)).rule(Rule::max_length(max))
	}

	/// First failing rule's message, if any.
	pub fn validate(&self, value: &str) -> Result<(), String> {
		self.rules
			.iter()
			.try_for_each(|rule| rule.check(value))
			.map_err(str::to_string)
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}
