use crate::exception::{Error, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Password hasher trait
///
/// # Examples
///
/// ```
/// use admin_suite::apps::auth::{Argon2Hasher, PasswordHasher};
///
/// let hasher = Argon2Hasher::new();
/// let hash = hasher.hash("correct horse").unwrap();
///
/// assert!(hasher.verify("correct horse", &hash).unwrap());
/// assert!(!hasher.verify("wrong horse", &hash).unwrap());
/// ```
pub trait PasswordHasher: Send + Sync {
	fn hash(&self, password: &str) -> Result<String>;

	/// `Ok(false)` on a mismatch; `Err` only when `hash` is unreadable.
	fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
	pub fn new() -> Self {
		Self
	}
}

impl PasswordHasher for Argon2Hasher {
	fn hash(&self, password: &str) -> Result<String> {
		let salt = SaltString::generate(&mut OsRng);
		Argon2::default()
			.hash_password(password.as_bytes(), &salt)
			.map(|hash| hash.to_string())
			.map_err(|e| Error::Internal(format!("password hashing failed: {e}")))
	}

	fn verify(&self, password: &str, hash: &str) -> Result<bool> {
		let parsed = PasswordHash::new(hash)
			.map_err(|e| Error::Authentication(format!("unreadable password hash: {e}")))?;
		Ok(Argon2::default()
			.verify_password(password.as_bytes(), &parsed)
			.is_ok())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_hash_is_argon2id_and_salted() {
		let hasher = Argon2Hasher::new();

		let first = hasher.hash("same password").unwrap();
		let second = hasher.hash("same password").unwrap();

		assert!(first.starts_with("$argon2id$"));
		assert_ne!(first, second);
	}

	#[rstest]
	fn test_verify_rejects_garbage_hash() {
		let result = Argon2Hasher::new().verify("pw", "not a phc string");

		assert!(matches!(result, Err(Error::Authentication(_))));
	}
}
