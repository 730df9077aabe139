//! User accounts: registration, login sessions and password changes.

pub mod forms;
pub mod hasher;
pub mod models;
pub mod repository;
pub mod service;
pub mod urls;
pub mod views;

pub use hasher::{Argon2Hasher, PasswordHasher};
pub use models::{CurrentUser, NewUser, ROLE_ADMIN, ROLE_USER, User};
pub use repository::{SqliteUserRepository, UserRepository};
pub use service::{AuthService, ClientInfo, DefaultAuthService};
