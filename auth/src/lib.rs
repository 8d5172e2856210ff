//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the storefront service:
//! - Password strength policy
//! - Password hashing (Argon2id, configurable work factor)
//! - JWT token issuance and verification with a closed claim set
//! - Authentication coordination
//!
//! Nothing here performs I/O; persistence and request handling live in the service.
//!
//! # Examples
//!
//! ## Password Policy
//! ```
//! use auth::{PasswordPolicy, PasswordViolation};
//!
//! let validation = PasswordPolicy::validate("Weak1");
//! assert!(validation.violations().contains(&PasswordViolation::TooShort));
//! assert!(PasswordPolicy::validate("Strong1!").is_valid());
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_work_factor(1).unwrap();
//! let hash = hasher.hash("Strong1!").unwrap();
//! assert!(hasher.verify("Strong1!", &hash).unwrap());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, JwtSettings, Role, TokenSubject};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(&JwtSettings::new(
//!     "secret_key_at_least_32_bytes_long!",
//!     Duration::hours(1),
//! ));
//! let token = handler
//!     .issue(TokenSubject {
//!         id: "user123".to_string(),
//!         email: "alice@example.com".to_string(),
//!         name: "Alice".to_string(),
//!         role: Role::Guest,
//!     })
//!     .unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.role, Role::Guest);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod role;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::JwtSettings;
pub use jwt::TokenSubject;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PasswordValidation;
pub use password::PasswordViolation;
pub use role::Role;
