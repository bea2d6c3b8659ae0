//! # filegate-auth
//!
//! Authentication and authorization primitives: Argon2id password
//! hashing, HS256 access tokens, and the pure capability resolver that
//! gates every operation.

pub mod capability;
pub mod jwt;
pub mod password;

pub use capability::{require, resolve};
pub use password::PasswordHasher;
