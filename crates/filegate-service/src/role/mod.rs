//! Role administration.

pub mod service;

pub use service::RoleService;
