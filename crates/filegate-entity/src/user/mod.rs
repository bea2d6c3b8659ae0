//! User, role, and principal models.

pub mod model;
pub mod principal;
pub mod role;

pub use model::{CreateUser, UpdateUser, User};
pub use principal::Principal;
pub use role::{CreateRole, Role, UpdateRole};
