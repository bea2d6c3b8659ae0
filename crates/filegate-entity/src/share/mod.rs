//! Share link model.

pub mod model;

pub use model::{CreateShareLink, ShareLink};
