//! Capability resolution.

pub mod resolver;

pub use resolver::{require, resolve};
