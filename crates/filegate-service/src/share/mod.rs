//! Share issuing: direct presigns and token-backed links.

pub mod service;

pub use service::ShareService;
