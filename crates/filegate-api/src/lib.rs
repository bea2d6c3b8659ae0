//! # filegate-api
//!
//! HTTP layer for Filegate: the Axum router, authentication extractors,
//! request/response DTOs, and handlers. Handlers stay thin — every
//! decision lives in `filegate-service`.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
