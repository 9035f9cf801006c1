//! HTTP adapter for the weather service.
//!
//! Translates requests into calls on the resolution service and maps its
//! typed failures onto status codes.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod validation;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
