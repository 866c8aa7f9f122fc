//! HTTP API module for the results, health, and metrics endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, NO_DATA_MESSAGE};
pub use routes::{bind, create_router, serve};
