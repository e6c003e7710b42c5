//! HTTP surface: envelopes, error taxonomy, route handlers, server
//! assembly.

mod envelope;
mod error;
mod routes;
mod server;

pub use envelope::ApiResponse;
pub use error::{ApiError, ApiResult};
pub use routes::{comic_routes, health_routes, AppState, InventoryPage};
pub use server::HttpServer;
