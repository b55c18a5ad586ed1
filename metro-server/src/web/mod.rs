//! Web layer for the transit map.
//!
//! Exposes the network and path search as JSON endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
