//! HTTP layer for the course search API
//!
//! Thin glue over the search core: parameter parsing, response shaping and
//! error-to-status mapping. No decision logic lives here.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
