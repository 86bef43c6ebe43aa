//! Thin HTTP adapter over `treesync-core`: parses query parameters,
//! invokes the sync query surface, and serializes replies into the
//! standard JSON envelope. All I/O lives here; the core stays
//! synchronous and log-free.

pub mod config;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod seed;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
