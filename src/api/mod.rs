// src/api/mod.rs
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{configure, configure_routes};
pub use state::AppState;
