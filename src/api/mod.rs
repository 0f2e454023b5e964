// API layer module (HTTP adapters)

pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
