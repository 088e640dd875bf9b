pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// Re-export commonly used types
pub use domain::errors::ModelError;
pub use domain::gallery::models::*;
pub use domain::user::models::*;
pub use inbound::http::router::create_router;
pub use inbound::http::router::AppState;
