pub mod handlers;
pub mod insights;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
