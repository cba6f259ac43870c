pub mod handlers;
pub mod middleware;
pub mod notices;
pub mod routes;
pub mod search;
pub mod settings;

pub use routes::create_router;
