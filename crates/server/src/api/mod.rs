pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod watermark;

pub use routes::create_router;
