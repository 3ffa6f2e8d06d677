// Request middlewares.

pub mod connection_middleware;
pub mod middleware;
pub mod trace_middleware;

pub use connection_middleware::ConnectionCloseMiddleware;
pub use middleware::Middleware;
pub use trace_middleware::TraceMiddleware;
