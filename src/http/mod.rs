// HTTP module: listener binding and the serve loop.

pub mod server;

// Re-export server types
pub use server::{HttpServer, Server};

// Common route and middleware interfaces
pub use crate::controller::Controller;
pub use crate::middleware::Middleware;
