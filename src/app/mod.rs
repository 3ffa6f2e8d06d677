// Application: server wiring and lifecycle.

pub mod app;
pub mod server;

pub use app::App;
pub use server::MockHttpServer;
