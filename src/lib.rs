#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod app;
pub mod config;
pub mod controller;
pub mod http;
pub mod injection;
pub mod middleware;
pub mod shutdown;
