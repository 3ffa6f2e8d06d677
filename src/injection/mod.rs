// Failure injection: path routing table, alternating counter and canned replies.

pub mod counter;
pub mod dispatcher;
pub mod reply;
pub mod route;

#[cfg(test)]
mod route_test;

pub use counter::AlternatingCounter;
pub use dispatcher::Dispatcher;
pub use reply::Reply;
pub use route::{resolve, Behavior};
