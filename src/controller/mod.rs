// HTTP controllers: one per server mode.

pub mod controller;
pub mod failure;
pub mod hang;

pub use controller::Controller;
pub use failure::FailureInjectionController;
pub use hang::HangOnlyController;
