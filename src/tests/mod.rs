//! End-to-end tests for the mock server.
//!
//! Every case starts its own server on an ephemeral loopback port, so cases
//! run in parallel without sharing counters.


pub mod support;
