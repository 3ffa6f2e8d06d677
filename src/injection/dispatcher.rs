//! Request dispatcher: maps a request path to a simulated upstream fault.

use axum::http::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::counter::AlternatingCounter;
use super::reply::Reply;
use super::route::{resolve, Behavior};
use crate::config::{Config, ConfigTrait};

/// Dispatches requests against the routing table.
///
/// The counter is shared with the owning server instance, never global, so
/// several servers in one process don't interfere with each other.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    counter: Arc<AlternatingCounter>,
    hang: Duration,
    error_step: u64,
    hang_step: u64,
}

impl Dispatcher {
    pub fn new(counter: Arc<AlternatingCounter>, cfg: &Config) -> Self {
        Self {
            counter,
            hang: cfg.hang().duration,
            error_step: cfg.counter().error_step,
            hang_step: cfg.counter().hang_step,
        }
    }

    pub fn counter(&self) -> &Arc<AlternatingCounter> {
        &self.counter
    }

    /// Produces the reply for `path`, sleeping first when the behavior hangs.
    pub async fn dispatch(&self, path: &str) -> Reply {
        let behavior = resolve(path);
        debug!(
            component = "dispatcher",
            event = "resolved",
            path = path,
            behavior = behavior.as_str(),
            "request resolved"
        );

        match behavior {
            Behavior::Forbidden => Reply::Status(StatusCode::FORBIDDEN),
            Behavior::NotFound => Reply::Status(StatusCode::NOT_FOUND),
            Behavior::Unavailable => Reply::Status(StatusCode::SERVICE_UNAVAILABLE),
            Behavior::Xml => Reply::Xml,
            Behavior::Ok => Reply::Ok,
            Behavior::Hang => {
                self.hang().await;
                Reply::Ok
            }
            Behavior::ResetCounter => {
                self.counter.reset();
                info!(
                    component = "dispatcher",
                    event = "counter_reset",
                    "alternating counter reset"
                );
                Reply::Ok
            }
            Behavior::EachThirdOthers503 => {
                let value = self.counter.advance(self.error_step);
                let success = AlternatingCounter::is_success_turn(value);
                debug!(
                    component = "dispatcher",
                    event = "counter_advanced",
                    counter = value,
                    success = success,
                    "alternating 503 turn"
                );
                if success {
                    Reply::Ok
                } else {
                    Reply::Status(StatusCode::SERVICE_UNAVAILABLE)
                }
            }
            Behavior::EachThirdOthersHang => {
                let value = self.counter.advance(self.hang_step);
                let success = AlternatingCounter::is_success_turn(value);
                debug!(
                    component = "dispatcher",
                    event = "counter_advanced",
                    counter = value,
                    success = success,
                    "alternating hang turn"
                );
                if !success {
                    self.hang().await;
                }
                Reply::Ok
            }
        }
    }

    async fn hang(&self) {
        debug!(
            component = "dispatcher",
            event = "hang_started",
            hang = ?self.hang,
            "holding request"
        );
        tokio::time::sleep(self.hang).await;
    }
}
