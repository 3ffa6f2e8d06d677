//! Legacy hang-only controller: 200 headers right away, then a stalled body.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use bytes::Bytes;
use std::convert::Infallible;
use std::time::Duration;
use tracing::debug;

use super::controller::{is_supported, not_implemented, Controller};
use crate::injection::reply::TEXT_PLAIN;

pub struct HangOnlyController {
    hang: Duration,
}

impl HangOnlyController {
    pub fn new(hang: Duration) -> Self {
        Self { hang }
    }

    async fn handle(hang: Duration, method: Method) -> Response {
        if !is_supported(&method) {
            return not_implemented(&method);
        }

        debug!(
            component = "controller",
            event = "hang_started",
            hang = ?hang,
            "stalling response body"
        );

        let stalled = futures::stream::once(async move {
            tokio::time::sleep(hang).await;
            Ok::<_, Infallible>(Bytes::new())
        });

        (
            StatusCode::OK,
            [(CONTENT_TYPE, TEXT_PLAIN)],
            Body::from_stream(stalled),
        )
            .into_response()
    }
}

impl Controller for HangOnlyController {
    fn add_route(&self, router: Router) -> Router {
        let hang = self.hang;
        router.fallback(move |method: Method| Self::handle(hang, method))
    }
}
