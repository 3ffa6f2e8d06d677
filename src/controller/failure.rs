//! Failure injection controller.

use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;

use super::controller::{is_supported, not_implemented, Controller};
use crate::injection::Dispatcher;

/// FailureInjectionController answers every path through the routing table.
pub struct FailureInjectionController {
    dispatcher: Arc<Dispatcher>,
}

impl FailureInjectionController {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    async fn handle(dispatcher: Arc<Dispatcher>, method: Method, uri: Uri) -> Response {
        if !is_supported(&method) {
            return not_implemented(&method);
        }
        dispatcher.dispatch(uri.path()).await.into_response()
    }
}

impl Controller for FailureInjectionController {
    fn add_route(&self, router: Router) -> Router {
        let dispatcher = self.dispatcher.clone();
        router.fallback(move |method: Method, uri: Uri| {
            let dispatcher = dispatcher.clone();
            async move { Self::handle(dispatcher, method, uri).await }
        })
    }
}
