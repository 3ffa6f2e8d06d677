//! Canned responses.

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_XML: &str = "application/xml";
pub const OK_BODY: &str = "OK";
pub const XML_BODY: &str = "<error/>";

/// A response produced by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// 200 with body `OK`.
    Ok,
    /// Bare status with an empty body.
    Status(StatusCode),
    /// 200 with an XML error document.
    Xml,
}

impl Reply {
    pub fn status(&self) -> StatusCode {
        match self {
            Reply::Ok | Reply::Xml => StatusCode::OK,
            Reply::Status(code) => *code,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Ok => (StatusCode::OK, [(CONTENT_TYPE, TEXT_PLAIN)], OK_BODY).into_response(),
            Reply::Status(code) => (code, [(CONTENT_TYPE, TEXT_PLAIN)]).into_response(),
            Reply::Xml => {
                (StatusCode::OK, [(CONTENT_TYPE, APPLICATION_XML)], XML_BODY).into_response()
            }
        }
    }
}
