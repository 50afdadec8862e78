//! Response construction.
//!
//! A block is always 403 with a message naming the field; an allow is 200.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::inspection::Decision;

pub const ALLOWED_MESSAGE: &str = "Request allowed.\n";
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large.\n";

impl IntoResponse for Decision {
    fn into_response(self) -> Response {
        match self {
            Decision::Allowed => (StatusCode::OK, ALLOWED_MESSAGE).into_response(),
            Decision::Blocked(field) => {
                (StatusCode::FORBIDDEN, field.block_message()).into_response()
            }
        }
    }
}

/// Response for a POST whose declared body exceeds the configured limit.
pub fn body_too_large() -> Response {
    (StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE_MESSAGE).into_response()
}
