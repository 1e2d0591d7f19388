use crate::store::IndexOutOfRange;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Failures reported to HTTP clients as a JSON string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("error: index out of range")]
    IndexOutOfRange,

    #[error("error: timeout waiting for sensor")]
    Timeout,

    #[error("error: serial transport failure")]
    Transport,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::IndexOutOfRange => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Transport => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<IndexOutOfRange> for ApiError {
    fn from(_: IndexOutOfRange) -> Self {
        Self::IndexOutOfRange
    }
}

impl From<line_rpc::Error> for ApiError {
    fn from(e: line_rpc::Error) -> Self {
        match e {
            line_rpc::Error::Timeout => Self::Timeout,
            line_rpc::Error::TransportError => Self::Transport,
            line_rpc::Error::ChannelUnavailable { .. } => {
                error!("Serial channel went away: {e}");
                Self::Transport
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_string())).into_response()
    }
}
