use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_stack::Report;
use serde::Serialize;
use std::borrow::Cow;
use std::error::Error;

pub type ErrorMessageType = Cow<'static, str>;

const DEFAULT_INTERNAL_MESSAGE: &str = "internal server error";

/// The body of every non-success response: `{"error": "..."}`, with optional `details`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse<T = ()> {
    #[serde(skip)]
    status_code: StatusCode,
    error: ErrorMessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<T>,
}

impl ErrorResponse<()> {
    pub fn bad_request(message: impl Into<ErrorMessageType>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, None)
    }

    pub fn not_found(message: impl Into<ErrorMessageType>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, None)
    }

    pub fn internal(message: impl Into<ErrorMessageType>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, None)
    }
}

impl<T: Serialize> ErrorResponse<T> {
    pub fn new(
        status_code: StatusCode,
        message: impl Into<ErrorMessageType>,
        details: Option<T>,
    ) -> Self {
        Self {
            status_code,
            error: message.into(),
            details,
        }
    }

    pub fn with_details(
        status_code: StatusCode,
        message: impl Into<ErrorMessageType>,
        details: T,
    ) -> Self {
        Self::new(status_code, message, Some(details))
    }
}

impl<T: Serialize> IntoResponse for ErrorResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// A failed endpoint. The report stays server side (it is what `#[instrument(err(Debug))]`
/// logs), the client only ever sees `message` with a 500.
#[derive(thiserror::Error)]
#[error("there was an error running the endpoint")]
pub struct EndpointError<T: Error> {
    report: Report<T>,
    message: ErrorMessageType,
}

impl<T: Error> EndpointError<T> {
    pub fn new(report: Report<T>, message: impl Into<ErrorMessageType>) -> Self {
        Self {
            report,
            message: message.into(),
        }
    }
}

impl<T: Error> std::fmt::Debug for EndpointError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.report.fmt(f)
    }
}

impl<T> From<Report<T>> for EndpointError<T>
where
    T: Error,
{
    fn from(value: Report<T>) -> Self {
        Self::new(value, DEFAULT_INTERNAL_MESSAGE)
    }
}

impl<T: Error> IntoResponse for EndpointError<T> {
    fn into_response(self) -> Response {
        ErrorResponse::internal(self.message).into_response()
    }
}
