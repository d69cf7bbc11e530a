use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movies_core::MovieId;
use movies_core::model::{InsertAck, Movie};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MovieResponse<T> {
    #[serde(skip)]
    status_code: StatusCode,
    #[serde(flatten)]
    movie: Movie<T>,
}

impl<T> MovieResponse<T> {
    pub fn ok(movie: Movie<T>) -> Self {
        Self {
            status_code: StatusCode::OK,
            movie,
        }
    }
}

impl<T: MovieId> IntoResponse for MovieResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// The store's acknowledgement of a new movie, returned with `201 Created`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse<T> {
    #[serde(skip)]
    status_code: StatusCode,
    #[serde(flatten)]
    ack: InsertAck<T>,
}

impl<T> CreatedResponse<T> {
    pub fn created(ack: InsertAck<T>) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            ack,
        }
    }
}

impl<T: MovieId> IntoResponse for CreatedResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
