use crate::error::MovieServiceError;
use crate::routes::requests::CreateMovieRequest;
use crate::routes::api_doc::ErrorBody;
use crate::routes::responses::{CreatedResponse, MovieResponse};
use crate::service::MovieService;
use crate::state::MovieAppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response, Result},
};
use movies_core::MovieEngine;
use movies_core::model::{InsertAck, Movie};
use movies_core::result::{ListErrorType, MovieRepoError};
use routing::router::RouterBuilder;
use routing::{EndpointError, ErrorResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::OpenApi;
use utoipa::ToSchema;

mod api_doc;
pub mod requests;
mod responses;

pub const MOVIES_ROOT_PATH: &str = "/movies";

const MOVIE_LIST_PATH: &str = "";
const MOVIE_CREATE_PATH: &str = "";
const MOVIE_MISSING_ID_PATH: &str = "/";
const MOVIE_GET_PATH: &str = "/{imdb_id}";

const FETCH_FAILED: &str = "failed to fetch movies";
const DECODE_FAILED: &str = "failed to decode movies";
const ID_REQUIRED: &str = "movie id is required";
const INVALID_ID: &str = "invalid movie id";
const NOT_FOUND: &str = "movie not found";
const INVALID_INPUT: &str = "invalid input";
const VALIDATION_FAILED: &str = "validation failed";
const CREATE_FAILED: &str = "failed to add movie";

#[derive(OpenApi)]
#[openapi(paths(list_movies, get_movie, create_movie))]
struct ApiDoc;

pub fn build<E: MovieEngine>(app_state: MovieAppState<E>) -> Router {
    let metrics_handle = app_state.metrics_handle.clone();

    let builder = RouterBuilder::new(MOVIES_ROOT_PATH)
        .not_found_message(NOT_FOUND)
        .get(MOVIE_LIST_PATH, list_movies::<E>)
        .post(MOVIE_CREATE_PATH, create_movie::<E>)
        .get(MOVIE_MISSING_ID_PATH, movie_id_required)
        .get(MOVIE_GET_PATH, get_movie::<E>);

    match metrics_handle {
        Some(handle) => {
            info!("metrics enabled, setting up metrics handler");
            builder.build_with_metrics(app_state, ApiDoc::openapi(), handle)
        }
        None => {
            info!("metrics not enabled, setting up service unavailable metrics handler");
            builder.build_no_metrics(app_state, ApiDoc::openapi())
        }
    }
}

#[derive(Debug, ToSchema, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
/// The type of the ID the store assigns to a movie.
/// This changes depending on how the app is configured.
struct IdType;

type ResponseType = Movie<IdType>;
type CreatedType = InsertAck<IdType>;

/// List every movie in the collection.
#[utoipa::path(
    get,
    path = "/movies",
    responses(
        (status = OK, description = "All movies, possibly none", body = Vec<ResponseType>,
            example = json!([api_doc::examples::movie()])),
        (status = INTERNAL_SERVER_ERROR, description = "The movies could not be queried or decoded", body = ErrorBody),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_movies<E>(
    State(service): State<MovieService<E>>,
) -> Result<Response, EndpointError<MovieServiceError>>
where
    E: MovieEngine,
{
    let movies = service.list().await.map_err(|report| {
        let message = match report.downcast_ref::<MovieRepoError>() {
            Some(MovieRepoError::List(ListErrorType::Decode)) => DECODE_FAILED,
            _ => FETCH_FAILED,
        };
        EndpointError::new(report, message)
    })?;

    Ok(Json(movies).into_response())
}

/// Get the movie with the given IMDb id.
#[utoipa::path(
    get,
    path = "/movies/{imdb_id}",
    responses(
        (status = OK, description = "A movie with the given IMDb id exists", body = ResponseType,
            example = json!(api_doc::examples::movie())),
        (status = BAD_REQUEST, description = "The IMDb id was empty or not valid UTF-8", body = ErrorBody),
        (status = NOT_FOUND, description = "No movie with the given IMDb id could be found", body = ErrorBody),
    ),
    params(
        ("imdb_id" = String, Path, description = "The IMDb id of the movie, e.g. tt0111161"),
    )
)]
#[instrument(skip(service))]
pub async fn get_movie<E>(
    State(service): State<MovieService<E>>,
    imdb_id: Result<Path<String>, PathRejection>,
) -> Response
where
    E: MovieEngine,
{
    let Path(imdb_id) = match imdb_id {
        Ok(imdb_id) => imdb_id,
        Err(rejection) => {
            warn!("rejected movie id: {rejection}");
            return ErrorResponse::bad_request(INVALID_ID).into_response();
        }
    };

    if imdb_id.trim().is_empty() {
        return ErrorResponse::bad_request(ID_REQUIRED).into_response();
    }

    match service.get(imdb_id).await {
        Ok(Some(movie)) => MovieResponse::ok(movie).into_response(),
        Ok(None) => ErrorResponse::not_found(NOT_FOUND).into_response(),
        Err(report) => {
            error!("movie lookup failed, answering not found: {report:?}");
            ErrorResponse::not_found(NOT_FOUND).into_response()
        }
    }
}

/// `GET /movies/` carries an empty id.
async fn movie_id_required() -> Response {
    ErrorResponse::bad_request(ID_REQUIRED).into_response()
}

/// Validate and store a new movie, answering with the id the store assigned.
#[utoipa::path(
    post,
    path = "/movies",
    responses(
        (status = CREATED, description = "The movie was stored", body = CreatedType,
            example = json!(api_doc::examples::created())),
        (status = BAD_REQUEST, description = "The body was not a movie, or a field failed validation",
            body = ErrorBody, example = json!(api_doc::examples::validation_failed())),
        (status = INTERNAL_SERVER_ERROR, description = "The movie could not be stored", body = ErrorBody),
    ),
    request_body(content = CreateMovieRequest, example = json!(api_doc::examples::shawshank_request()))
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_movie<E>(
    State(service): State<MovieService<E>>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<Response, EndpointError<MovieServiceError>>
where
    E: MovieEngine,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("rejected movie body: {rejection}");
            return Ok(ErrorResponse::bad_request(INVALID_INPUT).into_response());
        }
    };

    let new_movie = match request.validated() {
        Ok(new_movie) => new_movie,
        Err(errors) => {
            warn!("movie failed validation: {errors}");
            return Ok(ErrorResponse::with_details(
                StatusCode::BAD_REQUEST,
                VALIDATION_FAILED,
                errors,
            )
            .into_response());
        }
    };

    let ack = service
        .create(new_movie)
        .await
        .map_err(|report| EndpointError::new(report, CREATE_FAILED))?;

    Ok(CreatedResponse::created(ack).into_response())
}
