use crate::error::MovieServiceError;
use error_stack::Report;

pub type ServiceResult<T> = Result<T, Report<MovieServiceError>>;
pub type OptServiceResult<T> = Result<Option<T>, Report<MovieServiceError>>;

pub mod error;
mod metrics;
pub mod routes;
pub mod service;
pub mod state;
