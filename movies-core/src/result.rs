use error_stack::Report;

pub type RepoResult<T> = Result<T, Report<MovieRepoError>>;
pub type OptRepoResult<T> = Result<Option<T>, Report<MovieRepoError>>;

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum MovieRepoError {
    #[error("failed to list movies: {0}")]
    List(ListErrorType),
    #[error("failed to get movie")]
    Get,
    #[error("failed to create movie: {0}")]
    Create(CreateErrorType),
}

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum ListErrorType {
    #[error("query failed")]
    Query,
    #[error("documents could not be decoded")]
    Decode,
}

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum CreateErrorType {
    #[error("insert failed")]
    DbError,
    #[error("store returned an unexpected id")]
    UnexpectedId,
}
