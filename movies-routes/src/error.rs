#[derive(Debug, thiserror::Error)]
#[error("movie service failed")]
pub struct MovieServiceError;
