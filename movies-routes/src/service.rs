use crate::error::MovieServiceError;
use crate::metrics;
use crate::{OptServiceResult, ServiceResult};
use error_stack::ResultExt;
use movies_core::deadline::Deadline;
use movies_core::model::{InsertAck, Movie, NewMovie};
use movies_core::{MovieEngine, MovieRepository};
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(100);

#[derive(Debug, Clone)]
pub struct MovieService<E> {
    engine: E,
    operation_timeout: Duration,
}

impl<E> MovieService<E>
where
    E: MovieEngine,
{
    pub fn with_operation_timeout(engine: E, operation_timeout: Duration) -> Self {
        MovieService {
            engine,
            operation_timeout,
        }
    }

    /// A fresh window per store call. It ends with the call, whichever way the call ends.
    fn deadline(&self) -> Deadline {
        Deadline::after(self.operation_timeout)
    }

    #[instrument(skip_all, name = "service#list")]
    pub async fn list(&self) -> ServiceResult<Vec<Movie<E::MovieId>>> {
        let movies = self
            .engine
            .repo()
            .list(self.deadline())
            .await
            .change_context(MovieServiceError)?;

        metrics::increment_movies_retrieved_by(movies.len());
        Ok(movies)
    }

    #[instrument(skip(self), name = "service#get")]
    pub async fn get(&self, imdb_id: String) -> OptServiceResult<Movie<E::MovieId>> {
        let movie = self
            .engine
            .repo()
            .get(imdb_id, self.deadline())
            .await
            .change_context(MovieServiceError)?;

        if movie.is_some() {
            metrics::increment_movies_retrieved();
        }
        Ok(movie)
    }

    #[instrument(skip_all, name = "service#create", fields(imdb_id = new_movie.imdb_id.as_str()))]
    pub async fn create(&self, new_movie: NewMovie) -> ServiceResult<InsertAck<E::MovieId>> {
        let ack = self
            .engine
            .repo()
            .create(new_movie, self.deadline())
            .await
            .change_context(MovieServiceError)?;

        debug!("movie created");
        metrics::increment_movies_created();
        Ok(ack)
    }
}
