use deadline::Deadline;
use model::{InsertAck, Movie, NewMovie};
use result::{OptRepoResult, RepoResult};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use utoipa::ToSchema;

pub mod deadline;
pub mod model;
pub mod result;

pub trait MovieEngine: Clone + Send + Sync + 'static {
    type MovieId: MovieId;
    type Repo: MovieRepository<MovieId = Self::MovieId> + Send + Sync + 'static;

    fn repo(&self) -> Self::Repo;
}

/// Access to the `movies` collection. Every call is bounded by the given [`Deadline`];
/// once it passes the in-flight store call is dropped and reported as a failure.
pub trait MovieRepository {
    type MovieId: MovieId;

    fn list(
        &self,
        deadline: Deadline,
    ) -> impl Future<Output = RepoResult<Vec<Movie<Self::MovieId>>>> + Send;

    fn get(
        &self,
        imdb_id: String,
        deadline: Deadline,
    ) -> impl Future<Output = OptRepoResult<Movie<Self::MovieId>>> + Send;

    fn create(
        &self,
        new_movie: NewMovie,
        deadline: Deadline,
    ) -> impl Future<Output = RepoResult<InsertAck<Self::MovieId>>> + Send;
}

pub trait MovieId:
    Debug + Send + Sync + Serialize + for<'de> Deserialize<'de> + Clone + ToSchema + PartialEq
{
}

impl<T> MovieId for T where
    T: Debug + Send + Sync + Serialize + for<'de> Deserialize<'de> + Clone + ToSchema + PartialEq
{
}
