use std::error::Error;
use std::fmt::{Display, Formatter};

use error_stack::{Report, ResultExt};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use movies_core::MovieRepository;
use movies_core::deadline::Deadline;
use movies_core::model::{Genre, InsertAck, Movie, NewMovie, Ranking};
use movies_core::result::{CreateErrorType, ListErrorType, MovieRepoError, OptRepoResult, RepoResult};
use serde::{Deserialize, Serialize, Serializer};
use tokio_stream::StreamExt;
use tracing::{debug, info};
use utoipa::ToSchema;

use super::{ConnectError, ConnectionDetails};

pub const MOVIES_COLLECTION_NAME: &str = "movies";

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy)]
#[repr(transparent)]
#[schema(value_type = String)]
pub struct MovieId(#[serde(serialize_with = "obj_id_serialize")] ObjectId);

fn obj_id_serialize<S>(id: &ObjectId, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    id.to_hex().serialize(ser)
}

impl MovieId {
    pub fn new_with(id: ObjectId) -> Self {
        Self(id)
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize)]
struct NewMovieDocument {
    imdb_id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    youtube_id: Option<String>,
    genre: Vec<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    admin_review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranking: Option<Ranking>,
}

impl From<NewMovie> for NewMovieDocument {
    fn from(value: NewMovie) -> Self {
        Self {
            imdb_id: value.imdb_id,
            title: value.title,
            poster_path: value.poster_path,
            youtube_id: value.youtube_id,
            genre: value.genre,
            admin_review: value.admin_review,
            ranking: value.ranking,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MongoMovie {
    #[serde(rename = "_id")]
    id: MovieId,
    imdb_id: String,
    title: String,
    poster_path: Option<String>,
    youtube_id: Option<String>,
    #[serde(default)]
    genre: Vec<Genre>,
    admin_review: Option<String>,
    ranking: Option<Ranking>,
}

impl From<MongoMovie> for Movie<MovieId> {
    fn from(value: MongoMovie) -> Self {
        Self {
            id: value.id,
            imdb_id: value.imdb_id,
            title: value.title,
            poster_path: value.poster_path,
            youtube_id: value.youtube_id,
            genre: value.genre,
            admin_review: value.admin_review,
            ranking: value.ranking,
        }
    }
}

/// One shared handle to the `movies` collection. `Database` is reference counted
/// internally, so clones are cheap and all of them share the client's pool.
#[derive(Debug, Clone)]
pub struct MovieRepo {
    db: Database,
}

impl MovieRepo {
    pub fn new(client: Client, db_name: &str) -> Self {
        Self {
            db: client.database(db_name),
        }
    }

    pub async fn init(
        connection_details: ConnectionDetails,
        db_name: &str,
    ) -> Result<MovieRepo, Report<ConnectError>> {
        let client = match connection_details {
            ConnectionDetails::Url(url) => Client::with_uri_str(url)
                .await
                .change_context(ConnectError)?,
        };

        let repo = Self::new(client, db_name);
        repo.ensure_indexes().await?;
        Ok(repo)
    }

    /// `imdb_id` is unique per collection. The store enforces it, inserts of a duplicate fail.
    pub async fn ensure_indexes(&self) -> Result<(), Report<ConnectError>> {
        let index = IndexModel::builder()
            .keys(doc! { "imdb_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let result = self
            .db
            .collection::<Document>(MOVIES_COLLECTION_NAME)
            .create_index(index)
            .await
            .change_context(ConnectError)
            .attach("could not create the unique imdb_id index")?;

        info!("index {} ready on {MOVIES_COLLECTION_NAME}", result.index_name);
        Ok(())
    }
}

/// Runs one store step under `deadline`, folding both the timeout and the step's own
/// failure into `context`.
async fn bounded<F, T, E>(deadline: &Deadline, step: F, context: MovieRepoError) -> RepoResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: Error + Send + Sync + 'static,
{
    deadline
        .run(step)
        .await
        .change_context(context)
        .attach_with(|| format!("store call exceeded the {deadline}"))?
        .change_context(context)
}

impl MovieRepository for MovieRepo {
    type MovieId = MovieId;

    async fn list(&self, deadline: Deadline) -> RepoResult<Vec<Movie<Self::MovieId>>> {
        let cursor = bounded(
            &deadline,
            self.db
                .collection::<MongoMovie>(MOVIES_COLLECTION_NAME)
                .find(Document::default()),
            MovieRepoError::List(ListErrorType::Query),
        )
        .await?;

        let movies: Vec<Movie<MovieId>> = bounded(
            &deadline,
            cursor
                .map(|m| m.map(Movie::<MovieId>::from))
                .collect::<Result<Vec<_>, _>>(),
            MovieRepoError::List(ListErrorType::Decode),
        )
        .await?;

        debug!("listed {} movies", movies.len());
        Ok(movies)
    }

    async fn get(&self, imdb_id: String, deadline: Deadline) -> OptRepoResult<Movie<Self::MovieId>> {
        bounded(
            &deadline,
            self.db
                .collection::<MongoMovie>(MOVIES_COLLECTION_NAME)
                .find_one(doc! { "imdb_id": imdb_id.as_str() }),
            MovieRepoError::Get,
        )
        .await
        .attach_with(|| format!("imdb_id {imdb_id}"))
        .map(|m| m.map(From::from))
    }

    async fn create(
        &self,
        new_movie: NewMovie,
        deadline: Deadline,
    ) -> RepoResult<InsertAck<Self::MovieId>> {
        let document = NewMovieDocument::from(new_movie);

        let result = bounded(
            &deadline,
            self.db
                .collection::<NewMovieDocument>(MOVIES_COLLECTION_NAME)
                .insert_one(&document),
            MovieRepoError::Create(CreateErrorType::DbError),
        )
        .await
        .attach_with(|| format!("imdb_id {}", document.imdb_id))?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(MovieRepoError::Create(CreateErrorType::UnexpectedId))
            .attach_with(|| format!("inserted id {:?} was not an ObjectId", result.inserted_id))?;

        let id = MovieId::new_with(id);
        debug!("inserted movie {} as {id}", document.imdb_id);
        Ok(InsertAck::new(id))
    }
}
