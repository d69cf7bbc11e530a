use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Genre {
    pub genre_id: u32,
    pub genre_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub ranking_value: u32,
    pub ranking_name: String,
}

/// A movie that passed validation and is ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub imdb_id: String,
    pub title: String,
    pub poster_path: Option<String>,
    pub youtube_id: Option<String>,
    pub genre: Vec<Genre>,
    pub admin_review: Option<String>,
    pub ranking: Option<Ranking>,
}

impl NewMovie {
    pub fn new(imdb_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: title.into(),
            poster_path: None,
            youtube_id: None,
            genre: Vec::new(),
            admin_review: None,
            ranking: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Movie<T> {
    pub id: T,
    pub imdb_id: String,
    pub title: String,
    pub poster_path: Option<String>,
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub genre: Vec<Genre>,
    pub admin_review: Option<String>,
    pub ranking: Option<Ranking>,
}

impl<T> Movie<T> {
    pub fn from_new(id: T, new_movie: NewMovie) -> Self {
        Self {
            id,
            imdb_id: new_movie.imdb_id,
            title: new_movie.title,
            poster_path: new_movie.poster_path,
            youtube_id: new_movie.youtube_id,
            genre: new_movie.genre,
            admin_review: new_movie.admin_review,
            ranking: new_movie.ranking,
        }
    }
}

/// What the store hands back after a successful insert.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct InsertAck<T> {
    pub inserted_id: T,
}

impl<T> InsertAck<T> {
    pub fn new(inserted_id: T) -> Self {
        Self { inserted_id }
    }
}
