use mongodb::Client;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use movies_core::model::{Genre, Ranking};
use serde::{Deserialize, Serialize};

pub const TEST_DATABASE: &str = "magic-stream";
pub const MOVIES_COLLECTION: &str = "movies";

/// A movie document as it sits in the store, minus the `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredMovie {
    pub imdb_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre: Vec<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<Ranking>,
}

impl StoredMovie {
    pub fn new(imdb_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: title.into(),
            poster_path: None,
            genre: Vec::new(),
            ranking: None,
        }
    }
}

#[derive(Default)]
pub struct Migration {
    steps: Vec<MigrationStep>,
    total: usize,
}

enum MigrationStep {
    Fill(usize),
    Movie(StoredMovie),
    Raw(Document),
}

impl Migration {
    /// Inserts `fill` movies whose contents the test won't rely on, each with its own imdb id.
    pub fn fill(mut self, fill: usize) -> Self {
        self.steps.push(MigrationStep::Fill(fill));
        self.total += fill;
        self
    }

    pub fn single(mut self, movie: StoredMovie) -> Self {
        self.total += 1;
        self.steps.push(MigrationStep::Movie(movie));
        self
    }

    /// Bypasses the movie shape entirely, for documents the service should fail to decode.
    pub fn raw(mut self, document: Document) -> Self {
        self.total += 1;
        self.steps.push(MigrationStep::Raw(document));
        self
    }

    pub async fn run(self, client: Client) -> Vec<ObjectId> {
        let mut documents = Vec::with_capacity(self.total);

        for step in self.steps {
            match step {
                MigrationStep::Fill(fill) => {
                    let start = documents.len();
                    documents.extend(
                        (start..start + fill).map(|i| to_document(&generate_filler_movie(i))),
                    )
                }
                MigrationStep::Movie(movie) => documents.push(to_document(&movie)),
                MigrationStep::Raw(document) => documents.push(document),
            }
        }

        insert_many(client, documents).await
    }
}

pub async fn count(client: &Client) -> u64 {
    client
        .database(TEST_DATABASE)
        .collection::<Document>(MOVIES_COLLECTION)
        .count_documents(doc! {})
        .await
        .unwrap()
}

fn generate_filler_movie(i: usize) -> StoredMovie {
    StoredMovie::new(format!("tt{:07}", 9_000_000 + i), "filler movie")
}

fn to_document(movie: &StoredMovie) -> Document {
    mongodb::bson::to_document(movie).unwrap()
}

async fn insert_many(client: Client, documents: Vec<Document>) -> Vec<ObjectId> {
    let ids = client
        .database(TEST_DATABASE)
        .collection::<Document>(MOVIES_COLLECTION)
        .insert_many(documents)
        .await
        .unwrap()
        .inserted_ids;

    (0..ids.len())
        .map(|i| ids[&i].as_object_id().unwrap())
        .collect()
}
