use axum_test::TestServer;
use axum_test::http::StatusCode;
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use movies_core::MovieEngine;
use movies_core::MovieRepository;
use movies_core::model::{Genre, Ranking};
use movies_routes::state::MovieAppState;
use repositories::mongodb::movies::MovieRepo;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::time::Duration;
use testcontainers_modules::mongo::Mongo;
use testcontainers_modules::testcontainers::ContainerAsync;
use testcontainers_modules::testcontainers::runners::AsyncRunner;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::mongo::migration::{self, Migration, StoredMovie, TEST_DATABASE};

struct TestRuntime {
    _container: ContainerAsync<Mongo>,
    test_server: TestServer,
    client: Client,
}

macro_rules! int_test {
    ($name:ident => $f:expr) => {
        #[rstest]
        #[tokio::test]
        #[cfg_attr(not(feature = "docker-tests"), ignore = "starts a mongodb container")]
        async fn $name(#[from(init)] _init: &(), #[future] runtime: TestRuntime) {
            let runtime = runtime.await;
            let server = runtime.test_server;
            let client = runtime.client;
            ($f)(server, client).await
        }
    };
}

int_test!(list_empty_collection_is_empty_array => |server: TestServer, _: Client| async move {
    let response = server.get("/movies").await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
});

int_test!(
    list_returns_every_stored_movie => |server: TestServer, client: Client| async move {
        let ids = Migration::default()
            .fill(5)
            .run(client)
            .await;

        let body: Vec<Value> = server.get("/movies").await.json();

        assert_eq!(5, body.len());
        for id in ids {
            assert!(
                body.iter().any(|movie| movie["id"] == json!(id.to_hex())),
                "listed movies contain {id}"
            );
        }
    }
);

int_test!(
    list_undecodable_document_is_internal_error => |server: TestServer, client: Client| async move {
        Migration::default()
            .fill(2)
            .raw(doc! { "imdb_id": "tt0000001", "title": 1994 })
            .run(client)
            .await;

        let response = server.get("/movies").expect_failure().await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "failed to decode movies" }));
    }
);

int_test!(
    get_stored_movie_by_imdb_id => |server: TestServer, client: Client| async move {
        let mut godfather = StoredMovie::new("tt0068646", "The Godfather");
        godfather.genre.push(Genre { genre_id: 4, genre_name: "Crime".to_string() });
        godfather.ranking = Some(Ranking { ranking_value: 1, ranking_name: "Excellent".to_string() });

        let ids = Migration::default()
            .fill(10)
            .single(godfather)
            .run(client)
            .await;

        let response = server.get("/movies/tt0068646").await;

        response.assert_status_ok();
        response.assert_json_contains(&json!({
            "id": ids[10].to_hex(),
            "imdb_id": "tt0068646",
            "title": "The Godfather",
            "genre": [{ "genre_id": 4, "genre_name": "Crime" }],
            "ranking": { "ranking_value": 1, "ranking_name": "Excellent" },
        }));
    }
);

int_test!(
    get_unknown_imdb_id_not_found => |server: TestServer, client: Client| async move {
        Migration::default()
            .fill(20)
            .run(client)
            .await;

        let response = server.get("/movies/tt9999999999").expect_failure().await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "movie not found" }));
    }
);

int_test!(get_empty_id_bad_request => |server: TestServer, _: Client| async move {
    let response = server.get("/movies/").expect_failure().await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "movie id is required" }));
});

int_test!(
    create_then_get_round_trips => |server: TestServer, client: Client| async move {
        let created = server
            .post("/movies")
            .json(&json!({
                "imdb_id": "tt0111161",
                "title": "The Shawshank Redemption",
                "poster_path": "https://image.tmdb.org/t/p/original/shawshank.jpg",
                "youtube_id": "PLl99DlL6b4",
                "genre": [{ "genre_id": 1, "genre_name": "Drama" }],
                "admin_review": "Hope is a good thing.",
                "ranking": { "ranking_value": 1, "ranking_name": "Excellent" },
            }))
            .await;

        created.assert_status(StatusCode::CREATED);
        let inserted_id = created.json::<Value>()["inserted_id"]
            .as_str()
            .map(ToString::to_string)
            .unwrap();
        assert!(ObjectId::parse_str(&inserted_id).is_ok(), "{inserted_id} is an object id");
        assert_eq!(1, migration::count(&client).await);

        let response = server.get("/movies/tt0111161").await;

        response.assert_status_ok();
        response.assert_json_contains(&json!({
            "id": inserted_id,
            "imdb_id": "tt0111161",
            "title": "The Shawshank Redemption",
            "genre": [{ "genre_id": 1, "genre_name": "Drama" }],
            "admin_review": "Hope is a good thing.",
        }));
    }
);

int_test!(
    create_minimal_movie_shows_up_in_list => |server: TestServer, _: Client| async move {
        server
            .post("/movies")
            .json(&json!({ "imdb_id": "tt0110912", "title": "Pulp Fiction" }))
            .await
            .assert_status(StatusCode::CREATED);

        let body: Vec<Value> = server.get("/movies").await.json();

        assert_eq!(1, body.len());
        assert_eq!(json!("Pulp Fiction"), body[0]["title"]);
        assert_eq!(json!([]), body[0]["genre"]);
    }
);

int_test!(
    create_missing_title_rejected_and_not_stored => |server: TestServer, client: Client| async move {
        let response = server
            .post("/movies")
            .json(&json!({ "imdb_id": "tt0111161" }))
            .expect_failure()
            .await;

        response.assert_status_bad_request();
        response.assert_json_contains(&json!({ "error": "validation failed" }));
        assert_eq!(0, migration::count(&client).await);
    }
);

int_test!(
    create_malformed_body_invalid_input => |server: TestServer, client: Client| async move {
        let response = server
            .post("/movies")
            .json(&json!({ "imdb_id": "tt0111161", "title": ["not", "a", "title"] }))
            .expect_failure()
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "invalid input" }));
        assert_eq!(0, migration::count(&client).await);
    }
);

int_test!(
    create_duplicate_imdb_id_internal_error => |server: TestServer, client: Client| async move {
        Migration::default()
            .single(StoredMovie::new("tt0111161", "The Shawshank Redemption"))
            .run(client.clone())
            .await;

        let response = server
            .post("/movies")
            .json(&json!({ "imdb_id": "tt0111161", "title": "Shawshank, again" }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "failed to add movie" }));
        assert_eq!(1, migration::count(&client).await);
    }
);

#[fixture]
#[once]
fn init() -> () {
    init_logging();
}

#[fixture]
async fn runtime() -> TestRuntime {
    let container = Mongo::default().start().await.unwrap();
    let client = create_client(&container).await;

    let repo = MovieRepo::new(client.clone(), TEST_DATABASE);
    repo.ensure_indexes().await.unwrap();

    let routes = movies_routes::routes::build(MovieAppState::new_without_metrics(
        TestEngine { repo },
        Duration::from_secs(10),
    ));

    TestRuntime {
        _container: container,
        test_server: TestServer::new(routes).unwrap(),
        client,
    }
}

fn init_logging() {
    let log_level = std::env::var("MOVIES_TEST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LevelFilter::ERROR);

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(log_level))
        .init();
}

async fn create_client(container: &ContainerAsync<Mongo>) -> Client {
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(27017).await.unwrap();
    Client::with_uri_str(format!("mongodb://{host}:{port}/"))
        .await
        .unwrap()
}

#[derive(Clone)]
struct TestEngine {
    repo: MovieRepo,
}

impl MovieEngine for TestEngine {
    type MovieId = <MovieRepo as MovieRepository>::MovieId;

    type Repo = MovieRepo;

    fn repo(&self) -> Self::Repo {
        self.repo.clone()
    }
}
