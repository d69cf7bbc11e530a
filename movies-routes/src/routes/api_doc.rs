use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Every failure answers with this body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    error: String,
    /// Per-field validation failures, only present when validation failed.
    #[schema(value_type = Option<Object>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

pub mod examples {
    use serde_json::{Value, json};

    pub fn shawshank_request() -> Value {
        json!({
            "imdb_id": "tt0111161",
            "title": "The Shawshank Redemption",
        })
    }

    pub fn movie() -> Value {
        json!({
            "id": "65f1a2b3c4d5e6f708192a3b",
            "imdb_id": "tt0111161",
            "title": "The Shawshank Redemption",
            "poster_path": "https://image.tmdb.org/t/p/original/shawshank.jpg",
            "youtube_id": "PLl99DlL6b4",
            "genre": [{ "genre_id": 2, "genre_name": "Drama" }],
            "admin_review": null,
            "ranking": { "ranking_value": 1, "ranking_name": "Excellent" },
        })
    }

    pub fn created() -> Value {
        json!({ "inserted_id": "65f1a2b3c4d5e6f708192a3b" })
    }

    pub fn validation_failed() -> Value {
        json!({
            "error": "validation failed",
            "details": {
                "title": [{ "code": "required", "message": null, "params": { "value": null } }],
            },
        })
    }
}
