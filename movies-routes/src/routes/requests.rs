use movies_core::model::{Genre, NewMovie, Ranking};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

const IMDB_ID_PREFIX: &str = "tt";
const IMDB_ID_MIN_DIGITS: usize = 7;
const IMDB_ID_MAX_DIGITS: usize = 10;

/// A movie as posted by a client. Required fields are optional here so that a missing
/// field surfaces as a validation failure with details instead of a decode failure.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMovieRequest {
    /// IMDb identifier, e.g. `tt0111161`.
    #[validate(required, custom(function = "validate_imdb_id"))]
    pub imdb_id: Option<String>,
    #[validate(required, length(min = 2, max = 500))]
    pub title: Option<String>,
    #[validate(url)]
    pub poster_path: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub youtube_id: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub genre: Vec<GenreRequest>,
    #[validate(length(max = 5000))]
    pub admin_review: Option<String>,
    #[validate(nested)]
    pub ranking: Option<RankingRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenreRequest {
    #[validate(range(min = 1))]
    pub genre_id: u32,
    #[validate(length(min = 1, max = 100))]
    pub genre_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RankingRequest {
    pub ranking_value: u32,
    #[validate(length(min = 1, max = 100))]
    pub ranking_name: String,
}

fn validate_imdb_id(imdb_id: &str) -> Result<(), ValidationError> {
    let valid = imdb_id.strip_prefix(IMDB_ID_PREFIX).is_some_and(|digits| {
        (IMDB_ID_MIN_DIGITS..=IMDB_ID_MAX_DIGITS).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
    });

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("imdb_id")
            .with_message("expected 'tt' followed by 7 to 10 digits".into()))
    }
}

impl CreateMovieRequest {
    pub fn validated(self) -> Result<NewMovie, ValidationErrors> {
        self.validate()?;

        // both are `required` above, validate() already rejected a missing one
        let (Some(imdb_id), Some(title)) = (self.imdb_id, self.title) else {
            return Err(ValidationErrors::new());
        };

        Ok(NewMovie {
            imdb_id,
            title,
            poster_path: self.poster_path,
            youtube_id: self.youtube_id,
            genre: self
                .genre
                .into_iter()
                .map(|g| Genre {
                    genre_id: g.genre_id,
                    genre_name: g.genre_name,
                })
                .collect(),
            admin_review: self.admin_review,
            ranking: self.ranking.map(|r| Ranking {
                ranking_value: r.ranking_value,
                ranking_name: r.ranking_name,
            }),
        })
    }
}
