//! One façade per backend resource family. Services only translate names
//! and shapes; failures come back untouched for the view-model to classify.

mod auth;
mod genres;
mod movies;
mod reviews;
mod series;

pub use auth::AuthService;
pub use genres::GenreService;
pub use movies::MovieService;
pub use reviews::ReviewService;
pub use series::SeriesService;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Every service over one shared client.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub movies: MovieService,
    pub series: SeriesService,
    pub genres: GenreService,
    pub reviews: ReviewService,
}

impl Services {
    pub fn new(api: ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            movies: MovieService::new(api.clone()),
            series: SeriesService::new(api.clone()),
            genres: GenreService::new(api.clone()),
            reviews: ReviewService::new(api),
        }
    }

    pub fn api(&self) -> &ApiClient {
        self.movies.api()
    }
}

/// Forms call the selected genre ids `genres`; the write endpoints expect
/// `genres_ids` and reserve `genres` for the expanded read shape.
pub(crate) fn with_genre_ids<F: Serialize>(form: &F) -> Result<Value, ApiError> {
    let mut body = serde_json::to_value(form).map_err(|e| ApiError::Encode(e.to_string()))?;
    if let Some(obj) = body.as_object_mut() {
        if let Some(genres) = obj.remove("genres") {
            obj.insert("genres_ids".to_string(), genres);
        }
    }
    Ok(body)
}
