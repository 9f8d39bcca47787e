use filmtracker_shared::{Movie, MovieForm, Paginated};
use uuid::Uuid;

use super::with_genre_ids;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::query::Query;

#[derive(Clone)]
pub struct MovieService {
    api: ApiClient,
}

impl MovieService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list(&self, params: &Query) -> Result<Paginated<Movie>, ApiError> {
        self.api.get_page("/movies/", params).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Movie, ApiError> {
        self.api.get(&format!("/movies/{id}/"), &Query::new()).await
    }

    pub async fn popular(&self) -> Result<Paginated<Movie>, ApiError> {
        self.api.get_page("/movies/popular/", &Query::new()).await
    }

    pub async fn recommendations(&self) -> Result<Paginated<Movie>, ApiError> {
        self.api.get_page("/recommendations/", &Query::new()).await
    }

    pub async fn search(&self, text: &str) -> Result<Paginated<Movie>, ApiError> {
        self.list(&Query::new().with("search", text)).await
    }

    pub async fn create(&self, form: &MovieForm) -> Result<Movie, ApiError> {
        self.api.post("/movies/", &with_genre_ids(form)?).await
    }

    pub async fn update(&self, id: Uuid, form: &MovieForm) -> Result<Movie, ApiError> {
        self.api
            .put(&format!("/movies/{id}/"), &with_genre_ids(form)?)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/movies/{id}/")).await
    }
}
