use filmtracker_shared::{Paginated, Series, SeriesForm};
use uuid::Uuid;

use super::with_genre_ids;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::query::Query;

/// Series endpoints. `list` and `get_by_id` are deliberately separate
/// operations; there is no overloaded fetch.
#[derive(Clone)]
pub struct SeriesService {
    api: ApiClient,
}

impl SeriesService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, params: &Query) -> Result<Paginated<Series>, ApiError> {
        self.api.get_page("/series/", params).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Series, ApiError> {
        self.api.get(&format!("/series/{id}/"), &Query::new()).await
    }

    pub async fn search(&self, text: &str) -> Result<Paginated<Series>, ApiError> {
        self.list(&Query::new().with("search", text)).await
    }

    pub async fn create(&self, form: &SeriesForm) -> Result<Series, ApiError> {
        self.api.post("/series/", &with_genre_ids(form)?).await
    }

    pub async fn update(&self, id: Uuid, form: &SeriesForm) -> Result<Series, ApiError> {
        self.api
            .put(&format!("/series/{id}/"), &with_genre_ids(form)?)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/series/{id}/")).await
    }
}
