use filmtracker_shared::{CreateGenre, Genre};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::query::Query;

#[derive(Clone)]
pub struct GenreService {
    api: ApiClient,
}

impl GenreService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Genre>, ApiError> {
        let page = self.api.get_page("/genres/", &Query::new()).await?;
        Ok(page.results)
    }

    pub async fn create(&self, name: &str) -> Result<Genre, ApiError> {
        let request = CreateGenre {
            name: name.trim().to_string(),
        };
        self.api.post("/genres/", &request).await
    }
}
