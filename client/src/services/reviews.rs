use filmtracker_shared::{
    CreateRating, CreateReview, MediaRef, Paginated, Rating, Review, SetWatchStatus, UpdateReview,
    WatchState, WatchStatusRecord,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::query::Query;

/// Reviews, ratings and watch statuses: everything a user attaches to a
/// movie or series.
#[derive(Clone)]
pub struct ReviewService {
    api: ApiClient,
}

fn target_query(target: MediaRef) -> Query {
    Query::new().with(&target.kind().to_string(), target.id())
}

/// Of the records about one item, the one written by `me`; otherwise the
/// first. Records without an author count as anyone's.
fn pick_own<T>(
    records: Vec<T>,
    me: Option<Uuid>,
    author: impl Fn(&T) -> Option<Uuid>,
) -> Option<T> {
    let own = me.and_then(|me| records.iter().position(|r| author(r) == Some(me)));
    records.into_iter().nth(own.unwrap_or(0))
}

impl ReviewService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn me(&self) -> Option<Uuid> {
        self.api.session().current_user().map(|u| u.id)
    }

    // ── Reviews ──

    /// All reviews, or only those about `target`.
    pub async fn list(&self, target: Option<MediaRef>) -> Result<Paginated<Review>, ApiError> {
        let query = target.map(target_query).unwrap_or_default();
        self.api.get_page("/reviews/", &query).await
    }

    pub async fn create(&self, target: MediaRef, text: &str) -> Result<Review, ApiError> {
        let request = CreateReview {
            target,
            text: text.to_string(),
        };
        self.api.post("/reviews/", &request).await
    }

    pub async fn update(&self, id: Uuid, text: &str) -> Result<Review, ApiError> {
        let request = UpdateReview {
            text: text.to_string(),
        };
        self.api.put(&format!("/reviews/{id}/"), &request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/reviews/{id}/")).await
    }

    // ── Ratings ──

    pub async fn create_rating(&self, target: MediaRef, rating: u8) -> Result<Rating, ApiError> {
        let request = CreateRating { target, rating };
        self.api.post("/ratings/", &request).await
    }

    /// The current user's rating of `target`; `None` when there is none.
    /// The backend keeps at most one per user and item. When the listing
    /// names authors, the signed-in user's entry wins over the first match.
    pub async fn user_rating(&self, target: MediaRef) -> Result<Option<Rating>, ApiError> {
        let page: Paginated<Rating> = self.api.get_page("/ratings/", &target_query(target)).await?;
        let matching = page
            .results
            .into_iter()
            .filter(|r| MediaRef::from_pair(r.movie, r.series) == Some(target))
            .collect();
        Ok(pick_own(matching, self.me(), |r: &Rating| r.user))
    }

    // ── Watch status ──

    pub async fn all_watch_statuses(&self) -> Result<Paginated<WatchStatusRecord>, ApiError> {
        self.api.get_page("/watch-status/", &Query::new()).await
    }

    pub async fn user_watch_status(
        &self,
        target: MediaRef,
    ) -> Result<Option<WatchStatusRecord>, ApiError> {
        let page: Paginated<WatchStatusRecord> = self
            .api
            .get_page("/watch-status/", &target_query(target))
            .await?;
        let matching = page
            .results
            .into_iter()
            .filter(|s| s.target() == Some(target))
            .collect();
        Ok(pick_own(matching, self.me(), |s: &WatchStatusRecord| s.user))
    }

    pub async fn set_watch_status(
        &self,
        target: MediaRef,
        status: WatchState,
    ) -> Result<WatchStatusRecord, ApiError> {
        let request = SetWatchStatus { target, status };
        self.api.post("/watch-status/", &request).await
    }

    pub async fn update_watch_status(
        &self,
        id: Uuid,
        target: MediaRef,
        status: WatchState,
    ) -> Result<WatchStatusRecord, ApiError> {
        let request = SetWatchStatus { target, status };
        self.api
            .put(&format!("/watch-status/{id}/"), &request)
            .await
    }
}
