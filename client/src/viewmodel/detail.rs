use filmtracker_shared::{MediaItem, MediaRef, Review, WatchState, WatchStatusRecord};
use uuid::Uuid;

use super::{best_effort, form_error, page_error, FormError, LoadState};
use crate::error::ApiError;
use crate::services::Services;
use crate::store::Store;

const LOAD_FAILED: &str = "Could not load this title.";
const RATING_FAILED: &str = "Could not save your rating.";
const STATUS_FAILED: &str = "Could not update the watch status.";
const REVIEW_FAILED: &str = "Could not save your review.";
const DELETE_FAILED: &str = "Could not delete the review.";
const SIGN_IN_REQUIRED: &str = "Sign in first.";
const EMPTY_REVIEW: &str = "Review text cannot be empty.";
const RATING_RANGE: &str = "Rating must be between 1 and 10.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub item: Option<MediaItem>,
    pub reviews: Vec<Review>,
    pub user_rating: Option<u8>,
    pub watch_status: Option<WatchStatusRecord>,
    pub load: LoadState,
}

impl DetailState {
    pub fn status(&self) -> Option<WatchState> {
        self.watch_status.as_ref().map(|r| r.status)
    }
}

/// One movie or series with its reviews and the signed-in user's rating
/// and watch status.
#[derive(Clone)]
pub struct DetailViewModel {
    services: Services,
    target: MediaRef,
    state: Store<DetailState>,
}

impl DetailViewModel {
    pub fn new(services: Services, target: MediaRef) -> Self {
        Self {
            services,
            target,
            state: Store::new(DetailState::default()),
        }
    }

    pub fn target(&self) -> MediaRef {
        self.target
    }

    pub fn state(&self) -> &Store<DetailState> {
        &self.state
    }

    /// The item and its reviews are required. The user's rating and watch
    /// status are fetched only with a token and never fail the page.
    pub async fn load(&self) {
        self.state.update(|s| s.load = LoadState::Loading);

        let item = match self.fetch_item().await {
            Ok(item) => item,
            Err(err) => {
                self.state
                    .update(|s| s.load = page_error("detail", &err, LOAD_FAILED));
                return;
            }
        };
        self.state.update(|s| s.item = Some(item));

        match self.services.reviews.list(Some(self.target)).await {
            Ok(page) => self.state.update(|s| s.reviews = page.results),
            Err(err) => {
                self.state
                    .update(|s| s.load = page_error("detail reviews", &err, LOAD_FAILED));
                return;
            }
        }

        if self.services.api().session().access_token().is_some() {
            let reviews = &self.services.reviews;
            let (rating, status) = futures::join!(
                best_effort("user rating", reviews.user_rating(self.target)),
                best_effort("watch status", reviews.user_watch_status(self.target)),
            );
            self.state.update(|s| {
                if let Ok(rating) = rating {
                    s.user_rating = rating.map(|r| r.rating);
                }
                if let Ok(status) = status {
                    s.watch_status = status;
                }
            });
        }

        self.state.update(|s| s.load = LoadState::Ready);
    }

    /// Saves a 1..=10 rating. The local value changes only once the
    /// backend accepts it.
    pub async fn rate(&self, rating: u8) -> Result<(), FormError> {
        if !(1..=10).contains(&rating) {
            return Err(FormError::local(RATING_RANGE));
        }
        self.require_session()?;
        let saved = self
            .services
            .reviews
            .create_rating(self.target, rating)
            .await
            .map_err(|err| form_error("rating", &err, RATING_FAILED))?;
        self.state.update(|s| s.user_rating = Some(saved.rating));
        Ok(())
    }

    /// Updates the existing status record in place, or creates one.
    pub async fn change_watch_status(&self, status: WatchState) -> Result<(), FormError> {
        self.require_session()?;
        let existing = self.state.with(|s| s.watch_status.as_ref().map(|r| r.id));
        let reviews = &self.services.reviews;
        let result = match existing {
            Some(id) => reviews.update_watch_status(id, self.target, status).await,
            None => reviews.set_watch_status(self.target, status).await,
        };
        let record = result.map_err(|err| form_error("watch status", &err, STATUS_FAILED))?;
        self.state.update(|s| s.watch_status = Some(record));
        Ok(())
    }

    /// Posts a review and puts it at the top of the list.
    pub async fn submit_review(&self, text: &str) -> Result<Review, FormError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FormError::local(EMPTY_REVIEW));
        }
        self.require_session()?;
        let review = self
            .services
            .reviews
            .create(self.target, text)
            .await
            .map_err(|err| form_error("review", &err, REVIEW_FAILED))?;
        self.state.update(|s| s.reviews.insert(0, review.clone()));
        Ok(review)
    }

    pub async fn update_review(&self, id: Uuid, text: &str) -> Result<Review, FormError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FormError::local(EMPTY_REVIEW));
        }
        let review = self
            .services
            .reviews
            .update(id, text)
            .await
            .map_err(|err| form_error("review update", &err, REVIEW_FAILED))?;
        self.state.update(|s| {
            if let Some(slot) = s.reviews.iter_mut().find(|r| r.id == id) {
                *slot = review.clone();
            }
        });
        Ok(review)
    }

    /// Removes the review locally once the backend confirms.
    pub async fn delete_review(&self, id: Uuid) -> Result<(), FormError> {
        self.services
            .reviews
            .delete(id)
            .await
            .map_err(|err| form_error("review delete", &err, DELETE_FAILED))?;
        self.state.update(|s| s.reviews.retain(|r| r.id != id));
        Ok(())
    }

    async fn fetch_item(&self) -> Result<MediaItem, ApiError> {
        match self.target {
            MediaRef::Movie(id) => self.services.movies.get_by_id(id).await.map(MediaItem::from),
            MediaRef::Series(id) => self.services.series.get_by_id(id).await.map(MediaItem::from),
        }
    }

    fn require_session(&self) -> Result<(), FormError> {
        if self.services.api().session().is_authenticated() {
            Ok(())
        } else {
            Err(FormError::local(SIGN_IN_REQUIRED))
        }
    }
}
