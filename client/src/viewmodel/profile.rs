use filmtracker_shared::{Review, UserStats};

use super::{page_error, LoadState};
use crate::services::Services;
use crate::store::Store;

const LOAD_FAILED: &str = "Could not load your profile.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileState {
    pub stats: Option<UserStats>,
    pub reviews: Vec<Review>,
    pub load: LoadState,
}

#[derive(Clone)]
pub struct ProfileViewModel {
    services: Services,
    state: Store<ProfileState>,
}

impl ProfileViewModel {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: Store::new(ProfileState::default()),
        }
    }

    pub fn state(&self) -> &Store<ProfileState> {
        &self.state
    }

    /// Stats, then reviews. Either failing fails the page.
    pub async fn load(&self) {
        self.state.update(|s| s.load = LoadState::Loading);

        let stats = match self.services.auth.user_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                self.state
                    .update(|s| s.load = page_error("profile stats", &err, LOAD_FAILED));
                return;
            }
        };
        self.state.update(|s| s.stats = Some(stats));

        match self.services.reviews.list(None).await {
            Ok(page) => {
                let reviews = self.own(page.results);
                self.state.update(|s| {
                    s.reviews = reviews;
                    s.load = LoadState::Ready;
                });
            }
            Err(err) => self
                .state
                .update(|s| s.load = page_error("profile reviews", &err, LOAD_FAILED)),
        }
    }

    /// Keeps reviews written by the signed-in user. Reviews that carry no
    /// author id are kept as-is.
    fn own(&self, reviews: Vec<Review>) -> Vec<Review> {
        let Some(me) = self.services.api().session().current_user() else {
            return reviews;
        };
        reviews
            .into_iter()
            .filter(|r| r.user.map_or(true, |author| author == me.id))
            .collect()
    }
}
