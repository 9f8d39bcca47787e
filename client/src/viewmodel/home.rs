use filmtracker_shared::{Movie, UserStats};

use super::{best_effort, page_error, LoadState};
use crate::services::Services;
use crate::store::Store;

const LOAD_FAILED: &str = "Could not load the page. Try refreshing.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    pub popular: Vec<Movie>,
    pub recommendations: Vec<Movie>,
    pub stats: Option<UserStats>,
    pub load: LoadState,
}

/// Landing page: popular movies for everyone, plus recommendations and
/// stats for a signed-in user.
#[derive(Clone)]
pub struct HomeViewModel {
    services: Services,
    state: Store<HomeState>,
}

impl HomeViewModel {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: Store::new(HomeState::default()),
        }
    }

    pub fn state(&self) -> &Store<HomeState> {
        &self.state
    }

    /// Popular movies decide the page outcome. Recommendations and stats
    /// are only fetched when signed in, and their failure leaves the
    /// previous values in place. Signed out, both are cleared.
    pub async fn load(&self) {
        self.state.update(|s| s.load = LoadState::Loading);

        let popular = match self.services.movies.popular().await {
            Ok(page) => page.results,
            Err(err) => {
                self.state
                    .update(|s| s.load = page_error("home", &err, LOAD_FAILED));
                return;
            }
        };
        self.state.update(|s| s.popular = popular);

        if self.services.api().session().is_authenticated() {
            let (recommendations, stats) = futures::join!(
                best_effort("recommendations", self.services.movies.recommendations()),
                best_effort("user stats", self.services.auth.user_stats()),
            );
            self.state.update(|s| {
                if let Ok(page) = recommendations {
                    s.recommendations = page.results;
                }
                if let Ok(stats) = stats {
                    s.stats = Some(stats);
                }
            });
        } else {
            self.state.update(|s| {
                s.recommendations.clear();
                s.stats = None;
            });
        }

        self.state.update(|s| s.load = LoadState::Ready);
    }
}
