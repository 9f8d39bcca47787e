use filmtracker_shared::Movie;

use super::{page_error, LoadState};
use crate::filters::NEWEST_FIRST;
use crate::query::Query;
use crate::services::Services;
use crate::store::Store;

const LOAD_FAILED: &str = "Could not load recommendations.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersonalizedTab {
    #[default]
    ForYou,
    Popular,
    New,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationsState {
    pub personalized: Vec<Movie>,
    pub popular: Vec<Movie>,
    pub new_releases: Vec<Movie>,
    pub tab: PersonalizedTab,
    pub load: LoadState,
}

impl RecommendationsState {
    /// What the "for you" tab renders: personalized picks, or popular
    /// movies when there are none yet.
    pub fn for_you(&self) -> &[Movie] {
        if self.personalized.is_empty() {
            &self.popular
        } else {
            &self.personalized
        }
    }

    /// `true` when [`for_you`](Self::for_you) is showing the popular list.
    pub fn is_fallback(&self) -> bool {
        self.personalized.is_empty() && !self.popular.is_empty()
    }

    pub fn visible(&self) -> &[Movie] {
        match self.tab {
            PersonalizedTab::ForYou => self.for_you(),
            PersonalizedTab::Popular => &self.popular,
            PersonalizedTab::New => &self.new_releases,
        }
    }
}

#[derive(Clone)]
pub struct RecommendationsViewModel {
    services: Services,
    state: Store<RecommendationsState>,
}

impl RecommendationsViewModel {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: Store::new(RecommendationsState::default()),
        }
    }

    pub fn state(&self) -> &Store<RecommendationsState> {
        &self.state
    }

    pub fn select_tab(&self, tab: PersonalizedTab) {
        self.state.update(|s| s.tab = tab);
    }

    /// The three lists are fetched independently. Whatever arrives is kept;
    /// the first failure becomes the page error.
    pub async fn load(&self) {
        self.state.update(|s| s.load = LoadState::Loading);

        let config = self.services.api().config();
        let newest = Query::new()
            .with("ordering", NEWEST_FIRST)
            .with("page_size", config.new_releases_limit);
        let movies = &self.services.movies;
        let (personalized, popular, new_releases) = futures::join!(
            movies.recommendations(),
            movies.popular(),
            movies.list(&newest),
        );

        self.state.update(|s| {
            let mut failure = None;
            match personalized {
                Ok(page) => s.personalized = page.results,
                Err(err) => failure = failure.or(Some(err)),
            }
            match popular {
                Ok(page) => s.popular = page.results,
                Err(err) => failure = failure.or(Some(err)),
            }
            match new_releases {
                Ok(page) => s.new_releases = page.results,
                Err(err) => failure = failure.or(Some(err)),
            }
            s.load = match failure {
                Some(err) => page_error("recommendations", &err, LOAD_FAILED),
                None => LoadState::Ready,
            };
        });
    }
}
