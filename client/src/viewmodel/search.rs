use std::rc::Rc;

use filmtracker_shared::MediaItem;

use super::best_effort;
use crate::debounce::Debouncer;
use crate::services::Services;
use crate::store::Store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    All,
    Movies,
    Series,
}

impl SearchScope {
    fn movies(self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Movies)
    }

    fn series(self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Series)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Raw input, as typed.
    pub query: String,
    pub scope: SearchScope,
    pub results: Vec<MediaItem>,
    /// Whether the results dropdown is showing.
    pub open: bool,
    pub searching: bool,
}

/// Header search box. Keystrokes are debounced; only the text left after
/// a quiet period reaches the backend.
#[derive(Clone)]
pub struct SearchViewModel {
    services: Services,
    debouncer: Rc<Debouncer>,
    state: Store<SearchState>,
}

impl SearchViewModel {
    pub fn new(services: Services) -> Self {
        let api = services.api();
        let debouncer = Debouncer::new(api.timer(), api.config().search_debounce());
        Self {
            services,
            debouncer: Rc::new(debouncer),
            state: Store::new(SearchState::default()),
        }
    }

    pub fn state(&self) -> &Store<SearchState> {
        &self.state
    }

    /// Records a keystroke. Resolves once this input has either been
    /// searched for or superseded by a newer one.
    pub async fn input(&self, text: &str) {
        self.state.update(|s| s.query = text.to_string());

        let query = text.trim();
        if query.is_empty() {
            self.debouncer.cancel();
            self.state.update(|s| {
                s.results.clear();
                s.open = false;
                s.searching = false;
            });
            return;
        }

        if let Some(query) = self.debouncer.settle(query.to_string()).await {
            self.run(&query).await;
        }
    }

    /// Changing scope re-runs the current query straight away.
    pub async fn set_scope(&self, scope: SearchScope) {
        let query = self.state.update_with(|s| {
            s.scope = scope;
            s.query.trim().to_string()
        });
        if !query.is_empty() {
            self.debouncer.cancel();
            self.run(&query).await;
        }
    }

    pub fn clear(&self) {
        self.debouncer.cancel();
        self.state.update(|s| {
            s.query.clear();
            s.results.clear();
            s.open = false;
            s.searching = false;
        });
    }

    pub fn close(&self) {
        self.state.update(|s| s.open = false);
    }

    /// Picking a result resets the box and hands back where to go.
    pub fn select(&self, item: &MediaItem) -> String {
        self.clear();
        crate::display::detail_path(item.media_ref())
    }

    async fn run(&self, query: &str) {
        let scope = self.state.update_with(|s| {
            s.searching = true;
            s.scope
        });

        let movies = async {
            if scope.movies() {
                best_effort("movie search", self.services.movies.search(query))
                    .await
                    .map(|p| p.results)
                    .unwrap_or_default()
            } else {
                Vec::new()
            }
        };
        let series = async {
            if scope.series() {
                best_effort("series search", self.services.series.search(query))
                    .await
                    .map(|p| p.results)
                    .unwrap_or_default()
            } else {
                Vec::new()
            }
        };
        let (movies, series) = futures::join!(movies, series);

        let results: Vec<MediaItem> = movies
            .into_iter()
            .map(MediaItem::from)
            .chain(series.into_iter().map(MediaItem::from))
            .collect();
        self.state.update(|s| {
            s.results = results;
            s.open = true;
            s.searching = false;
        });
    }
}
