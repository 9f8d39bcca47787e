use std::collections::HashSet;

use filmtracker_shared::{MediaItem, MediaKind, MediaRef, Movie, Series, WatchState, WatchStatusRecord};
use futures::future::join_all;
use uuid::Uuid;

use super::{best_effort, page_error, LoadState};
use crate::services::Services;
use crate::store::Store;

const LOAD_FAILED: &str = "Could not load your lists. Try refreshing the page.";

/// Items split by watch state.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelf<T> {
    pub planned: Vec<T>,
    pub watching: Vec<T>,
    pub watched: Vec<T>,
}

impl<T> Default for Shelf<T> {
    fn default() -> Self {
        Self {
            planned: Vec::new(),
            watching: Vec::new(),
            watched: Vec::new(),
        }
    }
}

impl<T> Shelf<T> {
    pub fn get(&self, state: WatchState) -> &[T] {
        match state {
            WatchState::Planned => &self.planned,
            WatchState::Watching => &self.watching,
            WatchState::Watched => &self.watched,
        }
    }

    pub fn len(&self) -> usize {
        self.planned.len() + self.watching.len() + self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, state: WatchState, item: T) {
        match state {
            WatchState::Planned => self.planned.push(item),
            WatchState::Watching => self.watching.push(item),
            WatchState::Watched => self.watched.push(item),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchListState {
    pub movies: Shelf<Movie>,
    pub series: Shelf<Series>,
    pub load: LoadState,
}

/// Sorts resolved items into the six lists. An item already seen under
/// the same kind and id is dropped, so the first record wins.
pub fn bucket_watch_list(
    entries: impl IntoIterator<Item = (WatchState, MediaItem)>,
) -> (Shelf<Movie>, Shelf<Series>) {
    let mut seen: HashSet<(MediaKind, Uuid)> = HashSet::new();
    let mut movies = Shelf::default();
    let mut series = Shelf::default();
    for (state, item) in entries {
        if !seen.insert((item.kind(), item.id())) {
            continue;
        }
        match item {
            MediaItem::Movie(m) => movies.push(state, m),
            MediaItem::Series(s) => series.push(state, s),
        }
    }
    (movies, series)
}

/// The user's planned, watching and watched titles.
#[derive(Clone)]
pub struct WatchListViewModel {
    services: Services,
    state: Store<WatchListState>,
}

impl WatchListViewModel {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: Store::new(WatchListState::default()),
        }
    }

    pub fn state(&self) -> &Store<WatchListState> {
        &self.state
    }

    /// Fetches every status record, then each referenced title in
    /// parallel. Titles that fail to load are left out, and so are records
    /// another user wrote.
    pub async fn load(&self) {
        self.state.update(|s| s.load = LoadState::Loading);

        let records = match self.services.reviews.all_watch_statuses().await {
            Ok(page) => page.results,
            Err(err) => {
                self.state
                    .update(|s| s.load = page_error("watch list", &err, LOAD_FAILED));
                return;
            }
        };

        let me = self.services.api().session().current_user().map(|u| u.id);
        let records: Vec<WatchStatusRecord> = records
            .into_iter()
            .filter(|r| r.user.is_none() || r.user == me)
            .collect();

        let resolved = join_all(records.iter().map(|record| self.resolve(record))).await;
        let (movies, series) = bucket_watch_list(resolved.into_iter().flatten());

        self.state.update(|s| {
            s.movies = movies;
            s.series = series;
            s.load = LoadState::Ready;
        });
    }

    async fn resolve(&self, record: &WatchStatusRecord) -> Option<(WatchState, MediaItem)> {
        let item = match record.target()? {
            MediaRef::Movie(id) => best_effort("watch list movie", self.services.movies.get_by_id(id))
                .await
                .ok()
                .map(MediaItem::from),
            MediaRef::Series(id) => {
                best_effort("watch list series", self.services.series.get_by_id(id))
                    .await
                    .ok()
                    .map(MediaItem::from)
            }
        };
        item.map(|item| (record.status, item))
    }
}
