use filmtracker_shared::{Genre, MediaItem};

use super::{best_effort, page_error, LoadState};
use crate::filters::{CatalogFilters, Pagination};
use crate::services::Services;
use crate::store::Store;

const LOAD_FAILED: &str = "Could not load the catalog. Try refreshing the page.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContentType {
    #[default]
    Movies,
    Series,
}

/// One content type's results and the filters that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub items: Vec<MediaItem>,
    pub filters: CatalogFilters,
    pub pagination: Pagination,
}

impl Listing {
    fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            filters: CatalogFilters::default(),
            pagination: Pagination::first(page_size),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    pub content: ContentType,
    pub movies: Listing,
    pub series: Listing,
    pub genres: Vec<Genre>,
    pub load: LoadState,
}

impl CatalogState {
    pub fn active(&self) -> &Listing {
        self.listing(self.content)
    }

    pub fn listing(&self, content: ContentType) -> &Listing {
        match content {
            ContentType::Movies => &self.movies,
            ContentType::Series => &self.series,
        }
    }

    fn listing_mut(&mut self, content: ContentType) -> &mut Listing {
        match content {
            ContentType::Movies => &mut self.movies,
            ContentType::Series => &mut self.series,
        }
    }
}

/// Browsable, filterable catalog of movies and series.
#[derive(Clone)]
pub struct CatalogViewModel {
    services: Services,
    state: Store<CatalogState>,
}

impl CatalogViewModel {
    pub fn new(services: Services) -> Self {
        let page_size = services.api().config().default_page_size;
        let state = Store::new(CatalogState {
            content: ContentType::Movies,
            movies: Listing::new(page_size),
            series: Listing::new(page_size),
            genres: Vec::new(),
            load: LoadState::Idle,
        });
        Self { services, state }
    }

    pub fn state(&self) -> &Store<CatalogState> {
        &self.state
    }

    /// Reloads the current page of the active content type.
    pub async fn load(&self) {
        let (content, page) = self
            .state
            .with(|s| (s.content, s.active().pagination.page));
        self.load_page(content, page).await;
    }

    /// Switching resets the target type's filters and starts from page 1.
    pub async fn switch_content(&self, content: ContentType) {
        self.state.update(|s| {
            s.content = content;
            s.listing_mut(content).filters = CatalogFilters::default();
        });
        self.load_page(content, 1).await;
    }

    pub async fn change_filters(&self, filters: CatalogFilters) {
        let content = self.state.with(|s| s.content);
        self.state
            .update(|s| s.listing_mut(content).filters = filters);
        self.load_page(content, 1).await;
    }

    pub async fn change_page(&self, page: u32) {
        let content = self.state.with(|s| s.content);
        self.load_page(content, page.max(1)).await;
    }

    pub async fn search(&self, query: &str) {
        let mut filters = self.state.with(|s| s.active().filters.clone());
        filters.search = query.to_string();
        self.change_filters(filters).await;
    }

    /// Back to newest-first with every other filter empty.
    pub async fn clear_filters(&self) {
        self.change_filters(CatalogFilters::default()).await;
    }

    /// Genre names for the filter panel. Failure leaves the list empty.
    pub async fn load_genres(&self) {
        if let Ok(genres) = best_effort("genres", self.services.genres.list()).await {
            self.state.update(|s| s.genres = genres);
        }
    }

    async fn load_page(&self, content: ContentType, page: u32) {
        let filters = self.state.update_with(|s| {
            s.load = LoadState::Loading;
            s.listing(content).filters.clone()
        });
        let query = filters.to_query(page);
        let page_size = filters
            .page_size
            .filter(|n| *n > 0)
            .unwrap_or(self.services.api().config().default_page_size);

        let result = match content {
            ContentType::Movies => self.services.movies.list(&query).await.map(|p| {
                let items: Vec<MediaItem> = p.results.into_iter().map(MediaItem::from).collect();
                (p.count, p.next, p.previous, items)
            }),
            ContentType::Series => self.services.series.list(&query).await.map(|p| {
                let items: Vec<MediaItem> = p.results.into_iter().map(MediaItem::from).collect();
                (p.count, p.next, p.previous, items)
            }),
        };

        self.state.update(|s| match result {
            Ok((count, next, previous, items)) => {
                let listing = s.listing_mut(content);
                listing.items = items;
                listing.pagination = Pagination {
                    count,
                    next,
                    previous,
                    page,
                    page_size,
                };
                s.load = LoadState::Ready;
            }
            Err(err) => {
                s.listing_mut(content).items.clear();
                s.load = page_error("catalog", &err, LOAD_FAILED);
            }
        });
    }
}
