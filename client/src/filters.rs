use serde::{Deserialize, Serialize};

use crate::query::Query;

/// Default catalog ordering: newest first.
pub const NEWEST_FIRST: &str = "-created_at";

/// Catalog filter bag. Lives only in memory; reset whenever the content
/// type changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilters {
    pub search: String,
    /// Genre name fragment, matched case-insensitively by the backend.
    pub genres: String,
    pub release_year_min: Option<i32>,
    pub release_year_max: Option<i32>,
    pub ordering: String,
    pub page_size: Option<u32>,
}

impl Default for CatalogFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            genres: String::new(),
            release_year_min: None,
            release_year_max: None,
            ordering: NEWEST_FIRST.to_string(),
            page_size: None,
        }
    }
}

impl CatalogFilters {
    /// List parameters for `page`. Empty strings, missing values and zeros
    /// are left out entirely.
    pub fn to_query(&self, page: u32) -> Query {
        Query::new()
            .with_opt("page", nonzero(page))
            .with("search", &self.search)
            .with("genres", &self.genres)
            .with_opt("release_year_min", self.release_year_min.filter(|y| *y != 0))
            .with_opt("release_year_max", self.release_year_max.filter(|y| *y != 0))
            .with("ordering", &self.ordering)
            .with_opt("page_size", self.page_size.and_then(nonzero))
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn nonzero(n: u32) -> Option<u32> {
    (n != 0).then_some(n)
}

/// Page bookkeeping for a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Pagination {
    pub fn first(page_size: u32) -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            page: 1,
            page_size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.count.div_ceil(u64::from(self.page_size))
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_send_only_page_and_ordering() {
        let q = CatalogFilters::default().to_query(1);
        assert_eq!(q.to_query_string(), "page=1&ordering=-created_at");
    }

    #[test]
    fn falsy_values_never_reach_the_wire() {
        let searches = ["", "dune"];
        let years = [None, Some(0), Some(1999)];
        let sizes = [None, Some(0), Some(50)];
        for search in searches {
            for year in years {
                for size in sizes {
                    let filters = CatalogFilters {
                        search: search.to_string(),
                        genres: String::new(),
                        release_year_min: year,
                        release_year_max: year,
                        ordering: String::new(),
                        page_size: size,
                    };
                    let q = filters.to_query(0);
                    for key in q.keys() {
                        let value = q.get(key).unwrap();
                        assert!(!value.is_empty(), "{key} sent empty");
                        assert_ne!(value, "0", "{key} sent zero");
                    }
                    assert_eq!(q.get("search").is_some(), !search.is_empty());
                    assert!(q.get("genres").is_none());
                    assert!(q.get("ordering").is_none());
                }
            }
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination {
            count: 45,
            page_size: 20,
            ..Pagination::first(20)
        };
        assert_eq!(p.total_pages(), 3);
        assert_eq!(Pagination::first(20).total_pages(), 0);
        assert_eq!(Pagination { count: 40, ..Pagination::first(20) }.total_pages(), 2);
    }
}
