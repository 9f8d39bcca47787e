//! Per-page orchestration.
//!
//! Each view-model owns a [`Store`](crate::store::Store) with everything
//! its page renders and exposes async operations that call services and
//! write the outcome back. They all share the same lifecycle:
//! `Idle -> Loading -> Ready | Errored`, re-entering `Loading` on every
//! refresh. Overlapping loads are neither coalesced nor cancelled; whichever
//! response lands last wins.

mod admin;
mod catalog;
mod detail;
mod home;
mod profile;
mod recommendations;
mod search;
mod watchlist;

pub use admin::{harvest_genres, AdminState, AdminViewModel};
pub use catalog::{CatalogState, CatalogViewModel, ContentType, Listing};
pub use detail::{DetailState, DetailViewModel};
pub use home::{HomeState, HomeViewModel};
pub use profile::{ProfileState, ProfileViewModel};
pub use recommendations::{PersonalizedTab, RecommendationsState, RecommendationsViewModel};
pub use search::{SearchScope, SearchState, SearchViewModel};
pub use watchlist::{bucket_watch_list, Shelf, WatchListState, WatchListViewModel};

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::{ApiError, ErrorKind, Ignored};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Errored(message) => Some(message),
            _ => None,
        }
    }
}

/// Failure of a user-initiated mutation, ready for a form to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub message: String,
    /// Per-input messages, keyed by field name.
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FormError {
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub(crate) fn from_api(err: &ApiError, fallback: &str) -> Self {
        let fields = match err.kind() {
            ErrorKind::Validation => err.field_errors(),
            _ => BTreeMap::new(),
        };
        Self {
            message: err.user_message(fallback),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|m| m.first())
            .map(String::as_str)
    }
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FormError {}

/// Runs a fetch whose failure must not fail the page. The error is logged
/// and reduced to [`Ignored`].
pub async fn best_effort<T>(
    label: &str,
    fetch: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, Ignored> {
    fetch.await.map_err(|err| {
        log::warn!("{label} unavailable: {err}");
        Ignored
    })
}

/// Page-level failure text, logged on the way.
pub(crate) fn page_error(label: &str, err: &ApiError, fallback: &str) -> LoadState {
    log::error!("{label}: {err}");
    match err.kind() {
        ErrorKind::Network => LoadState::Errored(fallback.to_string()),
        _ => LoadState::Errored(err.user_message(fallback)),
    }
}

/// Mutation failure for a form, logged on the way.
pub(crate) fn form_error(label: &str, err: &ApiError, fallback: &str) -> FormError {
    log::error!("{label}: {err}");
    FormError::from_api(err, fallback)
}
