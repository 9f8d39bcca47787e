mod admin;
mod catalog;
mod detail;
mod home;
mod profile;
mod recommendations;
mod watchlist;

pub use admin::AdminPage;
pub use catalog::CatalogPage;
pub use detail::DetailPage;
pub use home::HomePage;
pub use profile::ProfilePage;
pub use recommendations::RecommendationsPage;
pub use watchlist::WatchListPage;

use filmtracker_shared::MediaItem;

fn as_items<T: Clone + Into<MediaItem>>(list: &[T]) -> Vec<MediaItem> {
    list.iter().cloned().map(Into::into).collect()
}
