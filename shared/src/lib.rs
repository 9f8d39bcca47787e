use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ── Auth ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl User {
    /// Staff and superusers both get the admin panel.
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password2: String,
}

/// Body returned by both login and register. Every field is optional on the
/// wire so a malformed success response can be told apart from a transport
/// failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusDistribution {
    #[serde(default)]
    pub planned: u32,
    #[serde(default)]
    pub watching: u32,
    #[serde(default)]
    pub watched: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_watched: u32,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub reviews_written: u32,
    #[serde(default)]
    pub movies_watched: u32,
    #[serde(default)]
    pub series_watched: u32,
    #[serde(default)]
    pub watch_status_distribution: StatusDistribution,
}

// ── Catalog ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGenre {
    pub name: String,
}

/// Director or cast member attached to a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_year: i32,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster: Option<String>,
    /// Minutes.
    pub duration: u32,
    #[serde(default)]
    pub directors: Vec<Person>,
    #[serde(default)]
    pub actors: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_year: i32,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster: Option<String>,
    pub seasons: u32,
    #[serde(default)]
    pub is_ongoing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Collection segment used by the REST routes.
    pub fn collection(self) -> &'static str {
        match self {
            MediaKind::Movie => "movies",
            MediaKind::Series => "series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => f.write_str("movie"),
            MediaKind::Series => f.write_str("series"),
        }
    }
}

/// A movie or a series. Movies carry `duration`, series carry `seasons`;
/// that is the only thing telling them apart on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaItem {
    Movie(Movie),
    Series(Series),
}

impl MediaItem {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaItem::Movie(_) => MediaKind::Movie,
            MediaItem::Series(_) => MediaKind::Series,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            MediaItem::Movie(m) => m.id,
            MediaItem::Series(s) => s.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            MediaItem::Movie(m) => &m.title,
            MediaItem::Series(s) => &s.title,
        }
    }

    pub fn release_year(&self) -> i32 {
        match self {
            MediaItem::Movie(m) => m.release_year,
            MediaItem::Series(s) => s.release_year,
        }
    }

    pub fn genres(&self) -> &[Genre] {
        match self {
            MediaItem::Movie(m) => &m.genres,
            MediaItem::Series(s) => &s.genres,
        }
    }

    pub fn poster(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.poster.as_deref(),
            MediaItem::Series(s) => s.poster.as_deref(),
        }
    }

    pub fn media_ref(&self) -> MediaRef {
        match self {
            MediaItem::Movie(m) => MediaRef::Movie(m.id),
            MediaItem::Series(s) => MediaRef::Series(s.id),
        }
    }
}

impl From<Movie> for MediaItem {
    fn from(movie: Movie) -> Self {
        MediaItem::Movie(movie)
    }
}

impl From<Series> for MediaItem {
    fn from(series: Series) -> Self {
        MediaItem::Series(series)
    }
}

/// Reference to exactly one movie or series. Serializes as `{"movie": id}`
/// or `{"series": id}`, which is how reviews, ratings and watch statuses
/// point at their subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaRef {
    Movie(Uuid),
    Series(Uuid),
}

impl MediaRef {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaRef::Movie(_) => MediaKind::Movie,
            MediaRef::Series(_) => MediaKind::Series,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            MediaRef::Movie(id) | MediaRef::Series(id) => *id,
        }
    }

    /// Builds a reference from the nullable `movie`/`series` pair the
    /// backend returns. Movie wins when both are set.
    pub fn from_pair(movie: Option<Uuid>, series: Option<Uuid>) -> Option<Self> {
        movie
            .map(MediaRef::Movie)
            .or_else(|| series.map(MediaRef::Series))
    }
}

/// Admin form payload for a movie, in the UI's naming (`genres` = ids).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieForm {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub duration: u32,
    pub genres: Vec<Uuid>,
}

/// Admin form payload for a series, in the UI's naming (`genres` = ids).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesForm {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub seasons: u32,
    pub is_ongoing: bool,
    pub genres: Vec<Uuid>,
}

// ── Reviews, ratings, watch status ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    #[serde(default)]
    pub user: Option<Uuid>,
    #[serde(default)]
    pub user_username: String,
    #[serde(default)]
    pub movie: Option<Uuid>,
    #[serde(default)]
    pub series: Option<Uuid>,
    pub text: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Review {
    pub fn target(&self) -> Option<MediaRef> {
        MediaRef::from_pair(self.movie, self.series)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    #[serde(flatten)]
    pub target: MediaRef,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReview {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Author. The list endpoint may return other users' ratings.
    #[serde(default)]
    pub user: Option<Uuid>,
    #[serde(default)]
    pub movie: Option<Uuid>,
    #[serde(default)]
    pub series: Option<Uuid>,
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRating {
    #[serde(flatten)]
    pub target: MediaRef,
    pub rating: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchState {
    Planned,
    Watching,
    Watched,
}

impl WatchState {
    pub const ALL: [WatchState; 3] = [WatchState::Planned, WatchState::Watching, WatchState::Watched];

    pub fn as_str(self) -> &'static str {
        match self {
            WatchState::Planned => "planned",
            WatchState::Watching => "watching",
            WatchState::Watched => "watched",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WatchState::Planned => "Planned",
            WatchState::Watching => "Watching",
            WatchState::Watched => "Watched",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchStatusRecord {
    pub id: Uuid,
    #[serde(default)]
    pub user: Option<Uuid>,
    #[serde(default)]
    pub movie: Option<Uuid>,
    #[serde(default)]
    pub series: Option<Uuid>,
    pub status: WatchState,
}

impl WatchStatusRecord {
    pub fn target(&self) -> Option<MediaRef> {
        MediaRef::from_pair(self.movie, self.series)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetWatchStatus {
    #[serde(flatten)]
    pub target: MediaRef,
    pub status: WatchState,
}

// ── Lists ──

/// Page envelope used by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for Paginated<T> {
    fn from(results: Vec<T>) -> Self {
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_item_tells_movies_and_series_apart() {
        let movie: MediaItem = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "title": "Heat",
            "release_year": 1995,
            "duration": 170,
        }))
        .unwrap();
        assert_eq!(movie.kind(), MediaKind::Movie);

        let series: MediaItem = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000002",
            "title": "The Wire",
            "release_year": 2002,
            "seasons": 5,
            "is_ongoing": false,
            "genres": [{"id": "00000000-0000-0000-0000-000000000009", "name": "Drama"}],
        }))
        .unwrap();
        assert_eq!(series.kind(), MediaKind::Series);
        assert_eq!(series.genres()[0].name, "Drama");
    }

    #[test]
    fn movie_carries_credits() {
        let movie: Movie = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "title": "Heat",
            "release_year": 1995,
            "duration": 170,
            "directors": [{
                "id": "00000000-0000-0000-0000-000000000011",
                "first_name": "Michael",
                "last_name": "Mann",
                "photo": null,
                "bio": ""
            }],
            "actors": [
                {"id": "00000000-0000-0000-0000-000000000012", "first_name": "Al", "last_name": "Pacino"},
                {"id": "00000000-0000-0000-0000-000000000013", "first_name": "Robert", "last_name": "De Niro"}
            ],
        }))
        .unwrap();
        assert_eq!(movie.directors[0].full_name(), "Michael Mann");
        assert_eq!(movie.actors.len(), 2);
        assert_eq!(movie.actors[1].last_name, "De Niro");
    }

    #[test]
    fn media_ref_points_at_one_subject() {
        let id = Uuid::from_u128(7);
        let body = serde_json::to_value(CreateRating {
            target: MediaRef::Series(id),
            rating: 8,
        })
        .unwrap();
        assert_eq!(body, json!({ "series": id, "rating": 8 }));
    }

    #[test]
    fn watch_status_record_reads_nullable_pair() {
        let record: WatchStatusRecord = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000003",
            "movie": null,
            "series": "00000000-0000-0000-0000-000000000004",
            "status": "watching",
        }))
        .unwrap();
        assert_eq!(record.target(), Some(MediaRef::Series(Uuid::from_u128(4))));
        assert_eq!(record.status, WatchState::Watching);
    }

    #[test]
    fn auth_response_tolerates_missing_fields() {
        let resp: AuthResponse = serde_json::from_value(json!({ "access": "a" })).unwrap();
        assert_eq!(resp.access.as_deref(), Some("a"));
        assert!(resp.user.is_none());
    }

    #[test]
    fn page_envelope_defaults() {
        let page: Paginated<Genre> = serde_json::from_value(json!({ "count": 3 })).unwrap();
        assert_eq!(page.count, 3);
        assert!(page.results.is_empty());
    }
}
