use std::collections::HashSet;

use filmtracker_shared::{Genre, Movie, MovieForm, Series, SeriesForm};
use uuid::Uuid;

use super::{best_effort, form_error, page_error, FormError, LoadState};
use crate::query::Query;
use crate::services::Services;
use crate::store::Store;

const LOAD_FAILED: &str = "Could not load data.";
const MOVIE_DELETE_FAILED: &str = "Could not delete the movie.";
const SERIES_DELETE_FAILED: &str = "Could not delete the series.";
const SAVE_FAILED: &str = "Could not save. Check the form and try again.";
const GENRE_FAILED: &str = "Could not create the genre.";
const TITLE_REQUIRED: &str = "Title is required.";
const NAME_REQUIRED: &str = "Genre name is required.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub movies: Vec<Movie>,
    pub series: Vec<Series>,
    pub genres: Vec<Genre>,
    pub load: LoadState,
}

/// Catalog management for staff users.
#[derive(Clone)]
pub struct AdminViewModel {
    services: Services,
    state: Store<AdminState>,
}

impl AdminViewModel {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: Store::new(AdminState::default()),
        }
    }

    pub fn state(&self) -> &Store<AdminState> {
        &self.state
    }

    /// Movies and series are fetched together; the page is ready only when
    /// both arrive.
    pub async fn load(&self) {
        self.state.update(|s| s.load = LoadState::Loading);

        let query = self.list_query();
        let (movies, series) = futures::join!(
            self.services.movies.list(&query),
            self.services.series.list(&query),
        );

        self.state.update(|s| match (movies, series) {
            (Ok(movies), Ok(series)) => {
                s.movies = movies.results;
                s.series = series.results;
                s.load = LoadState::Ready;
            }
            (Err(err), _) | (_, Err(err)) => {
                s.load = page_error("admin", &err, LOAD_FAILED);
            }
        });
    }

    /// Genres for the edit forms. When the genre endpoint is unavailable the
    /// list is rebuilt from the genres attached to the loaded titles.
    pub async fn load_genres(&self) {
        let genres = match best_effort("genres", self.services.genres.list()).await {
            Ok(genres) => genres,
            Err(_) => self.state.with(|s| harvest_genres(&s.movies, &s.series)),
        };
        self.state.update(|s| s.genres = genres);
    }

    pub async fn delete_movie(&self, id: Uuid) -> Result<(), FormError> {
        self.services
            .movies
            .delete(id)
            .await
            .map_err(|err| form_error("movie delete", &err, MOVIE_DELETE_FAILED))?;
        self.state.update(|s| s.movies.retain(|m| m.id != id));
        Ok(())
    }

    pub async fn delete_series(&self, id: Uuid) -> Result<(), FormError> {
        self.services
            .series
            .delete(id)
            .await
            .map_err(|err| form_error("series delete", &err, SERIES_DELETE_FAILED))?;
        self.state.update(|s| s.series.retain(|m| m.id != id));
        Ok(())
    }

    /// Creates when `existing` is `None`, updates otherwise, then reloads
    /// both lists.
    pub async fn save_movie(&self, existing: Option<Uuid>, form: &MovieForm) -> Result<Movie, FormError> {
        require_title(&form.title)?;
        let movies = &self.services.movies;
        let result = match existing {
            Some(id) => movies.update(id, form).await,
            None => movies.create(form).await,
        };
        let movie = result.map_err(|err| form_error("movie save", &err, SAVE_FAILED))?;
        self.load().await;
        Ok(movie)
    }

    pub async fn save_series(&self, existing: Option<Uuid>, form: &SeriesForm) -> Result<Series, FormError> {
        require_title(&form.title)?;
        let series = &self.services.series;
        let result = match existing {
            Some(id) => series.update(id, form).await,
            None => series.create(form).await,
        };
        let saved = result.map_err(|err| form_error("series save", &err, SAVE_FAILED))?;
        self.load().await;
        Ok(saved)
    }

    pub async fn create_genre(&self, name: &str) -> Result<Genre, FormError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(field_error("name", NAME_REQUIRED));
        }
        let genre = self
            .services
            .genres
            .create(name)
            .await
            .map_err(|err| form_error("genre create", &err, GENRE_FAILED))?;
        self.state.update(|s| s.genres.push(genre.clone()));
        Ok(genre)
    }

    fn list_query(&self) -> Query {
        Query::new().with("page_size", self.services.api().config().admin_page_size)
    }
}

/// Distinct genres across the given titles, first occurrence by id.
pub fn harvest_genres(movies: &[Movie], series: &[Series]) -> Vec<Genre> {
    let mut seen = HashSet::new();
    movies
        .iter()
        .flat_map(|m| m.genres.iter())
        .chain(series.iter().flat_map(|s| s.genres.iter()))
        .filter(|g| seen.insert(g.id))
        .cloned()
        .collect()
}

fn require_title(title: &str) -> Result<(), FormError> {
    if title.trim().is_empty() {
        Err(field_error("title", TITLE_REQUIRED))
    } else {
        Ok(())
    }
}

fn field_error(field: &str, message: &str) -> FormError {
    let mut error = FormError::local(message);
    error
        .fields
        .insert(field.to_string(), vec![message.to_string()]);
    error
}
