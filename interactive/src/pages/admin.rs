use filmtracker_client::display::format_duration;
use filmtracker_client::viewmodel::{AdminViewModel, FormError};
use filmtracker_shared::{Genre, MediaKind, Movie, MovieForm, Series, SeriesForm};
use leptos::prelude::*;
use uuid::Uuid;

use crate::components::LoadBanner;
use crate::state::{bridge, run, use_ctx, Local};

/// Editable copy of a movie or series. Numbers stay as typed until saved.
#[derive(Debug, Clone, PartialEq)]
struct Draft {
    kind: MediaKind,
    existing: Option<Uuid>,
    title: String,
    description: String,
    release_year: String,
    length: String,
    is_ongoing: bool,
    genres: Vec<Uuid>,
}

impl Draft {
    fn blank(kind: MediaKind) -> Self {
        Self {
            kind,
            existing: None,
            title: String::new(),
            description: String::new(),
            release_year: String::new(),
            length: String::new(),
            is_ongoing: false,
            genres: Vec::new(),
        }
    }

    fn of_movie(m: &Movie) -> Self {
        Self {
            existing: Some(m.id),
            title: m.title.clone(),
            description: m.description.clone(),
            release_year: m.release_year.to_string(),
            length: m.duration.to_string(),
            genres: m.genres.iter().map(|g| g.id).collect(),
            ..Self::blank(MediaKind::Movie)
        }
    }

    fn of_series(s: &Series) -> Self {
        Self {
            existing: Some(s.id),
            title: s.title.clone(),
            description: s.description.clone(),
            release_year: s.release_year.to_string(),
            length: s.seasons.to_string(),
            is_ongoing: s.is_ongoing,
            genres: s.genres.iter().map(|g| g.id).collect(),
            ..Self::blank(MediaKind::Series)
        }
    }

    fn movie_form(&self) -> MovieForm {
        MovieForm {
            title: self.title.clone(),
            description: self.description.clone(),
            release_year: self.release_year.trim().parse().unwrap_or_default(),
            duration: self.length.trim().parse().unwrap_or_default(),
            genres: self.genres.clone(),
        }
    }

    fn series_form(&self) -> SeriesForm {
        SeriesForm {
            title: self.title.clone(),
            description: self.description.clone(),
            release_year: self.release_year.trim().parse().unwrap_or_default(),
            seasons: self.length.trim().parse().unwrap_or_default(),
            is_ongoing: self.is_ongoing,
            genres: self.genres.clone(),
        }
    }
}

fn confirmed(question: &str) -> bool {
    window().confirm_with_message(question).unwrap_or(false)
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let vm = AdminViewModel::new(use_ctx().app().services);
    let state = bridge(vm.state());
    let vm: Local<AdminViewModel> = StoredValue::new_local(vm);
    run(vm, |vm| async move {
        vm.load().await;
        vm.load_genres().await;
    });

    let draft: RwSignal<Option<Draft>> = RwSignal::new(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let delete_movie = move |id: Uuid, title: String| {
        if !confirmed(&format!("Delete \"{title}\"?")) {
            return;
        }
        run(vm, move |vm| async move {
            if let Err(err) = vm.delete_movie(id).await {
                error.set(Some(err.message));
            }
        });
    };
    let delete_series = move |id: Uuid, title: String| {
        if !confirmed(&format!("Delete \"{title}\"?")) {
            return;
        }
        run(vm, move |vm| async move {
            if let Err(err) = vm.delete_series(id).await {
                error.set(Some(err.message));
            }
        });
    };

    view! {
        <div class="ft-admin">
            <h2>"Catalog administration"</h2>
            <LoadBanner
                load=Signal::derive(move || state.get().load)
                on_retry=Callback::new(move |_| run(vm, |vm| async move { vm.load().await }))
            />
            <Show when=move || error.get().is_some()>
                <p class="ft-error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <div class="ft-toolbar">
                <button class="ft-btn" on:click=move |_| draft.set(Some(Draft::blank(MediaKind::Movie)))>
                    "Add movie"
                </button>
                <button class="ft-btn" on:click=move |_| draft.set(Some(Draft::blank(MediaKind::Series)))>
                    "Add series"
                </button>
            </div>

            {move || draft.get().map(|initial| view! {
                <Editor
                    vm=vm
                    initial=initial
                    draft=draft
                    genres=Signal::derive(move || state.with(|s| s.genres.clone()))
                />
            })}

            <GenreCreator vm=vm />

            <h3>{move || format!("Movies ({})", state.with(|s| s.movies.len()))}</h3>
            <table class="ft-table">
                <For each=move || state.get().movies key=|m| m.id let:movie>
                    <tr>
                        <td>{movie.title.clone()}</td>
                        <td>{movie.release_year}</td>
                        <td>{format_duration(movie.duration)}</td>
                        <td>
                            <button
                                class="ft-btn ft-btn-sm"
                                on:click={
                                    let movie = movie.clone();
                                    move |_| draft.set(Some(Draft::of_movie(&movie)))
                                }
                            >
                                "Edit"
                            </button>
                            <button
                                class="ft-btn ft-btn-sm ft-btn-danger"
                                on:click={
                                    let title = movie.title.clone();
                                    move |_| delete_movie(movie.id, title.clone())
                                }
                            >
                                "Delete"
                            </button>
                        </td>
                    </tr>
                </For>
            </table>

            <h3>{move || format!("Series ({})", state.with(|s| s.series.len()))}</h3>
            <table class="ft-table">
                <For each=move || state.get().series key=|s| s.id let:series>
                    <tr>
                        <td>{series.title.clone()}</td>
                        <td>{series.release_year}</td>
                        <td>{format!("{} seasons", series.seasons)}</td>
                        <td>
                            <button
                                class="ft-btn ft-btn-sm"
                                on:click={
                                    let series = series.clone();
                                    move |_| draft.set(Some(Draft::of_series(&series)))
                                }
                            >
                                "Edit"
                            </button>
                            <button
                                class="ft-btn ft-btn-sm ft-btn-danger"
                                on:click={
                                    let title = series.title.clone();
                                    move |_| delete_series(series.id, title.clone())
                                }
                            >
                                "Delete"
                            </button>
                        </td>
                    </tr>
                </For>
            </table>
        </div>
    }
}

/// Create or edit form. Closes by clearing `draft` after a successful save.
#[component]
fn Editor(
    vm: Local<AdminViewModel>,
    initial: Draft,
    draft: RwSignal<Option<Draft>>,
    #[prop(into)] genres: Signal<Vec<Genre>>,
) -> impl IntoView {
    let kind = initial.kind;
    let form = RwSignal::new(initial);
    let saving = RwSignal::new(false);
    let error: RwSignal<Option<FormError>> = RwSignal::new(None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        saving.set(true);
        run(vm, move |vm| async move {
            let saved = match current.kind {
                MediaKind::Movie => vm.save_movie(current.existing, &current.movie_form()).await.map(drop),
                MediaKind::Series => vm.save_series(current.existing, &current.series_form()).await.map(drop),
            };
            saving.set(false);
            match saved {
                Ok(()) => draft.set(None),
                Err(err) => error.set(Some(err)),
            }
        });
    };

    let field_error = move |name: &'static str| {
        move || error.with(|e| e.as_ref().and_then(|e| e.field(name)).map(str::to_string))
    };
    let text = move |get: fn(&Draft) -> &String, set: fn(&mut Draft, String)| {
        (
            move || form.with(|d| get(d).clone()),
            move |ev: leptos::ev::Event| form.update(|d| set(d, event_target_value(&ev))),
        )
    };
    let (title, on_title) = text(|d| &d.title, |d, v| d.title = v);
    let (description, on_description) = text(|d| &d.description, |d, v| d.description = v);
    let (year, on_year) = text(|d| &d.release_year, |d, v| d.release_year = v);
    let (length, on_length) = text(|d| &d.length, |d, v| d.length = v);

    let heading = match (kind, form.with_untracked(|d| d.existing.is_some())) {
        (MediaKind::Movie, false) => "New movie",
        (MediaKind::Movie, true) => "Edit movie",
        (MediaKind::Series, false) => "New series",
        (MediaKind::Series, true) => "Edit series",
    };

    view! {
        <form class="ft-form ft-panel" on:submit=on_submit>
            <h3>{heading}</h3>
            <Show when=move || error.get().is_some()>
                <p class="ft-error">{move || error.get().map(|e| e.message).unwrap_or_default()}</p>
            </Show>
            <label>
                "Title"
                <input class="ft-input" prop:value=title on:input=on_title />
                <span class="ft-field-error">{field_error("title")}</span>
            </label>
            <label>
                "Description"
                <textarea class="ft-textarea" prop:value=description on:input=on_description />
                <span class="ft-field-error">{field_error("description")}</span>
            </label>
            <label>
                "Release year"
                <input class="ft-input ft-input-sm" type="number" prop:value=year on:input=on_year />
                <span class="ft-field-error">{field_error("release_year")}</span>
            </label>
            <label>
                {if kind == MediaKind::Movie { "Duration (minutes)" } else { "Seasons" }}
                <input class="ft-input ft-input-sm" type="number" prop:value=length on:input=on_length />
            </label>
            {(kind == MediaKind::Series).then(|| view! {
                <label class="ft-check">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|d| d.is_ongoing)
                        on:change=move |ev| form.update(|d| d.is_ongoing = event_target_checked(&ev))
                    />
                    "Still running"
                </label>
            })}
            <fieldset class="ft-genres">
                <legend>"Genres"</legend>
                <For each=move || genres.get() key=|g| g.id let:genre>
                    <label class="ft-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|d| d.genres.contains(&genre.id))
                            on:change=move |ev| {
                                let on = event_target_checked(&ev);
                                form.update(|d| {
                                    d.genres.retain(|id| *id != genre.id);
                                    if on {
                                        d.genres.push(genre.id);
                                    }
                                });
                            }
                        />
                        {genre.name.clone()}
                    </label>
                </For>
            </fieldset>
            <button class="ft-btn" type="submit" disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Save" }}
            </button>
            <button class="ft-btn ft-btn-sm" type="button" on:click=move |_| draft.set(None)>"Cancel"</button>
        </form>
    }
}

#[component]
fn GenreCreator(vm: Local<AdminViewModel>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let entered = name.get_untracked();
        run(vm, move |vm| async move {
            match vm.create_genre(&entered).await {
                Ok(genre) => {
                    log::info!("created genre {}", genre.name);
                    name.set(String::new());
                    error.set(None);
                }
                Err(err) => {
                    let message = err.field("name").unwrap_or(&err.message).to_string();
                    error.set(Some(message));
                }
            }
        });
    };

    view! {
        <form class="ft-form ft-inline" on:submit=on_submit>
            <input
                class="ft-input"
                placeholder="New genre"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <button class="ft-btn ft-btn-sm" type="submit">"Add genre"</button>
            <span class="ft-field-error">{move || error.get().unwrap_or_default()}</span>
        </form>
    }
}
