use filmtracker_client::display::{
    detail_path, format_count, format_duration, format_rating, truncate,
};
use filmtracker_client::viewmodel::{LoadState, SearchScope, SearchViewModel};
use filmtracker_client::Pagination;
use filmtracker_shared::{MediaItem, UserStats};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::{bridge, run, use_ctx, Local};

// ── Load state ──

/// Spinner while loading, dismissible banner with a retry on failure.
#[component]
pub fn LoadBanner(#[prop(into)] load: Signal<LoadState>, on_retry: Callback<()>) -> impl IntoView {
    let dismissed = RwSignal::new(false);

    move || match load.get() {
        LoadState::Loading => view! { <p class="ft-loading">"Loading..."</p> }.into_any(),
        LoadState::Errored(message) if !dismissed.get() => view! {
            <div class="ft-error" role="alert">
                <span>{message}</span>
                <button class="ft-btn ft-btn-sm" on:click=move |_| on_retry.run(())>"Retry"</button>
                <button class="ft-btn ft-btn-sm" on:click=move |_| dismissed.set(true)>"Dismiss"</button>
            </div>
        }
        .into_any(),
        _ => ().into_any(),
    }
}

// ── Media ──

#[component]
pub fn MediaCard(item: MediaItem) -> impl IntoView {
    let href = detail_path(item.media_ref());
    let meta = match &item {
        MediaItem::Movie(m) => format!("{} · {}", m.release_year, format_duration(m.duration)),
        MediaItem::Series(s) => {
            let seasons = if s.seasons == 1 { "season" } else { "seasons" };
            format!("{} · {} {seasons}", s.release_year, s.seasons)
        }
    };
    let genres = item
        .genres()
        .iter()
        .map(|g| g.name.clone())
        .collect::<Vec<_>>()
        .join(", ");
    let poster = item.poster().map(str::to_string);
    let title = item.title().to_string();

    view! {
        <a class="ft-card" href=href>
            {poster.map(|src| view! { <img class="ft-poster" src=src alt="" /> })}
            <div class="ft-card-title">{truncate(&title, 60)}</div>
            <div class="ft-card-meta">{meta}</div>
            <div class="ft-card-genres">{genres}</div>
        </a>
    }
}

#[component]
pub fn MediaGrid(#[prop(into)] items: Signal<Vec<MediaItem>>) -> impl IntoView {
    view! {
        <div class="ft-grid">
            <For
                each=move || items.get()
                key=|item| (item.kind(), item.id())
                let:item
            >
                <MediaCard item=item />
            </For>
        </div>
    }
}

#[component]
pub fn Pager(#[prop(into)] pagination: Signal<Pagination>, on_page: Callback<u32>) -> impl IntoView {
    let page = move || pagination.get().page;
    view! {
        <div class="ft-pagination">
            <button
                class="ft-btn ft-btn-sm"
                disabled=move || !pagination.get().has_previous()
                on:click=move |_| on_page.run(page().saturating_sub(1).max(1))
            >
                "Prev"
            </button>
            <span>
                {move || {
                    let p = pagination.get();
                    format!("Page {} of {}", p.page, p.total_pages().max(1))
                }}
            </span>
            <button
                class="ft-btn ft-btn-sm"
                disabled=move || !pagination.get().has_next()
                on:click=move |_| on_page.run(page() + 1)
            >
                "Next"
            </button>
        </div>
    }
}

// ── Stats ──

#[component]
pub fn StatsPanel(stats: UserStats) -> impl IntoView {
    let dist = stats.watch_status_distribution.clone();
    view! {
        <dl class="ft-stats">
            <dt>"Watched"</dt><dd>{format_count(stats.total_watched)}</dd>
            <dt>"Movies"</dt><dd>{format_count(stats.movies_watched)}</dd>
            <dt>"Series"</dt><dd>{format_count(stats.series_watched)}</dd>
            <dt>"Average rating"</dt><dd>{format_rating(stats.average_rating)}</dd>
            <dt>"Reviews"</dt><dd>{format_count(stats.reviews_written)}</dd>
            <dt>"Planned / watching / watched"</dt>
            <dd>
                {format!(
                    "{} / {} / {}",
                    format_count(dist.planned),
                    format_count(dist.watching),
                    format_count(dist.watched),
                )}
            </dd>
        </dl>
    }
}

// ── Search ──

/// Header search box with a results dropdown.
#[component]
pub fn SearchBar() -> impl IntoView {
    let vm = SearchViewModel::new(use_ctx().app().services);
    let state = bridge(vm.state());
    let vm: Local<SearchViewModel> = StoredValue::new_local(vm);
    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        run(vm, move |vm| async move { vm.input(&text).await });
    };
    let on_scope = move |ev: leptos::ev::Event| {
        let scope = match event_target_value(&ev).as_str() {
            "movies" => SearchScope::Movies,
            "series" => SearchScope::Series,
            _ => SearchScope::All,
        };
        run(vm, move |vm| async move { vm.set_scope(scope).await });
    };

    view! {
        <div class="ft-search">
            <input
                class="ft-input"
                type="search"
                placeholder="Search movies and series"
                prop:value=move || state.get().query
                on:input=on_input
            />
            <select class="ft-select" on:change=on_scope>
                <option value="all">"All"</option>
                <option value="movies">"Movies"</option>
                <option value="series">"Series"</option>
            </select>
            <Show when=move || state.get().searching>
                <span class="ft-loading">"…"</span>
            </Show>
            <Show when=move || state.get().open>
                <ul class="ft-search-results">
                    <li>
                        <button class="ft-btn ft-btn-sm" on:click=move |_| vm.with_value(SearchViewModel::close)>
                            "Close"
                        </button>
                    </li>
                    {move || {
                        let navigate = use_navigate();
                        let results = state.get().results;
                        if results.is_empty() {
                            return view! { <li class="ft-hint">"Nothing found."</li> }.into_any();
                        }
                        results
                            .into_iter()
                            .map(|item| {
                                let href = detail_path(item.media_ref());
                                let label = format!("{} ({})", item.title(), item.release_year());
                                let navigate = navigate.clone();
                                let on_pick = move |ev: leptos::ev::MouseEvent| {
                                    ev.prevent_default();
                                    let path = vm.with_value(|vm| vm.select(&item));
                                    navigate(&path, Default::default());
                                };
                                view! {
                                    <li>
                                        <a href=href on:click=on_pick>{label}</a>
                                    </li>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </ul>
            </Show>
        </div>
    }
}
