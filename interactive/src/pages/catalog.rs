use filmtracker_client::viewmodel::{CatalogViewModel, ContentType};
use filmtracker_client::CatalogFilters;
use leptos::prelude::*;

use crate::components::{LoadBanner, MediaGrid, Pager};
use crate::state::{bridge, run, use_ctx, Local};

const ORDERINGS: [(&str, &str); 8] = [
    ("-created_at", "Newest first"),
    ("created_at", "Oldest first"),
    ("-release_year", "Release year, newest"),
    ("release_year", "Release year, oldest"),
    ("title", "Title A-Z"),
    ("-title", "Title Z-A"),
    ("-rating", "Rating, highest"),
    ("rating", "Rating, lowest"),
];

#[component]
pub fn CatalogPage() -> impl IntoView {
    let vm = CatalogViewModel::new(use_ctx().app().services);
    let state = bridge(vm.state());
    let vm: Local<CatalogViewModel> = StoredValue::new_local(vm);
    run(vm, |vm| async move { vm.load_genres().await });
    run(vm, |vm| async move { vm.load().await });

    let content = move || state.with(|s| s.content);
    let filters = move || state.with(|s| s.active().filters.clone());
    let current = move || state.with_untracked(|s| s.active().filters.clone());
    let items = Signal::derive(move || state.with(|s| s.active().items.clone()));
    let pagination = Signal::derive(move || state.with(|s| s.active().pagination.clone()));

    let switch = move |to: ContentType| {
        run(vm, move |vm| async move { vm.switch_content(to).await });
    };
    let apply = move |next: CatalogFilters| {
        run(vm, move |vm| async move { vm.change_filters(next).await });
    };
    let year = |raw: String| raw.trim().parse::<i32>().ok();

    view! {
        <section class="ft-catalog">
            <div class="ft-tabs">
                <button
                    class=move || tab_class(content() == ContentType::Movies)
                    on:click=move |_| switch(ContentType::Movies)
                >
                    "Movies"
                </button>
                <button
                    class=move || tab_class(content() == ContentType::Series)
                    on:click=move |_| switch(ContentType::Series)
                >
                    "Series"
                </button>
            </div>

            <div class="ft-filters">
                <input
                    class="ft-input"
                    type="search"
                    placeholder="Search"
                    prop:value=move || filters().search
                    on:change=move |ev| {
                        let text = event_target_value(&ev);
                        run(vm, move |vm| async move { vm.search(&text).await });
                    }
                />
                <select
                    class="ft-select"
                    prop:value=move || filters().genres
                    on:change=move |ev| {
                        let genre = event_target_value(&ev);
                        apply(CatalogFilters { genres: genre, ..current() });
                    }
                >
                    <option value="">"All genres"</option>
                    <For each=move || state.with(|s| s.genres.clone()) key=|g| g.id let:genre>
                        <option value=genre.name.clone()>{genre.name.clone()}</option>
                    </For>
                </select>
                <input
                    class="ft-input ft-input-sm"
                    type="number"
                    placeholder="From year"
                    prop:value=move || filters().release_year_min.map(|y| y.to_string()).unwrap_or_default()
                    on:change=move |ev| {
                        let min = year(event_target_value(&ev));
                        apply(CatalogFilters { release_year_min: min, ..current() });
                    }
                />
                <input
                    class="ft-input ft-input-sm"
                    type="number"
                    placeholder="To year"
                    prop:value=move || filters().release_year_max.map(|y| y.to_string()).unwrap_or_default()
                    on:change=move |ev| {
                        let max = year(event_target_value(&ev));
                        apply(CatalogFilters { release_year_max: max, ..current() });
                    }
                />
                <select
                    class="ft-select"
                    prop:value=move || filters().ordering
                    on:change=move |ev| {
                        let ordering = event_target_value(&ev);
                        apply(CatalogFilters { ordering, ..current() });
                    }
                >
                    {ORDERINGS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <button
                    class="ft-btn ft-btn-sm"
                    on:click=move |_| run(vm, |vm| async move { vm.clear_filters().await })
                >
                    "Clear"
                </button>
            </div>

            <LoadBanner
                load=Signal::derive(move || state.get().load)
                on_retry=Callback::new(move |_| run(vm, |vm| async move { vm.load().await }))
            />
            <Show
                when=move || !items.get().is_empty() || state.get().load.is_loading()
                fallback=|| view! { <p class="ft-hint">"Nothing matches these filters."</p> }
            >
                <MediaGrid items=items />
            </Show>
            <Pager
                pagination=pagination
                on_page=Callback::new(move |page| run(vm, move |vm| async move { vm.change_page(page).await }))
            />
        </section>
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "ft-tab ft-active"
    } else {
        "ft-tab"
    }
}
