use filmtracker_client::viewmodel::WatchListViewModel;
use filmtracker_shared::WatchState;
use leptos::prelude::*;

use super::as_items;
use crate::components::{LoadBanner, MediaGrid};
use crate::state::{bridge, run, use_ctx, Local};

#[component]
pub fn WatchListPage() -> impl IntoView {
    let vm = WatchListViewModel::new(use_ctx().app().services);
    let state = bridge(vm.state());
    let vm: Local<WatchListViewModel> = StoredValue::new_local(vm);
    run(vm, |vm| async move { vm.load().await });

    let shelf = move |status: WatchState| {
        let movies = Signal::derive(move || state.with(|s| as_items(s.movies.get(status))));
        let series = Signal::derive(move || state.with(|s| as_items(s.series.get(status))));
        view! {
            <section class="ft-shelf">
                <h3>
                    {move || {
                        let total = state.with(|s| s.movies.get(status).len() + s.series.get(status).len());
                        format!("{} ({total})", status.label())
                    }}
                </h3>
                <Show
                    when=move || !movies.get().is_empty() || !series.get().is_empty()
                    fallback=|| view! { <p class="ft-hint">"Nothing here yet."</p> }
                >
                    <MediaGrid items=movies />
                    <MediaGrid items=series />
                </Show>
            </section>
        }
    };

    view! {
        <div class="ft-watchlist">
            <h2>"Watch list"</h2>
            <LoadBanner
                load=Signal::derive(move || state.get().load)
                on_retry=Callback::new(move |_| run(vm, |vm| async move { vm.load().await }))
            />
            {WatchState::ALL.into_iter().map(shelf).collect_view()}
        </div>
    }
}
