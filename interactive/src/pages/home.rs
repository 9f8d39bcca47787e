use filmtracker_client::viewmodel::HomeViewModel;
use leptos::prelude::*;

use super::as_items;
use crate::components::{LoadBanner, MediaGrid, StatsPanel};
use crate::state::{bridge, run, use_ctx, Local};

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_ctx();
    let vm = HomeViewModel::new(ctx.app().services);
    let state = bridge(vm.state());
    let vm: Local<HomeViewModel> = StoredValue::new_local(vm);
    let reload = move || run(vm, |vm| async move { vm.load().await });
    reload();

    // Signing in or out changes what the page shows.
    Effect::new(move |prev: Option<bool>| {
        let signed_in = ctx.auth.get().is_authenticated();
        if prev.is_some_and(|was| was != signed_in) {
            reload();
        }
        signed_in
    });

    let popular = Signal::derive(move || state.with(|s| as_items(&s.popular)));
    let recommended = Signal::derive(move || state.with(|s| as_items(&s.recommendations)));

    view! {
        <section class="ft-home">
            <LoadBanner load=Signal::derive(move || state.get().load) on_retry=Callback::new(move |_| reload()) />
            {move || state.get().stats.map(|stats| view! {
                <div class="ft-panel">
                    <h3>"Your activity"</h3>
                    <StatsPanel stats=stats />
                </div>
            })}
            <Show when=move || state.with(|s| !s.recommendations.is_empty())>
                <h2>"Recommended for you"</h2>
                <MediaGrid items=recommended />
            </Show>
            <h2>"Popular movies"</h2>
            <MediaGrid items=popular />
        </section>
    }
}
