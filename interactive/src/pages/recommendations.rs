use filmtracker_client::viewmodel::{PersonalizedTab, RecommendationsViewModel};
use leptos::prelude::*;

use super::as_items;
use crate::components::{LoadBanner, MediaGrid};
use crate::state::{bridge, run, use_ctx, Local};

const TABS: [(PersonalizedTab, &str); 3] = [
    (PersonalizedTab::ForYou, "For you"),
    (PersonalizedTab::Popular, "Popular"),
    (PersonalizedTab::New, "New releases"),
];

#[component]
pub fn RecommendationsPage() -> impl IntoView {
    let vm = RecommendationsViewModel::new(use_ctx().app().services);
    let state = bridge(vm.state());
    let vm: Local<RecommendationsViewModel> = StoredValue::new_local(vm);
    run(vm, |vm| async move { vm.load().await });

    let visible = Signal::derive(move || state.with(|s| as_items(s.visible())));

    view! {
        <div class="ft-recommendations">
            <h2>"Recommendations"</h2>
            <div class="ft-tabs">
                {TABS
                    .into_iter()
                    .map(|(tab, label)| view! {
                        <button
                            class="ft-tab"
                            class:active=move || state.with(|s| s.tab == tab)
                            on:click=move |_| vm.with_value(|vm| vm.select_tab(tab))
                        >
                            {label}
                        </button>
                    })
                    .collect_view()}
            </div>
            <LoadBanner
                load=Signal::derive(move || state.get().load)
                on_retry=Callback::new(move |_| run(vm, |vm| async move { vm.load().await }))
            />
            <Show when=move || state.with(|s| s.tab == PersonalizedTab::ForYou && s.is_fallback())>
                <p class="ft-hint">"Rate a few titles to get personal picks. Meanwhile, here is what is popular."</p>
            </Show>
            <MediaGrid items=visible />
        </div>
    }
}
