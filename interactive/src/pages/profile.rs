use filmtracker_client::display::{detail_path, initials, truncate};
use filmtracker_client::viewmodel::ProfileViewModel;
use leptos::prelude::*;

use crate::components::{LoadBanner, StatsPanel};
use crate::state::{bridge, run, use_ctx, Local};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_ctx();
    let vm = ProfileViewModel::new(ctx.app().services);
    let state = bridge(vm.state());
    let vm: Local<ProfileViewModel> = StoredValue::new_local(vm);
    run(vm, |vm| async move { vm.load().await });

    view! {
        <div class="ft-profile">
            {move || ctx.auth.get().user().cloned().map(|user| view! {
                <header class="ft-profile-header">
                    <span class="ft-avatar ft-avatar-lg">{initials(&user.username)}</span>
                    <div>
                        <h2>{user.username.clone()}</h2>
                        <p class="ft-hint">{user.email.clone()}</p>
                    </div>
                </header>
            })}
            <LoadBanner
                load=Signal::derive(move || state.get().load)
                on_retry=Callback::new(move |_| run(vm, |vm| async move { vm.load().await }))
            />
            {move || state.get().stats.map(|stats| view! { <StatsPanel stats=stats /> })}
            <section class="ft-reviews">
                <h3>"Your reviews"</h3>
                <For
                    each=move || state.get().reviews
                    key=|r| r.id
                    let:review
                >
                    <div class="ft-review">
                        <div class="ft-review-header">
                            {review.target().map(|target| view! {
                                <a href=detail_path(target)>"Open title"</a>
                            })}
                            <time>{review.created_at.clone()}</time>
                        </div>
                        <p class="ft-review-body">{truncate(&review.text, 280)}</p>
                    </div>
                </For>
            </section>
        </div>
    }
}
