use filmtracker_client::display::{format_duration, status_label};
use filmtracker_client::viewmodel::{DetailViewModel, FormError};
use filmtracker_shared::{MediaItem, MediaKind, MediaRef, Person, Review, WatchState};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use uuid::Uuid;

use crate::components::LoadBanner;
use crate::state::{bridge, run, use_ctx, Local};

/// `/movies/:id` and `/series/:id`. A new id builds a fresh view-model.
#[component]
pub fn DetailPage(kind: MediaKind) -> impl IntoView {
    let params = use_params_map();
    let id = Memo::new(move |_| {
        params
            .get()
            .get("id")
            .and_then(|raw| Uuid::parse_str(&raw).ok())
    });

    move || match id.get() {
        Some(id) => {
            let target = match kind {
                MediaKind::Movie => MediaRef::Movie(id),
                MediaKind::Series => MediaRef::Series(id),
            };
            view! { <Detail target=target /> }.into_any()
        }
        None => view! { <p class="ft-error">"Unknown title."</p> }.into_any(),
    }
}

#[component]
fn Detail(target: MediaRef) -> impl IntoView {
    let ctx = use_ctx();
    let vm = DetailViewModel::new(ctx.app().services, target);
    let state = bridge(vm.state());
    let vm: Local<DetailViewModel> = StoredValue::new_local(vm);
    run(vm, |vm| async move { vm.load().await });

    let signed_in = move || ctx.auth.get().is_authenticated();
    let action_error: RwSignal<Option<String>> = RwSignal::new(None);

    view! {
        <article class="ft-detail">
            <LoadBanner
                load=Signal::derive(move || state.get().load)
                on_retry=Callback::new(move |_| run(vm, |vm| async move { vm.load().await }))
            />
            {move || state.get().item.map(|item| view! { <Header item=item /> })}

            <Show when=move || action_error.get().is_some()>
                <p class="ft-error" role="alert">{move || action_error.get().unwrap_or_default()}</p>
            </Show>

            <Show
                when=signed_in
                fallback=|| view! { <p class="ft-hint"><a href="/login">"Sign in"</a>" to rate, track or review."</p> }
            >
                <RatingPicker vm=vm rating=Signal::derive(move || state.get().user_rating) error=action_error />
                <StatusPicker vm=vm status=Signal::derive(move || state.get().status()) error=action_error />
                <ReviewForm vm=vm />
            </Show>

            <section class="ft-reviews">
                <h3>{move || format!("Reviews ({})", state.with(|s| s.reviews.len()))}</h3>
                <For
                    each=move || state.get().reviews
                    key=|r| (r.id, r.updated_at.clone())
                    let:review
                >
                    <ReviewItem vm=vm review=review error=action_error />
                </For>
            </section>
        </article>
    }
}

#[component]
fn Header(item: MediaItem) -> impl IntoView {
    let (meta, description) = match &item {
        MediaItem::Movie(m) => (
            format!("{} · {}", m.release_year, format_duration(m.duration)),
            m.description.clone(),
        ),
        MediaItem::Series(s) => {
            let running = if s.is_ongoing { "ongoing" } else { "ended" };
            (
                format!("{} · {} seasons · {running}", s.release_year, s.seasons),
                s.description.clone(),
            )
        }
    };
    let genres = item.genres().iter().map(|g| g.name.clone()).collect::<Vec<_>>().join(", ");
    let credits = match &item {
        MediaItem::Movie(m) => Some(credits(&m.directors, &m.actors)),
        MediaItem::Series(_) => None,
    };

    view! {
        <header class="ft-detail-header">
            {item.poster().map(|src| view! { <img class="ft-poster" src=src.to_string() alt="" /> })}
            <div>
                <h2>{item.title().to_string()}</h2>
                <p class="ft-card-meta">{meta}</p>
                <p class="ft-card-genres">{genres}</p>
                {credits}
                <p>{description}</p>
            </div>
        </header>
    }
}

const SHOWN_ACTORS: usize = 10;

fn credits(directors: &[Person], actors: &[Person]) -> impl IntoView {
    let names = |people: &[Person]| {
        people.iter().map(Person::full_name).collect::<Vec<_>>().join(", ")
    };
    let hidden = actors.len().saturating_sub(SHOWN_ACTORS);
    let shown = &actors[..actors.len().min(SHOWN_ACTORS)];

    view! {
        <dl class="ft-credits">
            {(!directors.is_empty()).then(|| view! {
                <dt>"Directed by"</dt>
                <dd>{names(directors)}</dd>
            })}
            {(!shown.is_empty()).then(|| view! {
                <dt>"Cast"</dt>
                <dd>
                    {names(shown)}
                    {(hidden > 0).then(|| view! { <span class="ft-hint">{format!(" +{hidden} more")}</span> })}
                </dd>
            })}
        </dl>
    }
}

// ── Rating and watch status ──

#[component]
fn RatingPicker(
    vm: Local<DetailViewModel>,
    #[prop(into)] rating: Signal<Option<u8>>,
    error: RwSignal<Option<String>>,
) -> impl IntoView {
    let rate = move |value: u8| {
        error.set(None);
        run(vm, move |vm| async move {
            if let Err(err) = vm.rate(value).await {
                error.set(Some(err.message));
            }
        });
    };

    view! {
        <div class="ft-rating">
            <span>"Your rating: "</span>
            {(1..=10u8)
                .map(|value| view! {
                    <button
                        class="ft-rating-btn"
                        class:active=move || rating.get() == Some(value)
                        on:click=move |_| rate(value)
                    >
                        {value}
                    </button>
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn StatusPicker(
    vm: Local<DetailViewModel>,
    #[prop(into)] status: Signal<Option<WatchState>>,
    error: RwSignal<Option<String>>,
) -> impl IntoView {
    let set = move |next: WatchState| {
        error.set(None);
        run(vm, move |vm| async move {
            if let Err(err) = vm.change_watch_status(next).await {
                error.set(Some(err.message));
            }
        });
    };

    view! {
        <div class="ft-status">
            <span>
                {move || match status.get() {
                    Some(state) => format!("Status: {}", status_label(state)),
                    None => "Not on your list".to_string(),
                }}
            </span>
            {WatchState::ALL
                .into_iter()
                .map(|state| view! {
                    <button
                        class="ft-btn ft-btn-sm"
                        class:active=move || status.get() == Some(state)
                        on:click=move |_| set(state)
                    >
                        {state.label()}
                    </button>
                })
                .collect_view()}
        </div>
    }
}

// ── Reviews ──

#[component]
fn ReviewForm(vm: Local<DetailViewModel>) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let error: RwSignal<Option<FormError>> = RwSignal::new(None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submitting.set(true);
        let body = text.get_untracked();
        run(vm, move |vm| async move {
            match vm.submit_review(&body).await {
                Ok(_) => {
                    text.set(String::new());
                    error.set(None);
                }
                Err(err) => error.set(Some(err)),
            }
            submitting.set(false);
        });
    };

    view! {
        <form class="ft-review-form" on:submit=on_submit>
            <textarea
                class="ft-textarea"
                placeholder="Write a review..."
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            />
            <span class="ft-field-error">
                {move || error.get().map(|e| e.field("text").unwrap_or(&e.message).to_string())}
            </span>
            <button class="ft-btn" type="submit" disabled=move || submitting.get()>
                {move || if submitting.get() { "Posting..." } else { "Post review" }}
            </button>
        </form>
    }
}

#[component]
fn ReviewItem(vm: Local<DetailViewModel>, review: Review, error: RwSignal<Option<String>>) -> impl IntoView {
    let ctx = use_ctx();
    let review_id = review.id;
    let author = review.user;
    let is_own = move || {
        ctx.auth
            .get()
            .user()
            .is_some_and(|u| Some(u.id) == author)
    };
    let editing = RwSignal::new(false);
    let draft = RwSignal::new(review.text.clone());

    let on_delete = move |_| {
        error.set(None);
        run(vm, move |vm| async move {
            if let Err(err) = vm.delete_review(review_id).await {
                error.set(Some(err.message));
            }
        });
    };
    let on_save = move |_| {
        let body = draft.get_untracked();
        run(vm, move |vm| async move {
            match vm.update_review(review_id, &body).await {
                Ok(_) => editing.set(false),
                Err(err) => error.set(Some(err.message)),
            }
        });
    };
    let edited = review.updated_at != review.created_at;

    view! {
        <div class="ft-review">
            <div class="ft-review-header">
                <strong>{review.user_username.clone()}</strong>
                <time>{review.created_at.clone()}</time>
                {edited.then(|| view! { <span class="ft-hint">" (edited)"</span> })}
                <Show when=is_own>
                    <button class="ft-btn ft-btn-sm" on:click=move |_| editing.update(|e| *e = !*e)>
                        {move || if editing.get() { "Cancel" } else { "Edit" }}
                    </button>
                    <button class="ft-btn ft-btn-sm ft-btn-danger" on:click=on_delete>"Delete"</button>
                </Show>
            </div>
            <Show
                when=move || editing.get()
                fallback={
                    let text = review.text.clone();
                    move || view! { <p class="ft-review-body">{text.clone()}</p> }
                }
            >
                <textarea
                    class="ft-textarea"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button class="ft-btn ft-btn-sm" on:click=on_save>"Save"</button>
            </Show>
        </div>
    }
}
