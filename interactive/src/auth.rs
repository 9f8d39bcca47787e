use std::collections::BTreeMap;

use filmtracker_client::display::initials;
use filmtracker_client::{validate_registration, AuthOutcome};
use filmtracker_shared::RegisterRequest;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::state::{bridge, use_ctx};

/// Sign-in link or the current user with a logout button.
#[component]
pub fn UserMenu() -> impl IntoView {
    let ctx = use_ctx();
    let navigate = use_navigate();

    let on_logout = move |_| {
        ctx.app().auth.logout();
        navigate("/", Default::default());
    };

    move || match ctx.auth.get().user().cloned() {
        Some(user) => view! {
            <div class="ft-auth">
                <a class="ft-avatar" href="/profile" title=user.username.clone()>
                    {initials(&user.username)}
                </a>
                <span class="ft-username">{user.username.clone()}</span>
                <button class="ft-btn ft-btn-sm" on:click=on_logout.clone()>"Logout"</button>
            </div>
        }
        .into_any(),
        None => view! {
            <div class="ft-auth">
                <a class="ft-btn" href="/login">"Sign in"</a>
                <a class="ft-btn ft-btn-sm" href="/register">"Register"</a>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_ctx();
    let pending = bridge(ctx.app().auth.pending());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        let auth = ctx.app().auth;
        let navigate = navigate.clone();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        spawn_local(async move {
            match auth.login(email.trim(), &password).await {
                AuthOutcome::Success(user) => {
                    log::info!("signed in as {}", user.username);
                    navigate("/", Default::default());
                }
                AuthOutcome::Failure { message, .. } => error.set(Some(message)),
            }
        });
    };

    view! {
        <section class="ft-auth-page">
            <h2>"Sign in"</h2>
            <Show when=move || error.get().is_some()>
                <p class="ft-error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <form class="ft-form" on:submit=on_submit>
                <label>
                    "Email"
                    <input
                        class="ft-input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        class="ft-input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button class="ft-btn" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="ft-hint">"No account? "<a href="/register">"Register"</a></p>
        </section>
    }
}

const REGISTER_FIELDS: [&str; 4] = ["email", "username", "password", "password2"];

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_ctx();
    let pending = bridge(ctx.app().auth.pending());
    let email = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password2 = RwSignal::new(String::new());
    let field_errors = RwSignal::new(BTreeMap::<&'static str, String>::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        let request = RegisterRequest {
            email: email.get_untracked().trim().to_string(),
            username: username.get_untracked(),
            password: password.get_untracked(),
            password2: password2.get_untracked(),
        };
        let invalid = validate_registration(&request);
        let blocked = !invalid.is_empty();
        field_errors.set(
            invalid
                .into_iter()
                .map(|(name, message)| (name, message.to_string()))
                .collect(),
        );
        if blocked {
            return;
        }

        let auth = ctx.app().auth;
        let navigate = navigate.clone();
        spawn_local(async move {
            match auth.register(&request).await {
                AuthOutcome::Success(_) => navigate("/", Default::default()),
                outcome => {
                    // Inputs the server rejected get their message inline;
                    // the banner is for everything else.
                    let mut placed = false;
                    field_errors.update(|errs| {
                        for name in REGISTER_FIELDS {
                            if let Some(message) = outcome.field(name) {
                                errs.insert(name, message.to_string());
                                placed = true;
                            }
                        }
                    });
                    if !placed {
                        error.set(outcome.error().map(str::to_string));
                    }
                }
            }
        });
    };

    let field = move |label: &'static str, name: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label>
                {label}
                <input
                    class="ft-input"
                    type=kind
                    prop:value=move || value.get()
                    on:input=move |ev| {
                        value.set(event_target_value(&ev));
                        field_errors.update(|errs| {
                            errs.remove(name);
                        });
                    }
                />
                <span class="ft-field-error">
                    {move || field_errors.with(|errs| errs.get(name).cloned().unwrap_or_default())}
                </span>
            </label>
        }
    };

    view! {
        <section class="ft-auth-page">
            <h2>"Create an account"</h2>
            <Show when=move || error.get().is_some()>
                <p class="ft-error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <form class="ft-form" on:submit=on_submit>
                {field("Email", "email", "email", email)}
                {field("Username", "username", "text", username)}
                {field("Password", "password", "password", password)}
                {field("Confirm password", "password2", "password", password2)}
                <button class="ft-btn" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Registering..." } else { "Register" }}
                </button>
            </form>
            <p class="ft-hint">"Already registered? "<a href="/login">"Sign in"</a></p>
        </section>
    }
}
