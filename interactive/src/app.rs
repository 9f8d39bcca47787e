use std::rc::Rc;

use filmtracker_client::{App as ClientApp, LoginRedirect};
use filmtracker_shared::MediaKind;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::path;

use crate::auth::{LoginPage, RegisterPage, UserMenu};
use crate::components::SearchBar;
use crate::pages::{
    AdminPage, CatalogPage, DetailPage, HomePage, ProfilePage, RecommendationsPage,
    WatchListPage,
};
use crate::platform::{config_from_meta, BrowserStorage, BrowserTimer, FetchTransport, RouterNavigator};
use crate::state::{bridge, use_ctx, Ctx};

/// Root of the single-page app.
#[component]
pub fn FilmTracker() -> impl IntoView {
    let app = ClientApp::new(
        config_from_meta(),
        Rc::new(FetchTransport),
        Rc::new(BrowserTimer),
        BrowserStorage::open(),
    );
    let auth = bridge(app.session().state());
    provide_context(Ctx {
        app: StoredValue::new_local(app),
        auth,
    });

    view! {
        <Router>
            <RedirectOnUnauthorized />
            <div class="ft-app">
                <nav class="ft-nav">
                    <a class="ft-brand" href="/">"FilmTracker"</a>
                    <a href="/catalog">"Catalog"</a>
                    <Show when=move || auth.get().is_authenticated()>
                        <a href="/watchlist">"Watch list"</a>
                        <a href="/recommendations">"For you"</a>
                    </Show>
                    <Show when=move || auth.get().is_admin()>
                        <a href="/admin">"Admin"</a>
                    </Show>
                    <SearchBar />
                    <UserMenu />
                </nav>
                <main class="ft-main">
                    <Routes fallback=|| view! { <p class="ft-hint">"Page not found."</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/register") view=RegisterPage />
                        <Route path=path!("/catalog") view=CatalogPage />
                        <Route path=path!("/movies/:id") view=|| view! { <DetailPage kind=MediaKind::Movie /> } />
                        <Route path=path!("/series/:id") view=|| view! { <DetailPage kind=MediaKind::Series /> } />
                        <Route path=path!("/watchlist") view=|| view! { <SignedIn><WatchListPage /></SignedIn> } />
                        <Route path=path!("/recommendations") view=|| view! { <SignedIn><RecommendationsPage /></SignedIn> } />
                        <Route path=path!("/profile") view=|| view! { <SignedIn><ProfilePage /></SignedIn> } />
                        <Route path=path!("/admin") view=AdminGate />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// Installs the 401 policy. Must live inside the router so navigation goes
/// through it.
#[component]
fn RedirectOnUnauthorized() -> impl IntoView {
    let navigate = use_navigate();
    let navigator = RouterNavigator::new(move |path| navigate(path, Default::default()));
    let redirect = LoginRedirect::install(&use_ctx().app().api, Rc::new(navigator));
    let _ = StoredValue::new_local(redirect);
}

#[component]
fn SignedIn(children: ChildrenFn) -> impl IntoView {
    let auth = use_ctx().auth;
    move || {
        if auth.get().is_authenticated() {
            children().into_any()
        } else {
            view! {
                <p class="ft-hint">
                    <a href="/login">"Sign in"</a>" to see this page."
                </p>
            }
            .into_any()
        }
    }
}

#[component]
fn AdminGate() -> impl IntoView {
    let auth = use_ctx().auth;
    move || {
        if auth.get().is_admin() {
            view! { <AdminPage /> }.into_any()
        } else {
            view! { <p class="ft-error">"Staff only."</p> }.into_any()
        }
    }
}
