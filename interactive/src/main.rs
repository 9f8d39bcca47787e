mod app;
mod auth;
mod components;
mod pages;
mod platform;
mod state;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let document = web_sys::window()
        .expect("no window")
        .document()
        .expect("no document");

    // Mount into the host page's placeholder when there is one.
    match document.get_element_by_id("filmtracker") {
        Some(el) => {
            let html_el: web_sys::HtmlElement = el.unchecked_into();
            leptos::mount::mount_to(html_el, app::FilmTracker).forget();
        }
        None => leptos::mount::mount_to_body(app::FilmTracker),
    }
}
