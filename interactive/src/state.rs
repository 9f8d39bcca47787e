use std::future::Future;

use filmtracker_client::{App as ClientApp, AuthState, Store};
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use wasm_bindgen_futures::spawn_local;

/// Non-`Send` value parked in the reactive arena so closures can capture
/// the `Copy` handle.
pub type Local<T> = StoredValue<T, LocalStorage>;

/// Shared via context.
#[derive(Clone, Copy)]
pub struct Ctx {
    pub app: Local<ClientApp>,
    pub auth: RwSignal<AuthState>,
}

impl Ctx {
    pub fn app(&self) -> ClientApp {
        self.app.get_value()
    }
}

pub fn use_ctx() -> Ctx {
    expect_context::<Ctx>()
}

/// Mirrors `store` into a signal until the current owner is disposed.
pub fn bridge<T>(store: &Store<T>) -> RwSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    let signal = RwSignal::new(store.get());
    let sub = store.subscribe(move |value| {
        let _ = signal.try_set(value.clone());
    });
    let _ = StoredValue::new_local(sub);
    signal
}

/// Runs an operation on a parked view-model.
pub fn run<V, F, Fut>(vm: Local<V>, op: F)
where
    V: Clone + 'static,
    F: FnOnce(V) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_local(op(vm.get_value()));
}
