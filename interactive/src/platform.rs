//! Browser implementations of the client's platform seams.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use filmtracker_client::{
    ClientConfig, HttpRequest, HttpResponse, MemoryStorage, Method, Navigator, Storage, Timer,
    Transport, TransportError,
};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use web_sys::window;

/// Defaults, overridden by `<meta name="filmtracker-api">` and
/// `<meta name="filmtracker-timeout-ms">` when the page sets them.
pub fn config_from_meta() -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(url) = meta("filmtracker-api") {
        config = config.with_base_url(url);
    }
    if let Some(ms) = meta("filmtracker-timeout-ms").and_then(|v| v.parse().ok()) {
        config.request_timeout_ms = ms;
    }
    config
}

fn meta(name: &str) -> Option<String> {
    let document = window()?.document()?;
    let el = document
        .query_selector(&format!("meta[name='{name}']"))
        .ok()
        .flatten()?;
    el.get_attribute("content").filter(|v| !v.is_empty())
}

// ── HTTP ──

pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let req = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let resp = req.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

// ── Storage ──

/// `window.localStorage`. Write failures (quota, private mode) are logged
/// and otherwise ignored.
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    /// Falls back to in-memory storage when the browser refuses access.
    pub fn open() -> Rc<dyn Storage> {
        match window().and_then(|w| w.local_storage().ok()).flatten() {
            Some(inner) => Rc::new(BrowserStorage { inner }),
            None => {
                log::warn!("localStorage unavailable, session will not survive a reload");
                Rc::new(MemoryStorage::new())
            }
        }
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if self.inner.set_item(key, value).is_err() {
            log::warn!("could not write {key} to localStorage");
        }
    }

    fn remove(&self, key: &str) {
        let _ = self.inner.remove_item(key);
    }
}

// ── Navigation ──

/// Routes through the router's navigate function; the current path comes
/// from `window.location`.
pub struct RouterNavigator {
    navigate: Box<dyn Fn(&str)>,
}

impl RouterNavigator {
    pub fn new(navigate: impl Fn(&str) + 'static) -> Self {
        Self {
            navigate: Box::new(navigate),
        }
    }
}

impl Navigator for RouterNavigator {
    fn current_path(&self) -> String {
        window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        (self.navigate)(path);
    }
}
