#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use filmtracker_client::storage::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use filmtracker_client::{
    App, ClientConfig, HttpRequest, HttpResponse, MemoryStorage, Method, Navigator, Storage, Timer,
    Transport, TransportError,
};
use serde_json::{json, Value};
use uuid::Uuid;

pub const BASE: &str = "http://test/api";

// ── Transport ──

#[derive(Clone)]
pub enum Reply {
    Json { status: u16, body: String },
    Delayed { after: Duration, status: u16, body: String },
    Fail(String),
    Hang,
}

struct Route {
    method: Method,
    path: String,
    reply: Reply,
}

/// Answers requests from a table of `(method, path)` routes. The most
/// recently added route for a path wins. Every request is recorded.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<Vec<Route>>,
    log: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn reply(&self, method: Method, path: &str, reply: Reply) {
        self.routes.borrow_mut().push(Route {
            method,
            path: path.to_string(),
            reply,
        });
    }

    pub fn json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.reply(
            method,
            path,
            Reply::Json {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn get(&self, path: &str, body: Value) {
        self.json(Method::Get, path, 200, body);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.log.borrow().clone()
    }

    /// Recorded requests for `path`, query string ignored.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.log
            .borrow()
            .iter()
            .filter(|r| r.method == method && split(&r.url).0 == path)
            .cloned()
            .collect()
    }

    fn lookup(&self, method: Method, path: &str) -> Option<Reply> {
        self.routes
            .borrow()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .map(|r| r.reply.clone())
    }
}

/// `(path, query)` relative to [`BASE`].
pub fn split(url: &str) -> (&str, &str) {
    let rest = url.strip_prefix(BASE).unwrap_or(url);
    match rest.split_once('?') {
        Some((path, query)) => (path, query),
        None => (rest, ""),
    }
}

/// Value of `key` in the request's query string, still percent-encoded.
pub fn query_param<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
    split(&request.url)
        .1
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.log.borrow_mut().push(request.clone());
        let path = split(&request.url).0.to_string();
        let reply = self.lookup(request.method, &path);
        match reply {
            Some(Reply::Json { status, body }) => Ok(HttpResponse { status, body }),
            Some(Reply::Delayed {
                after,
                status,
                body,
            }) => {
                tokio::time::sleep(after).await;
                Ok(HttpResponse { status, body })
            }
            Some(Reply::Fail(message)) => Err(TransportError(message)),
            Some(Reply::Hang) => futures::future::pending().await,
            None => Ok(HttpResponse {
                status: 404,
                body: json!({ "detail": format!("no route for {path}") }).to_string(),
            }),
        }
    }
}

// ── Timer and navigation ──

pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records navigations. With `follow` set the current path moves to the
/// target immediately, otherwise it stays put as if the navigation were
/// still pending.
pub struct RecordingNavigator {
    path: RefCell<String>,
    follow: bool,
    pub visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str, follow: bool) -> Rc<Self> {
        Rc::new(Self {
            path: RefCell::new(path.to_string()),
            follow,
            visits: RefCell::new(Vec::new()),
        })
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }

    pub fn go(&self, path: &str) {
        self.path.replace(path.to_string());
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_string());
        if self.follow {
            self.go(path);
        }
    }
}

// ── Harness ──

pub struct Harness {
    pub app: App,
    pub transport: Rc<MockTransport>,
    pub storage: Rc<MemoryStorage>,
}

pub fn anonymous() -> Harness {
    build(Rc::new(MemoryStorage::new()))
}

/// A harness whose storage already holds a session for [`user_json`].
pub fn signed_in() -> Harness {
    let storage = Rc::new(MemoryStorage::new());
    storage.set(ACCESS_TOKEN_KEY, "token-1");
    storage.set(REFRESH_TOKEN_KEY, "refresh-1");
    storage.set(USER_KEY, &user_json(false).to_string());
    build(storage)
}

fn build(storage: Rc<MemoryStorage>) -> Harness {
    let transport = Rc::new(MockTransport::default());
    let config = ClientConfig::default().with_base_url(BASE);
    let app = App::new(
        config,
        transport.clone(),
        Rc::new(TokioTimer),
        storage.clone(),
    );
    Harness {
        app,
        transport,
        storage,
    }
}

// ── Fixtures ──

pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn user_json(staff: bool) -> Value {
    json!({
        "id": id(900),
        "username": "ripley",
        "email": "ripley@example.com",
        "is_staff": staff,
        "is_superuser": false
    })
}

pub fn genre_json(n: u128, name: &str) -> Value {
    json!({ "id": id(n), "name": name })
}

pub fn person_json(n: u128, first: &str, last: &str) -> Value {
    json!({ "id": id(n), "first_name": first, "last_name": last, "photo": null, "bio": "" })
}

pub fn movie_json(n: u128, title: &str) -> Value {
    json!({
        "id": id(n),
        "title": title,
        "description": "",
        "release_year": 2000,
        "genres": [genre_json(1, "Drama")],
        "poster": null,
        "duration": 120,
        "directors": [person_json(700, "Michael", "Mann")],
        "actors": [person_json(701, "Al", "Pacino"), person_json(702, "Robert", "De Niro")]
    })
}

pub fn series_json(n: u128, title: &str) -> Value {
    json!({
        "id": id(n),
        "title": title,
        "description": "",
        "release_year": 2010,
        "genres": [],
        "seasons": 2,
        "is_ongoing": true
    })
}

pub fn review_json(n: u128, movie: u128, text: &str) -> Value {
    json!({
        "id": id(n),
        "user": id(900),
        "user_username": "ripley",
        "movie": id(movie),
        "series": null,
        "text": text,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn page(results: Vec<Value>, count: u64) -> Value {
    json!({ "count": count, "next": null, "previous": null, "results": results })
}

pub fn body_json(request: &HttpRequest) -> Value {
    request
        .body
        .as_deref()
        .map(|b| serde_json::from_str(b).unwrap())
        .unwrap_or(Value::Null)
}
