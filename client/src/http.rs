use filmtracker_shared::Paginated;
use futures::future::{select, Either};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorBody};
use crate::query::Query;
use crate::session::Session;
use crate::store::{Emitter, Subscription};
use crate::transport::{HttpRequest, Method, Timer, Transport};

/// The single chokepoint for backend calls.
///
/// Attaches the bearer token, enforces the request timeout and turns a 401
/// from any call into a session teardown plus an "unauthorized" event. It
/// never navigates; whoever owns routing subscribes via
/// [`ApiClient::on_unauthorized`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<Inner>,
}

struct Inner {
    config: ClientConfig,
    transport: Rc<dyn Transport>,
    timer: Rc<dyn Timer>,
    session: Session,
    unauthorized: Emitter<()>,
}

/// Some list endpoints answer with a page envelope, some with a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageOrList<T> {
    Page(Paginated<T>),
    List(Vec<T>),
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        transport: Rc<dyn Transport>,
        timer: Rc<dyn Timer>,
        session: Session,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                transport,
                timer,
                session,
                unauthorized: Emitter::new(),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn timer(&self) -> Rc<dyn Timer> {
        Rc::clone(&self.inner.timer)
    }

    /// Fires after the session has been cleared because of a 401.
    pub fn on_unauthorized(&self, listener: impl Fn() + 'static) -> Subscription {
        self.inner.unauthorized.subscribe(move |_| listener())
    }

    pub fn url(&self, path: &str, query: &Query) -> String {
        let base = &self.inner.config.api_base_url;
        if query.is_empty() {
            format!("{base}{path}")
        } else {
            format!("{base}{path}?{}", query.to_query_string())
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T, ApiError> {
        let text = self.execute(Method::Get, path, query, None).await?;
        decode(&text)
    }

    /// GET a list endpoint, accepting either a page envelope or a bare array.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<Paginated<T>, ApiError> {
        let text = self.execute(Method::Get, path, query, None).await?;
        match decode::<Option<PageOrList<T>>>(&text)? {
            Some(PageOrList::Page(page)) => Ok(page),
            Some(PageOrList::List(items)) => Ok(items.into()),
            None => Ok(Paginated::default()),
        }
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        let text = self
            .execute(Method::Post, path, &Query::new(), Some(body))
            .await?;
        decode(&text)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        let text = self
            .execute(Method::Put, path, &Query::new(), Some(body))
            .await?;
        decode(&text)
    }

    /// DELETE; whatever the server sends back is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::Delete, path, &Query::new(), None)
            .await
            .map(|_| ())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<String>,
    ) -> Result<String, ApiError> {
        let url = self.url(path, query);
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some(token) = self.inner.session.access_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        log::debug!("{method} {url}");
        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };

        let timeout = self.inner.config.request_timeout();
        let send = self.inner.transport.send(request);
        let deadline = self.inner.timer.sleep(timeout);
        let response = match select(send, deadline).await {
            Either::Left((result, _)) => result.map_err(|e| {
                log::warn!("{method} {path}: {e}");
                ApiError::Network(e.0)
            })?,
            Either::Right(((), _)) => {
                log::warn!("{method} {path}: no response within {timeout:?}");
                return Err(ApiError::Timeout(timeout));
            }
        };

        if response.is_success() {
            return Ok(response.body);
        }

        let err = ApiError::from_status(response.status, ErrorBody::parse(&response.body));
        log::warn!("{method} {path}: {err}");
        if matches!(err, ApiError::Unauthorized(_)) {
            self.inner.session.clear();
            self.inner.unauthorized.emit(&());
        }
        Err(err)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Empty bodies decode as JSON `null`, so `()` and `Option<T>` accept them.
fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
