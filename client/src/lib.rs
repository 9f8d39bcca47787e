//! Data layer of the film tracker front end.
//!
//! Everything between the pages and the REST backend lives here: the HTTP
//! adapter, the persisted session, one service per resource family and one
//! view-model per page. Nothing in this crate touches the DOM; the browser
//! specifics come in through [`Transport`], [`Timer`], [`Storage`] and
//! [`Navigator`].

pub mod auth;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod filters;
pub mod http;
pub mod query;
pub mod redirect;
pub mod services;
pub mod session;
pub mod storage;
pub mod store;
pub mod transport;
pub mod viewmodel;

pub use auth::{validate_registration, AuthOutcome, AuthStore};
pub use config::ClientConfig;
pub use debounce::Debouncer;
pub use error::{ApiError, ErrorBody, ErrorKind, Ignored};
pub use filters::{CatalogFilters, Pagination};
pub use http::ApiClient;
pub use query::Query;
pub use redirect::{LoginRedirect, Navigator};
pub use services::Services;
pub use session::{AuthState, Session};
pub use storage::{MemoryStorage, Storage};
pub use store::{Store, Subscription};
pub use transport::{HttpRequest, HttpResponse, Method, Timer, Transport, TransportError};

use std::rc::Rc;

/// Everything a page needs, wired once at startup.
#[derive(Clone)]
pub struct App {
    pub api: ApiClient,
    pub auth: AuthStore,
    pub services: Services,
}

impl App {
    /// Builds the client stack and restores any persisted session.
    pub fn new(
        config: ClientConfig,
        transport: Rc<dyn Transport>,
        timer: Rc<dyn Timer>,
        storage: Rc<dyn Storage>,
    ) -> Self {
        let session = Session::new(storage);
        session.restore();
        let api = ApiClient::new(config, transport, timer, session.clone());
        let services = Services::new(api.clone());
        let auth = AuthStore::new(session, services.auth.clone());
        Self {
            api,
            auth,
            services,
        }
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }
}
