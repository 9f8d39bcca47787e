use filmtracker_shared::User;
use std::rc::Rc;

use crate::storage::{Storage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use crate::store::{Store, Subscription};

/// Who is using the app right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    /// Not resolved yet; the UI shows a spinner.
    #[default]
    Unknown,
    Anonymous,
    Authenticated(User),
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }
}

/// The signed-in identity and its tokens.
///
/// Durable storage is the source of truth; [`AuthState`] mirrors it and is
/// what the rest of the app subscribes to. Only this type writes the
/// session keys.
#[derive(Clone)]
pub struct Session {
    storage: Rc<dyn Storage>,
    state: Store<AuthState>,
}

impl Session {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            storage,
            state: Store::new(AuthState::Unknown),
        }
    }

    /// App start: authenticated only when both the token and the cached
    /// user are present.
    pub fn restore(&self) {
        let next = match (self.access_token(), self.stored_user()) {
            (Some(_), Some(user)) => AuthState::Authenticated(user),
            _ => AuthState::Anonymous,
        };
        self.state.set(next);
    }

    /// Re-reads storage after something else touched it directly. No
    /// network involved.
    pub fn refresh_user(&self) {
        self.restore();
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub(crate) fn establish(&self, access: &str, refresh: Option<&str>, user: &User) {
        self.storage.set(ACCESS_TOKEN_KEY, access);
        match refresh {
            Some(refresh) => self.storage.set(REFRESH_TOKEN_KEY, refresh),
            None => self.storage.remove(REFRESH_TOKEN_KEY),
        }
        match serde_json::to_string(user) {
            Ok(json) => self.storage.set(USER_KEY, &json),
            Err(err) => log::error!("could not persist user: {err}"),
        }
        self.state.set(AuthState::Authenticated(user.clone()));
    }

    /// Removes every session key and drops to anonymous.
    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.state.set(AuthState::Anonymous);
    }

    pub fn current(&self) -> AuthState {
        self.state.get()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }

    pub fn state(&self) -> &Store<AuthState> {
        &self.state
    }

    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) -> Subscription {
        self.state.subscribe(listener)
    }

    fn stored_user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("ignoring unreadable cached user: {err}");
                None
            }
        }
    }
}
