use std::cell::RefCell;
use std::rc::Rc;

use crate::http::ApiClient;
use crate::store::Subscription;

/// Where the app is and how to move it.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// Sends the user to the login page after a 401.
///
/// Several requests failing together produce one redirect: nothing happens
/// while already on the login page, and a redirect issued from some page
/// is not repeated while the navigator still reports that page (the
/// navigation has not landed yet). Signing in clears the bookkeeping.
pub struct LoginRedirect {
    _unauthorized: Subscription,
    _session: Subscription,
}

struct Policy {
    navigator: Rc<dyn Navigator>,
    login_path: String,
    issued_from: RefCell<Option<String>>,
}

impl Policy {
    fn on_unauthorized(&self) {
        let here = self.navigator.current_path();
        if here == self.login_path {
            self.issued_from.replace(None);
            return;
        }
        if self.issued_from.borrow().as_deref() == Some(here.as_str()) {
            log::debug!("login redirect from {here} already in flight");
            return;
        }
        log::info!("session rejected on {here}, redirecting to {}", self.login_path);
        self.issued_from.replace(Some(here));
        self.navigator.navigate(&self.login_path);
    }
}

impl LoginRedirect {
    pub fn install(api: &ApiClient, navigator: Rc<dyn Navigator>) -> Self {
        let policy = Rc::new(Policy {
            navigator,
            login_path: api.config().login_path.clone(),
            issued_from: RefCell::new(None),
        });

        let on_401 = Rc::clone(&policy);
        let unauthorized = api.on_unauthorized(move || on_401.on_unauthorized());

        let session = api.session().subscribe(move |state| {
            if state.is_authenticated() {
                policy.issued_from.replace(None);
            }
        });

        Self {
            _unauthorized: unauthorized,
            _session: session,
        }
    }
}
