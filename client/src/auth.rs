use std::collections::BTreeMap;

use filmtracker_shared::{AuthResponse, RegisterRequest, User};

use crate::error::{ApiError, ErrorKind};
use crate::services::AuthService;
use crate::session::{AuthState, Session};
use crate::store::Store;

pub const INVALID_RESPONSE: &str = "Unexpected response from the server";
pub const LOGIN_FAILED: &str = "Login failed. Check your email and password.";
pub const REGISTER_FAILED: &str = "Registration failed";

/// Result of a login or registration. Exactly one of user or message.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Success(User),
    Failure {
        message: String,
        /// Server validation messages keyed by form field. Empty unless the
        /// backend rejected specific inputs.
        fields: BTreeMap<String, Vec<String>>,
    },
}

impl AuthOutcome {
    fn failure(message: impl Into<String>) -> Self {
        AuthOutcome::Failure {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthOutcome::Failure { message, .. } => Some(message),
            AuthOutcome::Success(_) => None,
        }
    }

    /// First server message for one input.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            AuthOutcome::Failure { fields, .. } => {
                fields.get(name).and_then(|m| m.first()).map(String::as_str)
            }
            AuthOutcome::Success(_) => None,
        }
    }
}

/// Login, registration and logout on top of [`Session`].
///
/// Nothing here returns `Err`: every failure is folded into
/// [`AuthOutcome::Failure`] with the best message available.
#[derive(Clone)]
pub struct AuthStore {
    session: Session,
    service: AuthService,
    pending: Store<bool>,
}

impl AuthStore {
    pub fn new(session: Session, service: AuthService) -> Self {
        Self {
            session,
            service,
            pending: Store::new(false),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `true` while a login or registration is in flight.
    pub fn pending(&self) -> &Store<bool> {
        &self.pending
    }

    pub fn state(&self) -> AuthState {
        self.session.current()
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        self.pending.set(true);
        let outcome = match self.service.login(email, password).await {
            Ok(response) => self.accept(response),
            Err(err) => {
                log::error!("login failed: {err}");
                AuthOutcome::failure(login_message(&err))
            }
        };
        self.pending.set(false);
        outcome
    }

    /// Signs up and, on success, signs in with the same response.
    pub async fn register(&self, request: &RegisterRequest) -> AuthOutcome {
        self.pending.set(true);
        let outcome = match self.service.register(request).await {
            Ok(response) => self.accept(response),
            Err(err) => {
                log::error!("registration failed: {err}");
                let fields = match err.kind() {
                    ErrorKind::Validation => err.field_errors(),
                    _ => BTreeMap::new(),
                };
                AuthOutcome::Failure {
                    message: register_message(&err),
                    fields,
                }
            }
        };
        self.pending.set(false);
        outcome
    }

    /// Local only; the backend keeps no server-side session.
    pub fn logout(&self) {
        self.session.clear();
    }

    pub fn refresh_user(&self) {
        self.session.refresh_user();
    }

    fn accept(&self, response: AuthResponse) -> AuthOutcome {
        match (response.access, response.user) {
            (Some(access), Some(user)) if !access.is_empty() => {
                self.session
                    .establish(&access, response.refresh.as_deref(), &user);
                AuthOutcome::Success(user)
            }
            _ => {
                log::error!("auth response lacks user or access token");
                AuthOutcome::failure(INVALID_RESPONSE)
            }
        }
    }
}

fn login_message(err: &ApiError) -> String {
    match err.body() {
        Some(body) => body
            .first_of(&["error", "detail", "non_field_errors"])
            .or_else(|| body.plain())
            .unwrap_or_else(|| LOGIN_FAILED.to_string()),
        None => err.to_string(),
    }
}

fn register_message(err: &ApiError) -> String {
    err.body()
        .and_then(|body| {
            body.first_of(&["email", "password", "username"])
                .or_else(|| body.plain())
        })
        .unwrap_or_else(|| REGISTER_FAILED.to_string())
}

/// Checks a sign-up form before it is sent. Empty result means valid.
pub fn validate_registration(request: &RegisterRequest) -> BTreeMap<&'static str, &'static str> {
    let mut errors = BTreeMap::new();

    let email = request.email.trim();
    if email.is_empty() {
        errors.insert("email", "Email is required.");
    } else if !looks_like_email(email) {
        errors.insert("email", "Enter a valid email address.");
    }

    if request.username.is_empty() {
        errors.insert("username", "Username is required.");
    } else if request.username.chars().count() < 3 {
        errors.insert("username", "Username must be at least 3 characters.");
    }

    if request.password.is_empty() {
        errors.insert("password", "Password is required.");
    } else if request.password.chars().count() < 6 {
        errors.insert("password", "Password must be at least 6 characters.");
    }

    if request.password2.is_empty() {
        errors.insert("password2", "Confirm your password.");
    } else if request.password != request.password2 {
        errors.insert("password2", "Passwords do not match.");
    }

    errors
}

// something@something.something, no whitespace
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;

    #[test]
    fn login_message_prefers_error_then_detail() {
        let err = ApiError::from_status(
            401,
            ErrorBody::parse(r#"{"detail": "d", "error": "Invalid credentials"}"#),
        );
        assert_eq!(login_message(&err), "Invalid credentials");

        let err = ApiError::from_status(400, ErrorBody::parse(r#"{"non_field_errors": ["nope"]}"#));
        assert_eq!(login_message(&err), "nope");

        let err = ApiError::from_status(500, ErrorBody::default());
        assert_eq!(login_message(&err), LOGIN_FAILED);

        let err = ApiError::Network("connection refused".into());
        assert_eq!(login_message(&err), "network error: connection refused");
    }

    #[test]
    fn register_message_walks_fields_in_order() {
        let err = ApiError::from_status(
            400,
            ErrorBody::parse(r#"{"username": ["u"], "password": ["p"]}"#),
        );
        assert_eq!(register_message(&err), "p");

        let err = ApiError::from_status(400, ErrorBody::parse("Closed for signups"));
        assert_eq!(register_message(&err), "Closed for signups");

        assert_eq!(register_message(&ApiError::Network("x".into())), REGISTER_FAILED);
    }

    fn form(email: &str, username: &str, password: &str, password2: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            password2: password2.into(),
        }
    }

    #[test]
    fn valid_registration_has_no_errors() {
        let errors = validate_registration(&form("a@b.io", "ripley", "nostromo", "nostromo"));
        assert!(errors.is_empty());
    }

    #[test]
    fn registration_checks_each_field() {
        let errors = validate_registration(&form("not-an-email", "al", "12345", "54321"));
        assert_eq!(errors["email"], "Enter a valid email address.");
        assert_eq!(errors["username"], "Username must be at least 3 characters.");
        assert_eq!(errors["password"], "Password must be at least 6 characters.");
        assert_eq!(errors["password2"], "Passwords do not match.");

        let errors = validate_registration(&form("", "", "", ""));
        assert_eq!(errors.len(), 4);
        assert_eq!(errors["password2"], "Confirm your password.");
    }

    #[test]
    fn email_needs_a_dotted_domain() {
        assert!(looks_like_email("x@y.z"));
        assert!(!looks_like_email("x@y"));
        assert!(!looks_like_email("@y.z"));
        assert!(!looks_like_email("x y@z.io"));
    }
}
