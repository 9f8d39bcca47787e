use filmtracker_shared::{AuthResponse, LoginRequest, RegisterRequest, User, UserStats};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::query::Query;

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.api.post("/auth/login/", &request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.api.post("/auth/register/", request).await
    }

    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.api.get("/user/stats/", &Query::new()).await
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.api.get("/user/profile/", &Query::new()).await
    }
}
