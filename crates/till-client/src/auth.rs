//! `POST /auth/login` and `POST /auth/register`.

use serde::{Deserialize, Serialize};
use till_core::model::{NewEmployee, Role};
use till_core::session::Session;

use crate::{ApiClient, Result};

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Success body of both auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl AuthResponse {
    /// The session record the store caches on successful login.
    #[must_use]
    pub fn into_session(self) -> Session {
        Session {
            id: self.id,
            username: self.username,
            role: self.role,
            token: self.token,
        }
    }
}

impl ApiClient {
    pub fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        self.post_json("/auth/login", &LoginBody { username, password })
    }

    pub fn register(&self, body: &NewEmployee) -> Result<AuthResponse> {
        self.post_json("/auth/register", body)
    }
}
