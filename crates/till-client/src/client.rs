use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::{ApiError, Result};

/// HTTP client for the retail API: base URL, optional bearer token, one
/// pooled agent.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl ApiClient {
    /// Unauthenticated client (login, register).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base(base_url.into()),
            token: None,
            agent: ureq::Agent::new(),
        }
    }

    /// Client carrying the cached session's bearer token.
    #[must_use]
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: trim_base(base_url.into()),
            token: Some(token.into()),
            agent: ureq::Agent::new(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn prepare(&self, request: ureq::Request) -> ureq::Request {
        let request = request.set("Accept", "application/json");
        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    pub(crate) fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .prepare(self.agent.get(&url))
            .call()
            .map_err(ApiError::from_ureq)?;
        Ok(response.into_json::<T>()?)
    }

    pub(crate) fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .prepare(self.agent.post(&url))
            .send_json(body)
            .map_err(ApiError::from_ureq)?;
        Ok(response.into_json::<T>()?)
    }

    pub(crate) fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let response = self
            .prepare(self.agent.put(&url))
            .send_json(body)
            .map_err(ApiError::from_ureq)?;
        Ok(response.into_json::<T>()?)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::ApiClient;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:4000/api/");
        assert_eq!(client.base_url(), "http://localhost:4000/api");
        assert_eq!(client.url("/products"), "http://localhost:4000/api/products");
    }

    #[test]
    fn with_token_keeps_base_url() {
        let client = ApiClient::with_token("http://localhost:4000/api", "tok");
        assert_eq!(client.base_url(), "http://localhost:4000/api");
    }
}
