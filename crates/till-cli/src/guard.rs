//! Session gating for protected commands.
//!
//! Every guarded command opens a [`Page`] first: one read of the cached
//! session through the canonical store, one authenticated client built from
//! it. An absent session fails the command before anything else runs — the
//! CLI analogue of redirecting to the login page.

use till_client::{ApiClient, ApiError};
use till_core::config;
use till_core::session::{Session, SessionError, SessionStore};

/// What a guarded command gets to work with: its identity and its client.
pub struct Page {
    pub session: Session,
    pub client: ApiClient,
}

/// Failures opening a page, each mapping onto one error code at the top.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error(transparent)]
    Unauthenticated(ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

/// Require a cached session and build the authenticated client.
pub fn require_session() -> Result<Page, GuardError> {
    let store = SessionStore::open_default();
    let state = store.check()?;
    let session = match state {
        till_core::session::SessionState::Present(session) => session,
        till_core::session::SessionState::Absent => {
            return Err(GuardError::Unauthenticated(ApiError::Unauthenticated));
        }
    };

    let api_url = config::resolve_api_url()?;
    let client = ApiClient::with_token(api_url, session.token.clone());
    Ok(Page { session, client })
}

/// Build an unauthenticated client (login, register).
pub fn anonymous_client() -> Result<ApiClient, GuardError> {
    let api_url = config::resolve_api_url()?;
    Ok(ApiClient::new(api_url))
}
