//! Session lifecycle management.
//!
//! [`Session`] is the explicit context object the rest of the crate hangs off:
//! it owns the HTTP client (with the cookie jar that carries the opaque
//! refresh credential), the in-memory credential store, the pending-refresh
//! slot, and the logout event channel. It exposes sign-in, sign-out,
//! registration, and the pure session-state read used for UI gating.
//!
//! State machine: Anonymous -> Authenticating -> Authenticated -> Anonymous.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::api::error::ApiError;
use crate::api::gateway::Gateway;
use crate::config::Config;

use super::refresh::RefreshFuture;
use super::store::{CredentialStore, Identity};

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Capacity of the logout event channel. Consumers are expected to drain
/// promptly; lagging receivers only lose older notifications.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// `logout()` was called.
    UserRequested,
    /// The refresh credential was rejected; the session cannot be recovered.
    SessionExpired,
}

/// Events emitted by the session lifecycle. Consumers (routing, UI) subscribe
/// via [`Session::subscribe`] instead of the core calling into them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedOut { reason: LogoutReason },
}

/// Snapshot of the session for UI gating.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// True only while a login call is in progress.
    pub loading: bool,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Shared session internals. The credential store and the pending-refresh
/// slot are process-wide singletons scoped to this struct's lifetime.
pub(crate) struct SessionInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) store: CredentialStore,
    pub(crate) pending: Mutex<Option<RefreshFuture>>,
    events: broadcast::Sender<SessionEvent>,
    logging_in: AtomicBool,
}

impl SessionInner {
    pub(crate) fn emit_logged_out(&self, reason: LogoutReason) {
        // Send only fails when nobody is subscribed, which is fine.
        let _ = self.events.send(SessionEvent::LoggedOut { reason });
    }
}

/// Authenticated session handle.
/// Clone is cheap - the inner state is shared behind an Arc, the same way
/// reqwest::Client shares its connection pool.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Create a session against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        // The refresh credential lives in an HTTP-managed cookie; the jar
        // replays it on /auth/refresh without the client ever seeing it.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()
            .context("Failed to create HTTP client")?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            inner: Arc::new(SessionInner {
                http,
                base_url,
                store: CredentialStore::default(),
                pending: Mutex::new(None),
                events,
                logging_in: AtomicBool::new(false),
            }),
        })
    }

    /// Create a session from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base()?)
    }

    /// The request gateway bound to this session.
    pub fn gateway(&self) -> Gateway {
        Gateway::new(Arc::clone(&self.inner))
    }

    /// Sign in with raw credentials. The bearer token is never sent here -
    /// only the form-encoded username/password pair the server expects.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        self.inner.logging_in.store(true, Ordering::SeqCst);
        let outcome = self.perform_login(email, password).await;
        self.inner.logging_in.store(false, Ordering::SeqCst);
        outcome
    }

    async fn perform_login(&self, email: &str, password: &str) -> Result<Identity> {
        let url = format!("{}/auth/login", self.inner.base_url);

        let response = self
            .inner
            .http
            .post(&url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .context("Failed to send login request")?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            return Err(ApiError::InvalidCredentials.into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body).into());
        }

        let payload: LoginResponse = response
            .json()
            .await
            .context("Failed to parse login response")?;

        let identity = Identity::new(email);
        self.inner
            .store
            .write(payload.access_token, identity.clone());
        info!(email, "Signed in");

        Ok(identity)
    }

    /// Sign out. Server-side revocation is best-effort: failures are logged
    /// and swallowed, the local session is cleared unconditionally.
    pub async fn logout(&self) {
        let url = format!("{}/auth/logout", self.inner.base_url);

        match self.inner.http.post(&url).send().await {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), "Server-side logout failed; clearing session anyway");
            }
            Err(err) => {
                warn!(error = %err, "Logout request failed; clearing session anyway");
            }
            Ok(_) => {}
        }

        self.inner.store.clear();
        self.inner.emit_logged_out(LogoutReason::UserRequested);
        info!("Signed out");
    }

    /// Create an account. Does not authenticate - the caller logs in
    /// afterwards with the new credentials.
    pub async fn register(&self, account: &NewAccount) -> Result<Identity> {
        let url = format!("{}/auth/register", self.inner.base_url);

        let response = self
            .inner
            .http
            .post(&url)
            .json(account)
            .send()
            .await
            .context("Failed to send registration request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // 409 -> RegistrationConflict, 422 -> ValidationFailed
            return Err(ApiError::from_status(status, &body).into());
        }

        Ok(Identity::new(&account.email))
    }

    /// Pure read of the current session state.
    pub fn state(&self) -> SessionState {
        SessionState {
            identity: self.inner.store.identity(),
            loading: self.inner.logging_in.load(Ordering::SeqCst),
        }
    }

    /// Subscribe to session events (forced or requested logout).
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }
}
