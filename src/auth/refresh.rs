//! Single-flight credential refresh.
//!
//! Many callers may discover an expired credential at the same time; exactly
//! one `POST /auth/refresh` must go out while every caller waits on its
//! outcome. The pending-refresh slot holds a shared future: the first caller
//! to find the slot empty installs one, later callers clone it and await.
//! The slot check-and-set happens under a synchronous lock with no await in
//! between, so two concurrent first-callers cannot both install a handle.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::api::error::{extract_detail, ApiError};

use super::session::{LogoutReason, SessionInner};

/// The Pending Refresh Handle: a shared future every waiter can clone.
/// At most one exists per session at any instant.
pub(crate) type RefreshFuture = Shared<BoxFuture<'static, Result<String, RefreshError>>>;

/// Refresh failure. Clone because the value fans out through the shared
/// future to every waiter.
#[derive(Debug, Clone, Error)]
pub(crate) enum RefreshError {
    #[error("refresh rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("refresh transport failure: {0}")]
    Transport(String),
}

impl From<RefreshError> for ApiError {
    fn from(err: RefreshError) -> Self {
        ApiError::RefreshFailed(err.to_string())
    }
}

/// Get the shared future for the current refresh, starting one if none is in
/// flight. Awaiting the returned handle yields the renewed credential.
///
/// Whatever the outcome, the refresh body writes the store, emits the forced
/// logout event on failure, and resets the slot so a later 401 starts fresh.
pub(crate) fn ensure_fresh_credential(inner: &Arc<SessionInner>) -> RefreshFuture {
    let mut pending = inner.pending.lock();

    if let Some(handle) = pending.as_ref() {
        debug!("Attaching to in-flight credential refresh");
        return handle.clone();
    }

    let owner = Arc::clone(inner);
    let handle: RefreshFuture = async move {
        let outcome = perform_refresh(&owner).await;

        match &outcome {
            Ok(credential) => {
                owner.store.set_credential(credential.clone());
                info!("Access credential refreshed");
            }
            Err(err) => {
                error!(error = %err, "Credential refresh failed; forcing sign-out");
                owner.store.clear();
                owner.emit_logged_out(LogoutReason::SessionExpired);
            }
        }

        // Destroy the handle now that the operation settled. Waiters that
        // already attached keep their own clone of this future.
        *owner.pending.lock() = None;

        outcome
    }
    .boxed()
    .shared();

    *pending = Some(handle.clone());
    handle
}

async fn perform_refresh(inner: &SessionInner) -> Result<String, RefreshError> {
    #[derive(Deserialize)]
    struct RefreshResponse {
        access_token: String,
    }

    let url = format!("{}/auth/refresh", inner.base_url);
    debug!("Requesting credential refresh");

    // No body: the refresh credential rides in the HTTP-managed cookie.
    let response = inner
        .http
        .post(&url)
        .send()
        .await
        .map_err(|err| RefreshError::Transport(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RefreshError::Rejected {
            status: status.as_u16(),
            detail: extract_detail(&body),
        });
    }

    let payload: RefreshResponse = response
        .json()
        .await
        .map_err(|err| RefreshError::Transport(err.to_string()))?;

    Ok(payload.access_token)
}
