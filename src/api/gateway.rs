//! Authenticated request gateway.
//!
//! Every outbound domain call goes through [`Gateway::send`]: the current
//! credential is read from the store per call (never captured), attached as a
//! bearer header, and a 401 response triggers one coordinated refresh
//! followed by exactly one replay of the original request. Transport errors
//! propagate unchanged and never enter the refresh path.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Method, Response, StatusCode};
use tracing::debug;

use crate::api::error::ApiError;
use crate::auth::refresh::ensure_fresh_credential;
use crate::auth::session::SessionInner;

/// An outbound request, rebuildable for the one permitted replay.
///
/// The `retried` flag transitions false -> true at most once; a descriptor
/// that has been replayed is never replayed again.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl RequestDescriptor {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn retried(&self) -> bool {
        self.retried
    }
}

/// Request gateway bound to one session.
/// Clone is cheap - it shares the session internals behind an Arc.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<SessionInner>,
}

impl Gateway {
    pub(crate) fn new(inner: Arc<SessionInner>) -> Self {
        Self { inner }
    }

    /// Dispatch a request with the current credential attached, recovering
    /// from one credential expiry along the way.
    ///
    /// Responses other than 401 are returned unchanged, whatever their
    /// status; mapping to the error taxonomy is the caller's concern.
    pub async fn send(&self, mut descriptor: RequestDescriptor) -> Result<Response> {
        let response = self.dispatch(&descriptor).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        if descriptor.retried {
            // Already replayed once; no further recovery.
            return Err(ApiError::Unauthorized.into());
        }

        debug!(path = %descriptor.path, "Credential rejected, refreshing before replay");
        ensure_fresh_credential(&self.inner)
            .await
            .map_err(ApiError::from)?;

        descriptor.retried = true;
        let replay = self.dispatch(&descriptor).await?;
        if replay.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized.into());
        }

        Ok(replay)
    }

    async fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<Response> {
        let url = format!("{}{}", self.inner.base_url, descriptor.path);
        let mut request = self.inner.http.request(descriptor.method.clone(), &url);

        if !descriptor.query.is_empty() {
            request = request.query(&descriptor.query);
        }
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }
        // Read the store on every dispatch so a replay sees the renewed
        // credential and never a stale capture.
        if let Some(credential) = self.inner.store.read() {
            request = request.bearer_auth(credential);
        }

        request
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to {}", descriptor.method, url))
    }
}
