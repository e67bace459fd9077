//! Typed client for the project/site/analytics endpoints.
//!
//! Every call goes through the authenticated [`Gateway`], so domain payloads
//! here are guaranteed to carry the bearer credential and to survive one
//! transparent refresh cycle. Status mapping to [`ApiError`] happens at this
//! layer; the gateway only intercepts credential expiry.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::auth::Session;
use crate::models::{NewProject, NewSite, Project, Site, SiteAnalytics, SiteCollection};

use super::error::ApiError;
use super::gateway::{Gateway, RequestDescriptor};

/// Default analytics window in months.
pub const DEFAULT_ANALYTICS_MONTHS: u32 = 12;

/// Domain API client.
/// Clone is cheap - it shares the session's gateway.
#[derive(Clone)]
pub struct GeoClient {
    gateway: Gateway,
}

impl GeoClient {
    pub fn new(session: &Session) -> Self {
        Self {
            gateway: session.gateway(),
        }
    }

    /// Check if a response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Result<T> {
        let response = self.gateway.send(descriptor).await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse JSON response")
    }

    /// Fetch all projects visible to the session.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.fetch(RequestDescriptor::get("/geo/projects")).await
    }

    /// Create a project.
    pub async fn create_project(&self, project: &NewProject) -> Result<Project> {
        let body = serde_json::to_value(project).context("Failed to serialize project")?;
        self.fetch(RequestDescriptor::post("/geo/projects").with_json(body))
            .await
    }

    /// Fetch a project's sites as a GeoJSON FeatureCollection.
    pub async fn list_sites(&self, project_id: i64) -> Result<SiteCollection> {
        self.fetch(RequestDescriptor::get(format!(
            "/geo/projects/{}/sites",
            project_id
        )))
        .await
    }

    /// Submit a finished drawn site under a project.
    pub async fn create_site(&self, project_id: i64, site: &NewSite) -> Result<Site> {
        let body = serde_json::to_value(site).context("Failed to serialize site")?;
        self.fetch(
            RequestDescriptor::post(format!("/geo/projects/{}/sites", project_id)).with_json(body),
        )
        .await
    }

    /// Fetch a single site (name, description, geometry).
    pub async fn fetch_site(&self, site_id: i64) -> Result<Site> {
        self.fetch(RequestDescriptor::get(format!("/geo/sites/{}", site_id)))
            .await
    }

    /// Fetch a site's monthly analytics series over the trailing window.
    pub async fn fetch_site_analytics(
        &self,
        site_id: i64,
        months: u32,
    ) -> Result<SiteAnalytics> {
        self.fetch(
            RequestDescriptor::get(format!("/geo/sites/{}/analytics", site_id))
                .with_query("months", months),
        )
        .await
    }
}
