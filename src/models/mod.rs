//! Data models for platform entities.
//!
//! - `Project`, `NewProject`: project payloads
//! - `Site`, `NewSite`, `SiteCollection`: sites and their GeoJSON exchange
//! - `SiteAnalytics`, `MetricPoint`: monthly environmental time series

pub mod analytics;
pub mod project;
pub mod site;

pub use analytics::{MetricPoint, SiteAnalytics};
pub use project::{NewProject, Project};
pub use site::{NewSite, Site, SiteCollection, SiteFeature, SiteProperties};
