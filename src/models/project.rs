use serde::{Deserialize, Serialize};

/// A geospatial project grouping drawn sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of sites under the project; list payloads carry the aggregate,
    /// detail payloads may omit it.
    #[serde(default)]
    pub site_count: u32,
}

/// Payload for creating a project.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
}
