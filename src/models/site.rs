use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single monitored site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Site geometry as returned by the server. Opaque here - drawing and
    /// rendering belong to an external toolkit.
    #[serde(default)]
    pub geojson: Option<Value>,
}

/// Payload for creating a site from a finished drawn geometry.
/// `geojson` is the complete GeoJSON Feature handed over by the drawing
/// surface, forwarded untouched.
#[derive(Debug, Clone, Serialize)]
pub struct NewSite {
    pub name: String,
    pub description: String,
    pub geojson: Value,
}

/// GeoJSON FeatureCollection of a project's sites.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<SiteFeature>,
}

impl SiteCollection {
    pub fn is_feature_collection(&self) -> bool {
        self.kind == "FeatureCollection"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: SiteProperties,
    #[serde(default)]
    pub geometry: Value,
}

/// Feature properties; the server labels the site id either `id` or
/// `site_id` depending on the endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteProperties {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub site_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SiteProperties {
    pub fn site_id(&self) -> Option<i64> {
        self.id.or(self.site_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"id": 5, "name": "North Plot", "description": "Mangrove stand"},
                    "geometry": {"type": "Polygon", "coordinates": [[[78.0, 9.9], [78.1, 9.9], [78.1, 10.0], [78.0, 9.9]]]}
                },
                {
                    "type": "Feature",
                    "properties": {"site_id": 6, "name": "South Plot"},
                    "geometry": {"type": "Polygon", "coordinates": []}
                }
            ]
        }"#;

        let collection: SiteCollection = serde_json::from_str(json).unwrap();
        assert!(collection.is_feature_collection());
        assert_eq!(collection.features.len(), 2);
        assert_eq!(collection.features[0].properties.site_id(), Some(5));
        assert_eq!(collection.features[1].properties.site_id(), Some(6));
        assert_eq!(
            collection.features[1].properties.name.as_deref(),
            Some("South Plot")
        );
    }

    #[test]
    fn test_new_site_wire_shape() {
        let site = NewSite {
            name: "New Site".into(),
            description: "".into(),
            geojson: serde_json::json!({
                "type": "Feature",
                "properties": {"name": "New Site"},
                "geometry": {"type": "Polygon", "coordinates": []}
            }),
        };

        let json = serde_json::to_value(&site).unwrap();
        assert_eq!(json["name"], "New Site");
        assert_eq!(json["geojson"]["type"], "Feature");
    }
}
