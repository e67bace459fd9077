use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One monthly sample of a site metric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Time-series analytics for a site: carbon sequestration (tons/month) and a
/// biodiversity index, sampled monthly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteAnalytics {
    #[serde(default)]
    pub carbon: Vec<MetricPoint>,
    #[serde(default)]
    pub biodiversity_index: Vec<MetricPoint>,
}

impl SiteAnalytics {
    /// Most recent carbon sample, for headline figures.
    pub fn latest_carbon(&self) -> Option<&MetricPoint> {
        self.carbon.last()
    }

    /// Most recent biodiversity sample.
    pub fn latest_biodiversity(&self) -> Option<&MetricPoint> {
        self.biodiversity_index.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analytics_series() {
        let json = r#"{
            "carbon": [
                {"date": "2025-06-01", "value": 12.4},
                {"date": "2025-07-01", "value": 13.1}
            ],
            "biodiversity_index": [
                {"date": "2025-06-01", "value": 0.61},
                {"date": "2025-07-01", "value": 0.64}
            ]
        }"#;

        let analytics: SiteAnalytics = serde_json::from_str(json).unwrap();
        assert_eq!(analytics.carbon.len(), 2);
        assert_eq!(analytics.latest_carbon().unwrap().value, 13.1);
        assert_eq!(analytics.latest_biodiversity().unwrap().value, 0.64);
        assert_eq!(
            analytics.carbon[0].date,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_empty_series() {
        let analytics: SiteAnalytics = serde_json::from_str("{}").unwrap();
        assert!(analytics.latest_carbon().is_none());
        assert!(analytics.latest_biodiversity().is_none());
    }
}
