//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::LocationRecord;

/// JSON formatter - outputs the record as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Location record as JSON"
    }

    fn format(&self, record: &LocationRecord) -> Result<String> {
        Ok(serde_json::to_string_pretty(record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let record = LocationRecord {
            ip: "8.8.8.8".to_string(),
            region: "California".to_string(),
            timezone: "-08:00".to_string(),
            country: "US".to_string(),
            latitude: 37.4,
            longitude: -122.1,
            provider_name: "Google".to_string(),
        };

        let output = JsonFormatter.format(&record).unwrap();
        let parsed: LocationRecord = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, record);
    }
}
