//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::LocationRecord;

/// Text formatter - the summary card as aligned lines
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable summary"
    }

    fn format(&self, record: &LocationRecord) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("IP Address: {}\n", record.ip));
        output.push_str(&format!("Location:   {}\n", record.region));
        output.push_str(&format!("Timezone:   UTC {}\n", record.timezone));
        output.push_str(&format!("Provider:   {}\n", record.provider_name));
        output.push_str(&format!("Country:    {} ({})\n", record.country, record.flag_url()));
        output.push_str(&format!(
            "Position:   ({:.4}, {:.4})",
            record.latitude, record.longitude
        ));

        Ok(output)
    }
}
