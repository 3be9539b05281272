//! Current date and time

use crate::error::Result;
use crate::tools::{Tool, ToolExample};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};

/// Clock tool; the input is ignored
pub struct NowTool;

impl NowTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NowTool {
    fn default() -> Self {
        Self::new()
    }
}

/// ISO-8601 local date-time with seconds precision
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[async_trait]
impl Tool for NowTool {
    fn name(&self) -> &str {
        "now"
    }

    fn description(&self) -> &str {
        "Returns the current local date and time in ISO-8601 format. \
         Use this when the user asks what day or time it is. The input is ignored."
    }

    async fn execute(&self, _input: &str) -> Result<String> {
        Ok(format_timestamp(&Local::now()))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample::new(
            "Current time",
            "",
            "2025-01-31T14:05:09",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_timestamp() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_timestamp(&time), "2024-03-09T07:05:01");
    }

    #[tokio::test]
    async fn test_execute_returns_seconds_precision() {
        let output = NowTool::new().execute("anything").await.unwrap();
        assert_eq!(output.len(), "2024-03-09T07:05:01".len());
        assert!(chrono::NaiveDateTime::parse_from_str(&output, "%Y-%m-%dT%H:%M:%S").is_ok());
    }
}
