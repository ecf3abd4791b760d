use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Which of the three services a process is running as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Voters,
    Polls,
    Votes,
}

impl ServiceKind {
    /// Collection name, used both as the URL segment and the cache namespace.
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Voters => "voters",
            ServiceKind::Polls => "polls",
            ServiceKind::Votes => "votes",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            ServiceKind::Voters => 1080,
            ServiceKind::Polls => 1090,
            ServiceKind::Votes => 1100,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Body of `GET /<entities>/health`.
///
/// `Uptime` is whole nanoseconds since the process started.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthReport {
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "Uptime")]
    pub uptime_nanos: u64,
    #[serde(rename = "APIcalls")]
    pub api_calls: u64,
}

impl HealthReport {
    pub fn new(service: &str, uptime: Duration, api_calls: u64) -> Self {
        Self {
            service: service.to_string(),
            uptime_nanos: u64::try_from(uptime.as_nanos()).unwrap_or(u64::MAX),
            api_calls,
        }
    }

    pub fn uptime(&self) -> Duration {
        Duration::from_nanos(self.uptime_nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_collection_name() {
        assert_eq!(ServiceKind::Votes.to_string(), "votes");
        assert_eq!(format!("/{}/health", ServiceKind::Voters), "/voters/health");
    }

    #[test]
    fn health_report_uses_legacy_field_names() {
        let report = HealthReport::new("voters", Duration::from_millis(1500), 7);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["Uptime"], 1_500_000_000u64);
        assert_eq!(json["APIcalls"], 7);
        assert_eq!(json["Service"], "voters");
    }
}
