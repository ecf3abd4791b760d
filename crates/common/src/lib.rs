pub mod metrics;
pub mod types;
pub mod utils;

pub use metrics::ApiMetrics;
pub use types::{HealthReport, ServiceKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_kinds_have_distinct_ports() {
        let ports = [
            ServiceKind::Voters.default_port(),
            ServiceKind::Polls.default_port(),
            ServiceKind::Votes.default_port(),
        ];
        assert_eq!(ports, [1080, 1090, 1100]);
        assert_eq!(ServiceKind::Polls.name(), "polls");
    }
}
