//! Consistency checks over a loaded network.

use std::collections::HashSet;

use serde::Serialize;

use super::Network;
use super::compile::SkipReason;

/// A single finding from [`audit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditIssue {
    /// The line compiled to no segments at all
    EmptyLine { line: String },
    /// Declared stations were not on the map
    SkippedStations {
        line: String,
        unknown: Vec<String>,
        excluded: Vec<String>,
    },
    /// No line runs through the station
    UnusedStation { station: String },
}

/// Errors and warnings found in a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub errors: Vec<AuditIssue>,
    pub warnings: Vec<AuditIssue>,
}

impl AuditReport {
    /// True if the network has no errors. Warnings are allowed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check every line and station of the network.
pub fn audit(network: &Network) -> AuditReport {
    let mut report = AuditReport::default();
    let mut used = HashSet::new();

    for compiled in network.lines() {
        let line = compiled.id().to_string();

        if compiled.segments().is_empty() {
            report.errors.push(AuditIssue::EmptyLine { line: line.clone() });
        }

        if !compiled.route.skipped.is_empty() {
            let (excluded, unknown): (Vec<_>, Vec<_>) = compiled
                .route
                .skipped
                .iter()
                .partition(|s| s.reason == SkipReason::Excluded);
            report.warnings.push(AuditIssue::SkippedStations {
                line,
                unknown: unknown.into_iter().map(|s| s.name.clone()).collect(),
                excluded: excluded.into_iter().map(|s| s.name.clone()).collect(),
            });
        }

        for id in compiled.segments() {
            if let Some(segment) = network.resolve_segment(id.as_str()) {
                used.insert(segment.from.clone());
                used.insert(segment.to.clone());
            }
        }
    }

    for (station, _) in network.registry().iter() {
        if !used.contains(station) {
            report.warnings.push(AuditIssue::UnusedStation {
                station: station.to_string(),
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Line, LineDisplay, LineId, LineStyle};

    fn line(id: &str, stations: &[&str]) -> Line {
        Line::new(
            LineId::parse(id).unwrap(),
            id,
            LineDisplay::new("#000", LineStyle::Solid),
            stations.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn network() -> Network {
        let mut network = Network::new();
        for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
            network.register_station(name, i as f64, 0.0).unwrap();
        }
        network
    }

    #[test]
    fn clean_network() {
        let mut network = network();
        network.add_line(line("L1", &["A", "B", "C", "D"])).unwrap();

        let report = audit(&network);
        assert!(report.is_clean());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn empty_line_is_error() {
        let mut network = network();
        network.add_line(line("L1", &["A", "B", "C", "D"])).unwrap();
        network.add_line(line("GHOST", &["X", "Y"])).unwrap();

        let report = audit(&network);
        assert!(!report.is_clean());
        assert_eq!(
            report.errors,
            vec![AuditIssue::EmptyLine {
                line: "GHOST".into()
            }]
        );
    }

    #[test]
    fn skipped_and_unused_are_warnings() {
        let mut network = network();
        network.exclude_from_routes("C").unwrap();
        network.add_line(line("L1", &["A", "Nowhere", "B", "C"])).unwrap();

        let report = audit(&network);
        assert!(report.is_clean());
        assert!(report.warnings.contains(&AuditIssue::SkippedStations {
            line: "L1".into(),
            unknown: vec!["Nowhere".into()],
            excluded: vec!["C".into()],
        }));
        assert!(report.warnings.contains(&AuditIssue::UnusedStation {
            station: "D".into()
        }));
        assert!(report.warnings.contains(&AuditIssue::UnusedStation {
            station: "C".into()
        }));
    }
}
