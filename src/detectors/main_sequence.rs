//! Distance from the main sequence
//!
//! On the `(A, I)` plane, well-placed files sit near `A + I = 1`. Far
//! below it is the zone of pain (concrete and leaned-on); far above it is
//! the zone of uselessness (abstract and ignored).

use crate::config::Config;
use crate::detectors::base::{AnalysisContext, Detector};
use crate::detectors::martin::file_metrics;
use crate::detectors::thresholds;
use crate::models::{Finding, Severity};
use anyhow::Result;

pub struct MainSequenceDetector {
    distance_threshold: f64,
    min_coupling: usize,
}

impl MainSequenceDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            distance_threshold: config.ratio_threshold(
                "distance-from-main-sequence",
                thresholds::MAIN_SEQUENCE_DISTANCE,
            ),
            min_coupling: thresholds::MIN_COUPLING,
        }
    }
}

impl Detector for MainSequenceDetector {
    fn name(&self) -> &'static str {
        "distance-from-main-sequence"
    }

    fn description(&self) -> &'static str {
        "Finds files deep in the zone of pain or zone of uselessness"
    }

    fn detect(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for node in &ctx.files.nodes {
            let m = file_metrics(ctx, &node.path);
            if m.coupling() < self.min_coupling {
                continue;
            }
            let Some(abstractness) = m.abstractness else {
                continue;
            };
            let Some(distance) = m.distance() else {
                continue;
            };
            if distance < self.distance_threshold {
                continue;
            }

            // Below the main sequence: concrete and stable (pain).
            // Above it: abstract and unstable (uselessness).
            let (severity, zone) = if abstractness + m.instability - 1.0 < 0.0 {
                (Severity::Warning, "zone of pain")
            } else {
                (Severity::Info, "zone of uselessness")
            };
            findings.push(
                Finding::new(
                    self.name(),
                    severity,
                    format!(
                        "D = {:.2} from the main sequence ({}; A = {:.2}, I = {:.2})",
                        distance, zone, abstractness, m.instability
                    ),
                )
                .with_file(node.path.clone()),
            );
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::Fixture;

    #[test]
    fn test_zone_of_pain_is_warning() {
        // Core: concrete (A=0), stable (I=0), three dependents -> D=1
        let fx = Fixture::from_sources(&[
            ("A.swift", "import Core\n"),
            ("B.swift", "import Core\n"),
            ("C.swift", "import Core\n"),
            ("Core.swift", "struct Engine {}\n"),
        ]);
        let findings = MainSequenceDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        let core = findings
            .iter()
            .find(|f| f.file.as_deref() == Some("Core.swift"))
            .unwrap();
        assert_eq!(core.severity, Severity::Warning);
        assert!(core.message.contains("zone of pain"));
    }

    #[test]
    fn test_zone_of_uselessness_is_info() {
        // Shapes: all protocols (A=1), imports three modules and nobody
        // imports it (I=1) -> D=1
        let fx = Fixture::from_sources(&[
            ("B.swift", ""),
            ("C.swift", ""),
            ("D.swift", ""),
            ("Shapes.swift", "import B\nimport C\nimport D\nprotocol P {}\n"),
        ]);
        let findings = MainSequenceDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        let shapes = findings
            .iter()
            .find(|f| f.file.as_deref() == Some("Shapes.swift"))
            .unwrap();
        assert_eq!(shapes.severity, Severity::Info);
        assert!(shapes.message.contains("zone of uselessness"));
    }

    #[test]
    fn test_on_sequence_file_is_silent() {
        // Mixed: A=0.5 and I=0.5 -> D=0
        let fx = Fixture::from_sources(&[
            ("A.swift", "import Mixed\nimport Util\n"),
            ("Mixed.swift", "import B\nimport C\nprotocol P {}\nstruct S {}\n"),
            ("B.swift", ""),
            ("C.swift", ""),
            ("Util.swift", ""),
        ]);
        let findings = MainSequenceDetector::new(&Config::default())
            .detect(&fx.ctx())
            .unwrap();
        assert!(!findings.iter().any(|f| f.file.as_deref() == Some("Mixed.swift")));
    }
}
