//! Placeholder analysis for demonstrations
//!
//! Demo reports are produced only on explicit request. They never pass
//! through the submitter, so they can never be mistaken for a webhook reply
//! or change the connection flag.

use rand::Rng;

use super::result::AnalysisReport;

const DEMO_CLAUSE_TYPES: [&str; 3] = ["Liability", "Termination", "Payment Terms"];

const DEMO_RECOMMENDATIONS: [&str; 3] = [
    "Review liability clause for excessive risk exposure",
    "Consider adding force majeure provisions",
    "Clarify payment terms and late fees",
];

/// A report that was made up locally
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub report: AnalysisReport,
}

impl DemoReport {
    pub const LABEL: &'static str = "DEMO";
}

pub fn demo_report() -> DemoReport {
    demo_report_with(&mut rand::rng())
}

pub fn demo_report_with<R: Rng + ?Sized>(rng: &mut R) -> DemoReport {
    DemoReport {
        report: AnalysisReport {
            risk_score: Some(rng.random_range(0..100)),
            issues_detected: Some(rng.random_range(1..=10)),
            clause_types: DEMO_CLAUSE_TYPES.iter().map(|s| s.to_string()).collect(),
            recommendations: DEMO_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_demo_report_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let demo = demo_report_with(&mut rng);
            let score = demo.report.risk_score.unwrap();
            let issues = demo.report.issues_detected.unwrap();
            assert!(score < 100);
            assert!((1..=10).contains(&issues));
            assert_eq!(demo.report.clause_types.len(), 3);
            assert_eq!(demo.report.recommendations.len(), 3);
        }
    }
}
