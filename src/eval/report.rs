//! Turns layer verdicts into user-facing messages and the permit row table.
//!
//! Polarity differs per layer: landing inside a conservation area or an
//! issued permit is a problem, landing inside the 12-mile zone or a
//! sedimentation priority area is the desired outcome.

use crate::models::{LayerKind, LayerVerdict, MatchedRow, Severity};

/// One report line.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

/// The aggregated run report, in layer evaluation order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub messages: Vec<Message>,
    /// Permit rows (id, NO_KKPRL, NAMA_SUBJ) when the KKPRL layer matched.
    pub kkprl_rows: Option<Vec<MatchedRow>>,
}

/// Build the report. Verdicts arrive in evaluation order and absent layers
/// never produced a verdict, so the report omits them naturally.
pub fn report(verdicts: &[LayerVerdict]) -> Report {
    let mut out = Report::default();

    for verdict in verdicts {
        let labels = verdict.matched_labels.join(", ");
        let n = verdict.match_count;

        let message = match (verdict.kind, verdict.matched) {
            (LayerKind::Conservation, true) => Message {
                severity: Severity::Warning,
                text: if labels.is_empty() {
                    format!("{n} coordinate(s) inside a conservation area")
                } else {
                    format!("{n} coordinate(s) inside conservation area {labels}")
                },
            },
            (LayerKind::Conservation, false) => Message {
                severity: Severity::Success,
                text: "No coordinates inside a conservation area".to_string(),
            },
            (LayerKind::TwelveMile, true) => Message {
                severity: Severity::Success,
                text: if labels.is_empty() {
                    format!("{n} coordinate(s) inside the 12-nautical-mile zone")
                } else {
                    format!("{n} coordinate(s) inside the 12-nautical-mile zone, province: {labels}")
                },
            },
            (LayerKind::TwelveMile, false) => Message {
                severity: Severity::Warning,
                text: "Coordinates outside the 12-nautical-mile zone".to_string(),
            },
            (LayerKind::Kkprl, true) => Message {
                severity: Severity::Warning,
                text: format!("{n} coordinate(s) overlap an issued KKPRL permit"),
            },
            (LayerKind::Kkprl, false) => Message {
                severity: Severity::Success,
                text: "No overlap with issued KKPRL permits".to_string(),
            },
            (LayerKind::Sedimentation, true) => Message {
                severity: Severity::Success,
                text: format!("{n} coordinate(s) inside a sedimentation priority area"),
            },
            (LayerKind::Sedimentation, false) => Message {
                severity: Severity::Warning,
                text: "Coordinates outside sedimentation priority areas".to_string(),
            },
        };
        out.messages.push(message);

        if verdict.kind == LayerKind::Kkprl && verdict.matched {
            out.kkprl_rows = Some(verdict.matched_rows.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LayerVerdict;

    fn matched(kind: LayerKind, labels: &[&str]) -> LayerVerdict {
        LayerVerdict {
            kind,
            matched: true,
            match_count: labels.len().max(1),
            matched_labels: labels.iter().map(|s| s.to_string()).collect(),
            matched_rows: vec![MatchedRow {
                id: "1".to_string(),
                attributes: vec![],
            }],
        }
    }

    #[test]
    fn test_conservation_match_is_warning() {
        let rep = report(&[matched(LayerKind::Conservation, &["Area X"])]);
        assert_eq!(rep.messages.len(), 1);
        assert_eq!(rep.messages[0].severity, Severity::Warning);
        assert!(rep.messages[0].text.contains("Area X"));
    }

    #[test]
    fn test_twelve_mile_polarity_inverted() {
        let rep = report(&[
            matched(LayerKind::TwelveMile, &["Jawa Barat"]),
            LayerVerdict::unmatched(LayerKind::Conservation),
        ]);
        assert_eq!(rep.messages[0].severity, Severity::Success);
        assert_eq!(rep.messages[1].severity, Severity::Success);

        let rep = report(&[LayerVerdict::unmatched(LayerKind::TwelveMile)]);
        assert_eq!(rep.messages[0].severity, Severity::Warning);
    }

    #[test]
    fn test_label_less_match_has_no_dangling_label_clause() {
        let rep = report(&[matched(LayerKind::TwelveMile, &[])]);
        assert_eq!(rep.messages[0].severity, Severity::Success);
        assert!(!rep.messages[0].text.contains("province"));
        assert!(!rep.messages[0].text.ends_with(' '));

        let rep = report(&[matched(LayerKind::Conservation, &[])]);
        assert!(!rep.messages[0].text.ends_with(' '));
    }

    #[test]
    fn test_kkprl_match_produces_table() {
        let rep = report(&[matched(LayerKind::Kkprl, &["KKPRL-001"])]);
        assert_eq!(rep.messages[0].severity, Severity::Warning);
        assert!(rep.kkprl_rows.is_some());

        let rep = report(&[LayerVerdict::unmatched(LayerKind::Kkprl)]);
        assert!(rep.kkprl_rows.is_none());
    }

    #[test]
    fn test_sedimentation_match_is_success() {
        let rep = report(&[matched(LayerKind::Sedimentation, &[])]);
        assert_eq!(rep.messages[0].severity, Severity::Success);

        let rep = report(&[LayerVerdict::unmatched(LayerKind::Sedimentation)]);
        assert_eq!(rep.messages[0].severity, Severity::Warning);
    }

    #[test]
    fn test_no_verdicts_no_messages() {
        let rep = report(&[]);
        assert!(rep.messages.is_empty());
        assert!(rep.kkprl_rows.is_none());
    }
}
