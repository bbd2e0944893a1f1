use crate::analysis::models::ProfessionAnalysis;

/// Shares may drift this far from 100 before a warning is raised.
const SHARE_SUM_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// JSON path of the offending field, e.g. `subfields[2].riskScore`.
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Hard failures. Any entry makes the analysis unusable.
    pub issues: Vec<ValidationIssue>,
    /// Convention breaches that are logged but tolerated.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    fn issue(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field: field.into(),
            reason: reason.into(),
        });
    }

    fn warn(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            field: field.into(),
            reason: reason.into(),
        });
    }

    fn check_percentage(&mut self, field: String, value: f64) {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            self.issue(field, format!("must be within 0-100, got {value}"));
        }
    }
}

/// Post-parse checks the provider's schema support does not guarantee.
///
/// FAIL conditions:
/// - `timeline`, `subfields` or `skillsToSurvive` is empty
/// - any score or share outside [0, 100]
/// - timeline years not strictly increasing
///
/// WARN conditions:
/// - `humanShare + aiShare` not ~100
pub fn validate_analysis(analysis: &ProfessionAnalysis) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.check_percentage("overallRiskScore".to_string(), analysis.overall_risk_score);

    if analysis.timeline.is_empty() {
        report.issue("timeline", "must contain at least one point");
    }
    if analysis.subfields.is_empty() {
        report.issue("subfields", "must contain at least one subfield");
    }
    if analysis.skills_to_survive.is_empty() {
        report.issue("skillsToSurvive", "must contain at least one skill");
    }

    let mut previous_year: Option<i32> = None;
    for (i, point) in analysis.timeline.iter().enumerate() {
        report.check_percentage(format!("timeline[{i}].humanShare"), point.human_share);
        report.check_percentage(format!("timeline[{i}].aiShare"), point.ai_share);

        if let Some(prev) = previous_year {
            if point.year <= prev {
                report.issue(
                    format!("timeline[{i}].year"),
                    format!("years must be strictly increasing ({} after {prev})", point.year),
                );
            }
        }
        previous_year = Some(point.year);

        let sum = point.human_share + point.ai_share;
        if sum.is_finite() && (sum - 100.0).abs() > SHARE_SUM_TOLERANCE {
            report.warn(
                format!("timeline[{i}]"),
                format!("humanShare + aiShare = {sum}, expected 100"),
            );
        }
    }

    for (i, subfield) in analysis.subfields.iter().enumerate() {
        report.check_percentage(format!("subfields[{i}].riskScore"), subfield.risk_score);
    }

    report
}
