//! Derived dashboard figures. Pure functions over a finished forecast.

use serde::{Deserialize, Serialize};

use crate::analysis::models::{AutomationType, ProfessionAnalysis, SkillCategory};
use crate::analysis::prompts::outlook_label;

/// Risk band shown next to the automation-probability gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Low up to 30, Moderate up to 70, High above.
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            RiskLevel::High
        } else if score > 30.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount<T> {
    pub kind: T,
    pub count: usize,
}

/// What the dashboard renders: the forecast plus figures derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastView {
    pub analysis: ProfessionAnalysis,
    pub risk_level: RiskLevel,
    pub risk_label: String,
    /// e.g. "2024-2034"
    pub outlook: String,
    pub ai_share_start: Option<f64>,
    pub ai_share_end: Option<f64>,
    pub automation_mix: Vec<CategoryCount<AutomationType>>,
    pub skill_mix: Vec<CategoryCount<SkillCategory>>,
}

impl ForecastView {
    pub fn from_analysis(analysis: ProfessionAnalysis) -> Self {
        let risk_level = RiskLevel::from_score(analysis.overall_risk_score);

        let automation_mix = AutomationType::ALL
            .iter()
            .map(|&kind| CategoryCount {
                kind,
                count: analysis
                    .subfields
                    .iter()
                    .filter(|s| s.automation_type == kind)
                    .count(),
            })
            .collect();

        let skill_mix = SkillCategory::ALL
            .iter()
            .map(|&kind| CategoryCount {
                kind,
                count: analysis
                    .skills_to_survive
                    .iter()
                    .filter(|s| s.category == kind)
                    .count(),
            })
            .collect();

        Self {
            risk_level,
            risk_label: risk_level.label().to_string(),
            outlook: outlook_label(),
            ai_share_start: analysis.timeline.first().map(|p| p.ai_share),
            ai_share_end: analysis.timeline.last().map(|p| p.ai_share),
            automation_mix,
            skill_mix,
            analysis,
        }
    }
}
