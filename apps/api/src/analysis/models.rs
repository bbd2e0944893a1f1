//! Typed shape of a profession forecast as returned by the generative model.

use serde::{Deserialize, Deserializer, Serialize};

/// How AI exposure plays out within a subfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomationType {
    /// AI assists humans.
    Augmentation,
    /// AI substitutes for humans.
    Replacement,
    /// AI creates new task categories.
    #[serde(rename = "New Creation")]
    NewCreation,
}

impl AutomationType {
    pub const ALL: [AutomationType; 3] = [
        AutomationType::Augmentation,
        AutomationType::Replacement,
        AutomationType::NewCreation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AutomationType::Augmentation => "Augmentation",
            AutomationType::Replacement => "Replacement",
            AutomationType::NewCreation => "New Creation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    pub const ALL: [Relevance; 3] = [Relevance::High, Relevance::Medium, Relevance::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Relevance::High => "High",
            Relevance::Medium => "Medium",
            Relevance::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Technical,
    #[serde(rename = "Soft Skill")]
    SoftSkill,
    Strategic,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 3] = [
        SkillCategory::Technical,
        SkillCategory::SoftSkill,
        SkillCategory::Strategic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical",
            SkillCategory::SoftSkill => "Soft Skill",
            SkillCategory::Strategic => "Strategic",
        }
    }
}

/// One point on the human/AI task-share curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDataPoint {
    #[serde(deserialize_with = "integral_year")]
    pub year: i32,
    pub human_share: f64,
    pub ai_share: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubfieldAnalysis {
    pub name: String,
    pub risk_score: f64,
    pub impact_description: String,
    pub automation_type: AutomationType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecommendation {
    pub skill: String,
    pub relevance: Relevance,
    pub category: SkillCategory,
}

/// Root forecast record. Built fresh per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionAnalysis {
    pub job_title: String,
    pub summary: String,
    pub overall_risk_score: f64,
    pub timeline: Vec<TimelineDataPoint>,
    pub subfields: Vec<SubfieldAnalysis>,
    pub skills_to_survive: Vec<SkillRecommendation>,
}

/// The schema declares `year` as a number, so the model occasionally emits
/// `2030.0`. Accept any integral value; reject fractions.
fn integral_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.fract() != 0.0 || raw < f64::from(i32::MIN) || raw > f64::from(i32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "year must be an integer, got {raw}"
        )));
    }
    Ok(raw as i32)
}
