//! Structured-output schema handed to Gemini alongside the forecast prompt.
//!
//! Written in the provider's OpenAPI-subset dialect (upper-case type names).
//! Field names and enum values must stay in lockstep with `analysis::models`.

use serde_json::{json, Value};

use crate::analysis::models::{AutomationType, Relevance, SkillCategory};

/// Builds the response schema for a `ProfessionAnalysis`.
pub fn response_schema() -> Value {
    let automation_types: Vec<&str> = AutomationType::ALL.iter().map(|t| t.as_str()).collect();
    let relevances: Vec<&str> = Relevance::ALL.iter().map(|r| r.as_str()).collect();
    let categories: Vec<&str> = SkillCategory::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "jobTitle": { "type": "STRING" },
            "summary": {
                "type": "STRING",
                "description": "A comprehensive 2-3 sentence summary of the future outlook."
            },
            "overallRiskScore": {
                "type": "NUMBER",
                "description": "A score from 0 to 100 indicating the risk of job displacement by AI."
            },
            "timeline": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "year": { "type": "INTEGER" },
                        "humanShare": {
                            "type": "NUMBER",
                            "description": "Percentage of value/work contributed by humans (0-100)"
                        },
                        "aiShare": {
                            "type": "NUMBER",
                            "description": "Percentage of value/work contributed by AI (0-100)"
                        },
                        "description": {
                            "type": "STRING",
                            "description": "Short note on the tech advancement this year"
                        }
                    },
                    "required": ["year", "humanShare", "aiShare"]
                }
            },
            "subfields": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "riskScore": { "type": "NUMBER", "description": "0-100 risk score" },
                        "impactDescription": { "type": "STRING" },
                        "automationType": { "type": "STRING", "enum": automation_types }
                    },
                    "required": ["name", "riskScore", "impactDescription", "automationType"]
                }
            },
            "skillsToSurvive": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "skill": { "type": "STRING" },
                        "relevance": { "type": "STRING", "enum": relevances },
                        "category": { "type": "STRING", "enum": categories }
                    },
                    "required": ["skill", "relevance", "category"]
                }
            }
        },
        "required": [
            "jobTitle",
            "summary",
            "overallRiskScore",
            "timeline",
            "subfields",
            "skillsToSurvive"
        ]
    })
}
