//! Sends the forecast prompt to Gemini once and returns the validated result.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::analysis::models::ProfessionAnalysis;
use crate::analysis::prompts::build_prompt;
use crate::analysis::schema::response_schema;
use crate::analysis::validation::{validate_analysis, ValidationIssue};
use crate::llm_client::{strip_json_fences, ContentGenerator, GenerateRequest, LlmError, MODEL};

/// Shown when a provider failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong during analysis.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No response received from AI")]
    EmptyResponse,

    /// Never carries the raw payload; that goes to the log only.
    #[error("Failed to parse AI analysis")]
    Parse,

    #[error("AI analysis failed validation: {}", describe_issues(.0))]
    Invalid(Vec<ValidationIssue>),

    #[error("{0}")]
    Provider(String),
}

impl From<LlmError> for AnalysisError {
    fn from(err: LlmError) -> Self {
        let message = err.provider_message();
        if message.is_empty() {
            AnalysisError::Provider(FALLBACK_ERROR_MESSAGE.to_string())
        } else {
            AnalysisError::Provider(message)
        }
    }
}

fn describe_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{} {}", i.field, i.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Single-attempt forecast client. Holds no per-call state: identical inputs
/// always trigger a fresh provider request.
#[derive(Clone)]
pub struct AnalysisClient {
    generator: Arc<dyn ContentGenerator>,
}

impl AnalysisClient {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    /// Forecasts the future of `profession`. The text is passed to the prompt
    /// as given.
    pub async fn analyze(&self, profession: &str) -> Result<ProfessionAnalysis, AnalysisError> {
        let request = GenerateRequest {
            model: MODEL.to_string(),
            prompt: build_prompt(profession),
            response_schema: response_schema(),
        };

        let content = self.generator.generate(&request).await.map_err(|e| {
            error!("Gemini call failed for '{profession}': {e}");
            AnalysisError::from(e)
        })?;

        if let Some(usage) = &content.usage {
            debug!(
                "Gemini usage: prompt_tokens={:?}, candidate_tokens={:?}, total_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        let text = content
            .text
            .filter(|t| !t.is_empty())
            .ok_or(AnalysisError::EmptyResponse)?;

        let analysis = parse_analysis(&text)?;

        let report = validate_analysis(&analysis);
        for warning in &report.warnings {
            warn!("Forecast for '{profession}': {} {}", warning.field, warning.reason);
        }
        if !report.passed() {
            error!(
                "Forecast for '{profession}' failed validation: {}",
                describe_issues(&report.issues)
            );
            return Err(AnalysisError::Invalid(report.issues));
        }

        info!(
            "Forecast ready for '{profession}': risk={}, timeline={}, subfields={}, skills={}",
            analysis.overall_risk_score,
            analysis.timeline.len(),
            analysis.subfields.len(),
            analysis.skills_to_survive.len()
        );

        Ok(analysis)
    }
}

/// Parses the model's JSON payload. On failure the raw text is logged and a
/// payload-free `AnalysisError::Parse` is returned.
pub fn parse_analysis(text: &str) -> Result<ProfessionAnalysis, AnalysisError> {
    serde_json::from_str(strip_json_fences(text)).map_err(|e| {
        error!(raw_payload = %text, "Failed to parse JSON: {e}");
        AnalysisError::Parse
    })
}
