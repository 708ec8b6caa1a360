use crate::errors::AppError;
use crate::models::{RiskAssessment, RiskLevel, Submission};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for AI-backed risk scoring via the Anthropic Messages API.
///
/// The model replies in prose wrapping a JSON object; the reply is scanned
/// for that object and parsed into a [`RiskAssessment`]. Every failure mode
/// (transport, non-2xx, no JSON found, wrong shape) surfaces as an error so
/// the caller can substitute the rule-based fallback model.
#[derive(Clone)]
pub struct RiskScoringClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Shape of the JSON object the underwriter prompt asks the model to emit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelAssessment {
    risk_score: f64,
    #[serde(default)]
    risk_level: Option<String>,
    #[serde(default)]
    top_risk_factors: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

impl RiskScoringClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create risk scoring client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
        })
    }

    /// Request a risk assessment for one submission.
    pub async fn assess(&self, submission: &Submission) -> Result<RiskAssessment, AppError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = json!({
            "model": self.model,
            "max_tokens": 1024,
            "messages": [{
                "role": "user",
                "content": underwriter_prompt(submission),
            }]
        });

        tracing::info!(
            "Requesting AI risk assessment for company: {}",
            submission.company_name
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalApiError(format!("Risk scoring request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Risk scoring API returned {}: {}",
                status, error_text
            )));
        }

        let reply: serde_json::Value = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse risk scoring response: {}", e))
        })?;

        let text = reply
            .get("content")
            .and_then(|c| c.get(0))
            .and_then(|block| block.get("text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                AppError::ExternalApiError("Risk scoring response missing text content".to_string())
            })?;

        parse_model_reply(text)
    }
}

/// Render the underwriter prompt for one business profile.
fn underwriter_prompt(data: &Submission) -> String {
    format!(
        r#"You are a cyber insurance underwriter. Analyze this business profile and provide a risk assessment.

Business Profile:
- Company: {company}
- Industry: {industry}
- Revenue: {revenue}
- Employees: {employees}
- Data handled: {data_types}
- Record count: {record_count}
- Payment processing: {payment_processing}
- MFA enabled: {mfa}
- Security training: {training}
- Security tools: {security_tools}
- IT support: {it_support}
- Timeline: {timeline}
- Motivation: {motivation}

Provide a comprehensive risk assessment in JSON format:
{{
    "riskScore": <0-100>,
    "riskLevel": "<low|medium|high|critical>",
    "topRiskFactors": ["factor1", "factor2", "factor3"],
    "strengths": ["strength1", "strength2"],
    "recommendations": ["rec1", "rec2", "rec3"],
    "reasoning": "Brief explanation of the assessment"
}}

Be specific and actionable in your recommendations."#,
        company = data.company_name,
        industry = data.industry,
        revenue = data.revenue,
        employees = data.employees,
        data_types = join_or(&data.data_types, "None specified"),
        record_count = data.record_count,
        payment_processing = data.payment_processing,
        mfa = data.mfa,
        training = data.training,
        security_tools = join_or(&data.security_tools, "None"),
        it_support = data.it_support,
        timeline = data.timeline,
        motivation = data.motivation,
    )
}

fn join_or(values: &[String], empty: &str) -> String {
    if values.is_empty() {
        empty.to_string()
    } else {
        values.join(", ")
    }
}

/// Extract and parse the JSON assessment embedded in the model's reply text.
pub fn parse_model_reply(text: &str) -> Result<RiskAssessment, AppError> {
    let json_pattern = Regex::new(r"\{[\s\S]*\}").unwrap();
    let json_text = json_pattern
        .find(text)
        .ok_or_else(|| {
            AppError::ExternalApiError("No JSON object found in model reply".to_string())
        })?
        .as_str();

    let parsed: ModelAssessment = serde_json::from_str(json_text).map_err(|e| {
        AppError::ExternalApiError(format!("Model reply JSON has unexpected shape: {}", e))
    })?;

    let score = parsed.risk_score.clamp(0.0, 100.0).round() as u8;
    let level = parsed
        .risk_level
        .as_deref()
        .and_then(RiskLevel::parse)
        .unwrap_or_else(|| RiskLevel::from_score(score));

    Ok(RiskAssessment {
        score,
        level,
        insights: parsed.top_risk_factors,
        strengths: parsed.strengths,
        recommendations: parsed.recommendations,
        reasoning: parsed.reasoning,
    })
}
