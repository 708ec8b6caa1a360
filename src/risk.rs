//! Rule-based fallback risk model.
//!
//! Deterministic substitute for the AI underwriter call. Starts from a
//! baseline of 50 and applies additive adjustments for exposure and security
//! posture, clamped to [0, 100]. Never fails; invoked whenever the primary
//! scorer is unavailable or returns something unparseable.

use crate::models::{RiskAssessment, RiskLevel, Submission};

const BASELINE_SCORE: i32 = 50;

const HIGH_RISK_INDUSTRIES: [&str; 3] = ["Healthcare", "Financial Services", "Technology"];

/// Assess a submission with the offline rule set.
pub fn assess(submission: &Submission) -> RiskAssessment {
    let mut score = BASELINE_SCORE;

    // Industry exposure
    if HIGH_RISK_INDUSTRIES.contains(&submission.industry.as_str()) {
        score += 15;
    }

    // Data exposure
    if has_data_type(submission, "payment_cards") {
        score += 10;
    }
    if has_data_type(submission, "healthcare") {
        score += 10;
    }
    if has_data_type(submission, "ssn") {
        score += 10;
    }

    // Security posture gaps
    if submission.mfa == "no" || submission.mfa == "not_sure" {
        score += 15;
    }
    if submission.training == "no" {
        score += 12;
    }
    if no_security_tools(submission) {
        score += 15;
    }
    if submission.it_support == "none" {
        score += 10;
    }

    // Protective factors
    if submission.mfa == "yes_everywhere" {
        score -= 8;
    }
    if submission.training == "quarterly" {
        score -= 7;
    }
    if has_tool(submission, "backup") {
        score -= 6;
    }
    if submission.it_support == "internal" || submission.it_support == "msp" {
        score -= 8;
    }

    let score = score.clamp(0, 100) as u8;

    let mut insights = Vec::new();
    if submission.mfa == "no" {
        insights.push("No multi-factor authentication".to_string());
    }
    if submission.training == "no" {
        insights.push("No employee training".to_string());
    }
    if submission.security_tools.is_empty() {
        insights.push("Minimal security tools".to_string());
    }

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        insights,
        strengths: Vec::new(),
        recommendations: Vec::new(),
        reasoning: None,
    }
}

fn has_data_type(submission: &Submission, data_type: &str) -> bool {
    submission.data_types.iter().any(|t| t == data_type)
}

fn has_tool(submission: &Submission, tool: &str) -> bool {
    submission.security_tools.iter().any(|t| t == tool)
}

fn no_security_tools(submission: &Submission) -> bool {
    submission.security_tools.is_empty() || has_tool(submission, "none")
}
