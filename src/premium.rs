//! Premium range estimation.
//!
//! Multiplies a minimum premium through revenue, risk, industry, and
//! coverage-limit modifiers, then returns a +/-20% range around the rounded
//! estimate. Pure and total: unknown buckets use the documented default
//! multipliers.

use crate::models::{PremiumEstimate, Submission};

/// Minimum annual premium in dollars.
const BASE_PREMIUM: f64 = 1500.0;

/// Estimate the annual premium range for a submission and its risk score.
pub fn estimate(submission: &Submission, risk_score: u8) -> PremiumEstimate {
    let mut base = BASE_PREMIUM;

    base *= revenue_multiplier(&submission.revenue);
    base *= 1.0 + f64::from(risk_score) / 100.0;
    base *= industry_modifier(&submission.industry);
    base *= coverage_limit_modifier(&submission.coverage_limit);

    // The range brackets the rounded estimate, not the raw base.
    let estimate = base.round() as i64;
    PremiumEstimate {
        low: (estimate as f64 * 0.8).round() as i64,
        high: (estimate as f64 * 1.2).round() as i64,
        estimate,
    }
}

fn revenue_multiplier(bucket: &str) -> f64 {
    match bucket {
        "<500K" => 1.0,
        "500K-1M" => 1.2,
        "1M-5M" => 1.5,
        "5M-20M" => 2.5,
        "20M-50M" => 4.0,
        "50M+" => 6.0,
        _ => 1.5,
    }
}

fn industry_modifier(industry: &str) -> f64 {
    match industry {
        "Technology" => 1.3,
        "Healthcare" => 1.4,
        "Financial Services" => 1.5,
        "Retail" => 1.2,
        "Professional Services" => 1.1,
        "Manufacturing" => 1.0,
        "Construction" => 0.9,
        _ => 1.0,
    }
}

fn coverage_limit_modifier(bucket: &str) -> f64 {
    match bucket {
        "1M" => 1.0,
        "2M" => 1.4,
        "5M" => 2.2,
        "10M+" => 3.5,
        _ => 1.4,
    }
}
