//! Lead qualification scoring.
//!
//! Pure decision tables mapping questionnaire answers to a fit score (how
//! well the business matches our book, 0-50) and an urgency score (how soon
//! they intend to buy, 0-30). Every table has an explicit default arm, so
//! the scorer is total over arbitrary input strings.

use crate::models::{LeadQuality, LeadScore, Submission};

/// Score a submission for sales qualification.
pub fn score(submission: &Submission) -> LeadScore {
    let fit = revenue_fit(&submission.revenue)
        + employee_fit(&submission.employees)
        + industry_fit(&submission.industry);

    let urgency = timeline_urgency(&submission.timeline) + motivation_urgency(&submission.motivation);

    let total = fit + urgency;

    LeadScore {
        fit,
        urgency,
        total,
        quality: LeadQuality::from_total(total),
    }
}

fn revenue_fit(bucket: &str) -> u8 {
    match bucket {
        "<500K" => 5,
        "500K-1M" => 10,
        "1M-5M" => 15,
        "5M-20M" => 20,
        "20M-50M" => 20,
        "50M+" => 15,
        _ => 10,
    }
}

fn employee_fit(bucket: &str) -> u8 {
    match bucket {
        "1-5" => 5,
        "5-10" => 10,
        "10-50" => 15,
        "50-200" => 15,
        "200+" => 10,
        _ => 10,
    }
}

fn industry_fit(industry: &str) -> u8 {
    match industry {
        "Technology" => 15,
        "Healthcare" => 15,
        "Financial Services" => 15,
        "Professional Services" => 12,
        "Retail" => 12,
        "Manufacturing" => 8,
        "Construction" => 5,
        _ => 8,
    }
}

fn timeline_urgency(timeline: &str) -> u8 {
    match timeline {
        "immediately" => 20,
        "30_days" => 15,
        "30-90_days" => 10,
        "90+_days" => 5,
        "just_looking" => 3,
        _ => 5,
    }
}

fn motivation_urgency(motivation: &str) -> u8 {
    match motivation {
        "contract" => 10,
        "compliance" => 10,
        "incident" => 8,
        "proactive" => 7,
        "shopping" => 5,
        "inquiry" => 2,
        _ => 5,
    }
}
