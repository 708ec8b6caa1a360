//! Outbound notification formatting and dispatch.
//!
//! All dispatch here is best-effort and runs off the request path. The email
//! and SMS provider hookups mirror the assignment notification format the
//! sales team reviews; actual delivery is logged until a provider is wired.

use crate::models::{LeadScore, RiskAssessment, Submission};
use crate::routing::Owner;
use uuid::Uuid;

/// A formatted assignment notification for a sales owner.
#[derive(Debug, Clone)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub sms: Option<String>,
}

/// Format the new-lead notification for the assigned owner.
pub fn format_team_notification(
    lead_id: Uuid,
    submission: &Submission,
    risk: &RiskAssessment,
    score: &LeadScore,
    owner: &Owner,
) -> Notification {
    let revenue_millions = submission.revenue_numeric() as f64 / 1_000_000.0;

    let body = format!(
        "New lead assigned to you:\n\n\
         Company: {company}\n\
         Contact: {first} {last}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         State: {state}\n\
         Revenue: ${revenue:.1}M\n\
         Industry: {industry}\n\
         Employees: {employees}\n\n\
         Risk Score: {risk_score}/100\n\
         Coverage Requested: ${coverage}\n\
         Lead Quality: {quality}\n\n\
         Assessment ID: {lead_id}",
        company = submission.company_name,
        first = submission.first_name,
        last = submission.last_name,
        email = submission.email,
        phone = submission.phone.as_deref().unwrap_or("not provided"),
        state = submission.state,
        revenue = revenue_millions,
        industry = submission.industry,
        employees = submission.employees,
        risk_score = risk.score,
        coverage = submission.coverage_limit,
        quality = score.quality.as_str(),
        lead_id = lead_id,
    );

    Notification {
        to: owner.email.to_string(),
        subject: format!(
            "New Cyber Insurance Lead: {} - {}",
            submission.company_name, submission.state
        ),
        body,
        sms: Some(format!(
            "New {} lead: {} (${:.1}M revenue). Check email for details.",
            submission.state, submission.company_name, revenue_millions
        )),
    }
}

/// Notify the assigned owner about a hot or qualified lead.
// TODO: wire SMS (Twilio) and email (Resend) providers for delivery.
pub async fn notify_team_member(
    lead_id: Uuid,
    submission: &Submission,
    risk: &RiskAssessment,
    score: &LeadScore,
    owner: &Owner,
) {
    let notification = format_team_notification(lead_id, submission, risk, score, owner);
    tracing::info!(
        "Team notification for lead {} queued to {} ({}): {}",
        lead_id,
        owner.name,
        notification.to,
        notification.subject
    );
    tracing::debug!("Notification body:\n{}", notification.body);
}

/// Send the personalized risk report to the prospect.
// TODO: wire the transactional email provider for the report template.
pub async fn send_assessment_email(lead_id: Uuid, submission: &Submission) {
    tracing::info!(
        "Assessment report email for lead {} queued to {}",
        lead_id,
        submission.email
    );
}
