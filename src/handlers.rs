use crate::config::Config;
use crate::crm::CloseCrmClient;
use crate::errors::AppError;
use crate::models::*;
use crate::risk_client::RiskScoringClient;
use crate::routing::{Owner, SalesTeam};
use crate::storage::LeadStorage;
use crate::{notifications, premium, risk, scoring};
use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
    /// AI risk scoring client (None when no API key is configured).
    pub risk_client: Option<RiskScoringClient>,
    /// Close CRM client (None when no API key is configured).
    pub crm_client: Option<CloseCrmClient>,
    /// Static sales team routing configuration.
    pub team: SalesTeam,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "quotecyber-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/v1/assessments
///
/// Runs the full assessment pipeline for one submission: risk assessment
/// (AI-backed with deterministic fallback), lead qualification, premium
/// estimation, territory routing, persistence, and detached CRM/notification
/// dispatch. Only persistence failure fails the request.
pub async fn submit_assessment(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(submission): Json<Submission>,
) -> Result<Json<SubmitAssessmentResponse>, AppError> {
    tracing::info!("Assessment submission: {}", submission.email);

    if submission.email.trim().is_empty() || submission.company_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "email and companyName are required".to_string(),
        ));
    }

    // (a) Risk assessment: AI first, rule-based fallback on any failure.
    let risk = assess_risk(&state, &submission).await;
    tracing::info!("Risk analysis complete: {}", risk.score);

    // (b) Lead qualification, independent of the risk path taken.
    let lead_score = scoring::score(&submission);
    tracing::info!("Lead score: {}", lead_score.total);

    // (c) Premium estimation from the risk score.
    let premium = premium::estimate(&submission, risk.score);

    // (d) Territory routing.
    let owner = state
        .team
        .assign(&submission.state, submission.revenue_numeric())
        .clone();
    tracing::info!("Lead routed to {}", owner.name);

    // (e) Persist the composed lead record.
    let client_ip = client_ip(&headers, addr);
    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let storage = LeadStorage::new(state.db.clone());
    let lead_id = storage
        .insert_lead(
            &submission,
            &risk,
            &premium,
            &lead_score,
            owner.name,
            Some(&client_ip),
            user_agent.as_deref(),
        )
        .await?;
    tracing::info!("Lead saved: {}", lead_id);

    // (f) Best-effort dispatch, decoupled from the response.
    spawn_post_submit_tasks(&state, lead_id, &submission, &risk, &premium, &lead_score, owner);

    Ok(Json(SubmitAssessmentResponse {
        success: true,
        lead_id,
        risk_score: risk.score,
        risk_level: risk.level,
        insights: risk.insights,
        premium_estimate: premium,
        lead_quality: lead_score.quality,
    }))
}

/// Obtain a risk assessment, substituting the rule-based model on any
/// failure of the AI path. Never fails.
async fn assess_risk(state: &AppState, submission: &Submission) -> RiskAssessment {
    match &state.risk_client {
        Some(client) => match client.assess(submission).await {
            Ok(assessment) => assessment,
            Err(e) => {
                tracing::warn!("AI risk scoring failed, using rule-based fallback: {}", e);
                risk::assess(submission)
            }
        },
        None => risk::assess(submission),
    }
}

/// Fire-and-forget CRM sync and notifications. Failures are logged inside
/// the spawned tasks and never affect the already-computed response.
fn spawn_post_submit_tasks(
    state: &AppState,
    lead_id: Uuid,
    submission: &Submission,
    risk: &RiskAssessment,
    premium: &PremiumEstimate,
    score: &LeadScore,
    owner: Owner,
) {
    if let Some(crm) = state.crm_client.clone() {
        let pool = state.db.clone();
        let submission = submission.clone();
        let risk = risk.clone();
        let premium = premium.clone();
        let score = score.clone();
        tokio::spawn(async move {
            match crm.sync_lead(lead_id, &submission, &risk, &premium, &score).await {
                Ok(crm_id) => {
                    let storage = LeadStorage::new(pool);
                    if let Err(e) = storage.set_crm_id(lead_id, &crm_id).await {
                        tracing::error!("Failed to record CRM id for lead {}: {}", lead_id, e);
                    }
                }
                Err(e) => tracing::error!("Close CRM sync error for lead {}: {}", lead_id, e),
            }
        });
    } else {
        tracing::debug!("Close API key not configured, skipping CRM sync");
    }

    {
        let submission = submission.clone();
        tokio::spawn(async move {
            notifications::send_assessment_email(lead_id, &submission).await;
        });
    }

    if matches!(score.quality, LeadQuality::Hot | LeadQuality::Qualified) {
        let submission = submission.clone();
        let risk = risk.clone();
        let score = score.clone();
        tokio::spawn(async move {
            notifications::notify_team_member(lead_id, &submission, &risk, &score, &owner).await;
        });
    }
}

/// GET /api/v1/assessments/:id
///
/// Results-page view of a stored lead. Insights are re-derived from the
/// stored submission with the deterministic rule model, so reads never block
/// on the AI boundary.
pub async fn get_assessment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentResultResponse>, AppError> {
    let storage = LeadStorage::new(state.db.clone());
    let lead = storage
        .get_lead(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assessment not found".to_string()))?;

    let insights = match serde_json::from_value::<Submission>(lead.submission_data.clone()) {
        Ok(submission) => risk::assess(&submission).insights,
        Err(e) => {
            tracing::warn!("Stored submission for lead {} is unreadable: {}", id, e);
            Vec::new()
        }
    };

    Ok(Json(AssessmentResultResponse {
        success: true,
        lead_id: lead.id,
        company_name: lead.company_name,
        risk_score: lead.risk_score,
        risk_level: lead.risk_level,
        insights,
        premium_low: lead.estimated_premium_low,
        premium_high: lead.estimated_premium_high,
        lead_quality: lead.lead_quality,
        created_at: lead.created_at,
    }))
}

/// GET /api/v1/admin/leads
///
/// Capped, recency-ordered listing with optional status/quality filters.
pub async fn admin_list_leads(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<AdminLeadsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_admin(&state, &headers)?;

    let storage = LeadStorage::new(state.db.clone());
    let leads = storage
        .list_leads(params.status.as_deref(), params.quality.as_deref(), params.limit)
        .await?;

    Ok(Json(json!({ "success": true, "leads": leads })))
}

/// PATCH /api/v1/admin/leads/:id/status
pub async fn admin_update_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeadStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_admin(&state, &headers)?;

    if request.status.trim().is_empty() {
        return Err(AppError::BadRequest("status cannot be empty".to_string()));
    }

    let storage = LeadStorage::new(state.db.clone());
    let updated = storage.update_status(id, &request.status).await?;
    if !updated {
        return Err(AppError::NotFound(format!("Lead {} not found", id)));
    }

    Ok(Json(json!({ "success": true })))
}

/// Check the x-api-key header against the configured admin key.
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let provided = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if provided == state.config.admin_api_key {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Invalid admin API key".to_string()))
    }
}

/// Client IP for the lead record: first x-forwarded-for hop when present,
/// else the socket peer address.
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| addr.ip().to_string())
}
