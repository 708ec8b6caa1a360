use crate::errors::AppError;
use crate::models::{Lead, LeadScore, PremiumEstimate, RiskAssessment, Submission};
use sqlx::PgPool;
use uuid::Uuid;

/// Cap applied to the admin listing when no limit is supplied.
const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 500;

/// Database storage service for assessed leads.
pub struct LeadStorage {
    pool: PgPool,
}

impl LeadStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a fully assessed submission as a new lead row.
    ///
    /// The raw submission is stored verbatim as JSONB alongside the derived
    /// scores so insights can be re-computed on the results page.
    pub async fn insert_lead(
        &self,
        submission: &Submission,
        risk: &RiskAssessment,
        premium: &PremiumEstimate,
        score: &LeadScore,
        assigned_to: &str,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<Uuid, AppError> {
        let submission_json = serde_json::to_value(submission)
            .map_err(|e| AppError::InternalError(format!("Failed to serialize submission: {}", e)))?;

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO leads (
                email, first_name, last_name, phone, company_name,
                industry, revenue_range, employee_count_range, location_state,
                submission_data, risk_score, risk_level,
                estimated_premium_low, estimated_premium_high,
                lead_quality, urgency_score, fit_score,
                status, assigned_to, ip_address, user_agent, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, 'new', $18, $19, $20, now()
            )
            RETURNING id
            "#,
        )
        .bind(&submission.email)
        .bind(&submission.first_name)
        .bind(&submission.last_name)
        .bind(&submission.phone)
        .bind(&submission.company_name)
        .bind(&submission.industry)
        .bind(&submission.revenue)
        .bind(&submission.employees)
        .bind(&submission.state)
        .bind(&submission_json)
        .bind(i32::from(risk.score))
        .bind(risk.level.as_str())
        .bind(premium.low)
        .bind(premium.high)
        .bind(score.quality.as_str())
        .bind(i32::from(score.urgency))
        .bind(i32::from(score.fit))
        .bind(assigned_to)
        .bind(ip_address)
        .bind(user_agent)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Lead saved: {}", id);
        Ok(id)
    }

    /// Fetch one lead by its identifier.
    pub async fn get_lead(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lead)
    }

    /// List leads, newest first, optionally filtered by status and quality.
    pub async fn list_leads(
        &self,
        status: Option<&str>,
        quality: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Lead>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);

        let mut query = sqlx::QueryBuilder::new("SELECT * FROM leads WHERE 1=1");
        if let Some(status) = status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(quality) = quality {
            query.push(" AND lead_quality = ").push_bind(quality);
        }
        query.push(" ORDER BY created_at DESC LIMIT ").push_bind(limit);

        let leads = query
            .build_query_as::<Lead>()
            .fetch_all(&self.pool)
            .await?;

        Ok(leads)
    }

    /// Update a lead's status. Returns false when no such lead exists.
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE leads SET status = $1, updated_at = now() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Record the Close CRM identifier after a successful sync.
    pub async fn set_crm_id(&self, id: Uuid, crm_id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE leads SET close_crm_id = $1, updated_at = now() WHERE id = $2")
            .bind(crm_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
