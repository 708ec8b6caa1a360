use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Submission (questionnaire payload) ============

/// One prospect's completed assessment questionnaire.
///
/// This is the immutable input to the scoring pipeline. Categorical answers
/// are kept as the raw strings the form submits; every lookup downstream has
/// an explicit default branch, so unrecognized values degrade instead of
/// failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub company_name: String,
    pub industry: String,
    /// Revenue bucket label, e.g. "1M-5M".
    pub revenue: String,
    /// Raw annual revenue in dollars, when the caller knows it. The form
    /// only sends the bucket; territory routing needs a number, so when this
    /// is absent the bucket's lower bound is used instead.
    #[serde(default)]
    pub annual_revenue: Option<i64>,
    pub employees: String,
    /// US state or territory code, e.g. "IL".
    pub state: String,
    #[serde(default)]
    pub data_types: Vec<String>,
    #[serde(default)]
    pub record_count: String,
    #[serde(default)]
    pub payment_processing: String,
    #[serde(default)]
    pub mfa: String,
    #[serde(default)]
    pub training: String,
    #[serde(default)]
    pub security_tools: Vec<String>,
    #[serde(default)]
    pub it_support: String,
    #[serde(default)]
    pub motivation: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub coverage_limit: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub best_time: Option<String>,
}

impl Submission {
    /// Annual revenue in dollars for routing decisions.
    ///
    /// Prefers the explicit numeric value; otherwise derives the lower bound
    /// of the bucket label. Unknown buckets derive 0, which never trips the
    /// high-value routing rule.
    pub fn revenue_numeric(&self) -> i64 {
        if let Some(value) = self.annual_revenue {
            return value;
        }
        match self.revenue.as_str() {
            "<500K" => 0,
            "500K-1M" => 500_000,
            "1M-5M" => 1_000_000,
            "5M-20M" => 5_000_000,
            "20M-50M" => 20_000_000,
            "50M+" => 50_000_000,
            _ => 0,
        }
    }
}

// ============ Risk assessment ============

/// Risk level classification derived from a 0-100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Band thresholds: <30 low, <60 medium, <80 high, else critical.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => RiskLevel::Low,
            30..=59 => RiskLevel::Medium,
            60..=79 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            "critical" => Some(RiskLevel::Critical),
            _ => None,
        }
    }
}

/// Result of a risk assessment, from either the AI underwriter call or the
/// rule-based fallback model. Strengths, recommendations, and reasoning are
/// only populated by the AI path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Always in [0, 100].
    pub score: u8,
    pub level: RiskLevel,
    pub insights: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

// ============ Lead qualification ============

/// Sales lead quality tier derived from the combined fit + urgency score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadQuality {
    Cold,
    Warm,
    Hot,
    Qualified,
}

impl LeadQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadQuality::Cold => "cold",
            LeadQuality::Warm => "warm",
            LeadQuality::Hot => "hot",
            LeadQuality::Qualified => "qualified",
        }
    }

    /// Tier thresholds: >=70 qualified, >=50 hot, >=30 warm, else cold.
    pub fn from_total(total: u8) -> Self {
        if total >= 70 {
            LeadQuality::Qualified
        } else if total >= 50 {
            LeadQuality::Hot
        } else if total >= 30 {
            LeadQuality::Warm
        } else {
            LeadQuality::Cold
        }
    }
}

/// Qualification score for one submission: fit (0-50) + urgency (0-30).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadScore {
    pub fit: u8,
    pub urgency: u8,
    pub total: u8,
    pub quality: LeadQuality,
}

// ============ Premium estimate ============

/// Estimated annual premium range in whole dollars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumEstimate {
    pub low: i64,
    pub high: i64,
    pub estimate: i64,
}

// ============ Persisted lead ============

/// A persisted lead row. `status` is the only field mutated after creation
/// (by the admin surface); the submitted questionnaire is stored verbatim in
/// `submission_data` so insights can be re-derived on demand.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub company_name: String,
    pub industry: String,
    pub revenue_range: String,
    pub employee_count_range: String,
    pub location_state: String,
    pub submission_data: serde_json::Value,
    pub risk_score: i32,
    pub risk_level: String,
    pub estimated_premium_low: i64,
    pub estimated_premium_high: i64,
    pub lead_quality: String,
    pub urgency_score: i32,
    pub fit_score: i32,
    pub status: String,
    pub assigned_to: Option<String>,
    pub close_crm_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ============ Request / response DTOs ============

/// Response body for POST /api/v1/assessments.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentResponse {
    pub success: bool,
    pub lead_id: Uuid,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub insights: Vec<String>,
    pub premium_estimate: PremiumEstimate,
    pub lead_quality: LeadQuality,
}

/// Response body for GET /api/v1/assessments/:id.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResultResponse {
    pub success: bool,
    pub lead_id: Uuid,
    pub company_name: String,
    pub risk_score: i32,
    pub risk_level: String,
    pub insights: Vec<String>,
    pub premium_low: i64,
    pub premium_high: i64,
    pub lead_quality: String,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for the admin lead listing.
#[derive(Debug, Default, Deserialize)]
pub struct AdminLeadsQuery {
    pub status: Option<String>,
    pub quality: Option<String>,
    pub limit: Option<i64>,
}

/// Body for PATCH /api/v1/admin/leads/:id/status.
#[derive(Debug, Deserialize)]
pub struct UpdateLeadStatusRequest {
    pub status: String,
}
