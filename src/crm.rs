use crate::errors::AppError;
use crate::models::{LeadScore, PremiumEstimate, RiskAssessment, Submission};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

const CLOSE_LEAD_URL: &str = "https://api.close.com/api/v1/lead/";

/// Client for pushing leads into Close CRM.
///
/// Sync is best-effort: it runs in a detached task after the response has
/// been computed, and failures are logged, never propagated.
#[derive(Clone)]
pub struct CloseCrmClient {
    client: reqwest::Client,
    api_key: String,
}

impl CloseCrmClient {
    pub fn new(api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::ExternalApiError(format!("Failed to create CRM client: {}", e)))?;

        Ok(Self { client, api_key })
    }

    /// Create a lead in Close CRM and return its CRM identifier.
    pub async fn sync_lead(
        &self,
        lead_id: Uuid,
        submission: &Submission,
        risk: &RiskAssessment,
        premium: &PremiumEstimate,
        score: &LeadScore,
    ) -> Result<String, AppError> {
        let mut contact = serde_json::Map::new();
        contact.insert(
            "name".to_string(),
            json!(format!("{} {}", submission.first_name, submission.last_name)),
        );
        contact.insert(
            "emails".to_string(),
            json!([{ "email": submission.email, "type": "office" }]),
        );
        if let Some(phone) = &submission.phone {
            contact.insert(
                "phones".to_string(),
                json!([{ "phone": phone, "type": "office" }]),
            );
        }

        let body = json!({
            "name": submission.company_name,
            "description": format!(
                "{} • {} revenue • {} employees",
                submission.industry, submission.revenue, submission.employees
            ),
            "contacts": [contact],
            "custom": {
                "Risk Score": risk.score,
                "Risk Level": risk.level.as_str(),
                "Estimated Premium": format!("${}-{}", premium.low, premium.high),
                "Lead Quality": score.quality.as_str(),
                "Urgency Score": score.urgency,
                "Timeline": submission.timeline,
                "Motivation": submission.motivation,
                "Assessment ID": lead_id.to_string(),
            }
        });

        tracing::info!("Syncing lead {} to Close CRM", lead_id);

        let response = self
            .client
            .post(CLOSE_LEAD_URL)
            .header(
                "Authorization",
                format!("Basic {}", BASE64.encode(format!("{}:", self.api_key))),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Close CRM request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Close CRM returned {}: {}",
                status, error_text
            )));
        }

        let data: serde_json::Value = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse Close CRM response: {}", e))
        })?;

        let crm_id = data
            .get("id")
            .and_then(|i| i.as_str())
            .ok_or_else(|| {
                AppError::ExternalApiError("Close CRM response missing 'id' field".to_string())
            })?
            .to_string();

        tracing::info!("Lead {} synced to Close CRM as {}", lead_id, crm_id);
        Ok(crm_id)
    }
}
