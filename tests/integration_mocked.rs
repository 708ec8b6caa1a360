/// Integration tests with a mocked AI risk-scoring API.
/// Exercises the primary/fallback composition without hitting Anthropic.
use quotecyber_api::models::{RiskLevel, Submission};
use quotecyber_api::risk;
use quotecyber_api::risk_client::RiskScoringClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn risky_submission() -> Submission {
    Submission {
        company_name: "Lakeside Dental".to_string(),
        industry: "Healthcare".to_string(),
        revenue: "1M-5M".to_string(),
        annual_revenue: None,
        employees: "10-50".to_string(),
        state: "WI".to_string(),
        data_types: vec!["healthcare".to_string(), "ssn".to_string()],
        record_count: "10K-100K".to_string(),
        payment_processing: "in_house".to_string(),
        mfa: "no".to_string(),
        training: "no".to_string(),
        security_tools: vec![],
        it_support: "none".to_string(),
        motivation: "compliance".to_string(),
        timeline: "30_days".to_string(),
        coverage_limit: "2M".to_string(),
        first_name: "Ira".to_string(),
        last_name: "Moss".to_string(),
        email: "ira@lakesidedental.com".to_string(),
        phone: Some("414-555-0101".to_string()),
        best_time: None,
    }
}

fn client_for(server: &MockServer) -> RiskScoringClient {
    RiskScoringClient::new(
        server.uri(),
        "test-key".to_string(),
        "claude-sonnet-4".to_string(),
    )
    .unwrap()
}

#[tokio::test]
async fn assessment_is_parsed_from_model_reply() {
    let mock_server = MockServer::start().await;

    let reply_text = r#"Here is my assessment:
{
    "riskScore": 78,
    "riskLevel": "high",
    "topRiskFactors": ["No MFA anywhere", "PHI exposure", "No staff training"],
    "strengths": ["Compliance-motivated buyer"],
    "recommendations": ["Roll out MFA", "Quarterly phishing training"],
    "reasoning": "Healthcare data with weak access controls."
}"#;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{ "type": "text", "text": reply_text }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let assessment = client.assess(&risky_submission()).await.unwrap();

    assert_eq!(assessment.score, 78);
    assert_eq!(assessment.level, RiskLevel::High);
    assert_eq!(assessment.insights.len(), 3);
    assert_eq!(assessment.strengths.len(), 1);
    assert_eq!(assessment.recommendations.len(), 2);
    assert!(assessment.reasoning.is_some());
}

#[tokio::test]
async fn server_error_surfaces_as_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.assess(&risky_submission()).await.is_err());
}

#[tokio::test]
async fn reply_without_json_surfaces_as_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{ "type": "text", "text": "I am unable to assess this business." }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.assess(&risky_submission()).await.is_err());
}

/// The orchestrator's contract: any primary failure substitutes the
/// deterministic fallback, never surfacing the error.
#[tokio::test]
async fn failed_primary_substitutes_rule_based_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let submission = risky_submission();
    let client = client_for(&mock_server);

    let assessment = match client.assess(&submission).await {
        Ok(assessment) => assessment,
        Err(_) => risk::assess(&submission),
    };

    // Healthcare + PHI/SSN + no MFA/training/tools/support: clamped to 100
    assert_eq!(assessment.score, 100);
    assert_eq!(assessment.level, RiskLevel::Critical);
    assert_eq!(assessment.insights.len(), 3);
}
