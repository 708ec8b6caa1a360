/// Unit tests for the pure pipeline components: lead qualification scoring,
/// the rule-based fallback risk model, and premium estimation.
use quotecyber_api::models::{LeadQuality, RiskLevel, Submission};
use quotecyber_api::{premium, risk, scoring};

fn submission() -> Submission {
    Submission {
        company_name: "Acme Logistics".to_string(),
        industry: "Manufacturing".to_string(),
        revenue: "1M-5M".to_string(),
        annual_revenue: None,
        employees: "10-50".to_string(),
        state: "OH".to_string(),
        data_types: vec![],
        record_count: "1K-10K".to_string(),
        payment_processing: "third_party".to_string(),
        mfa: "yes_partial".to_string(),
        training: "annual".to_string(),
        security_tools: vec!["antivirus".to_string()],
        it_support: "msp".to_string(),
        motivation: "proactive".to_string(),
        timeline: "30-90_days".to_string(),
        coverage_limit: "1M".to_string(),
        first_name: "Pat".to_string(),
        last_name: "Doyle".to_string(),
        email: "pat@acmelogistics.com".to_string(),
        phone: None,
        best_time: None,
    }
}

mod lead_scoring {
    use super::*;

    #[test]
    fn total_is_fit_plus_urgency() {
        let score = scoring::score(&submission());
        assert_eq!(score.total, score.fit + score.urgency);
    }

    #[test]
    fn fit_tables_match_fixed_values() {
        // 1M-5M (15) + 10-50 (15) + Manufacturing (8) = 38
        let score = scoring::score(&submission());
        assert_eq!(score.fit, 38);
        // 30-90_days (10) + proactive (7) = 17
        assert_eq!(score.urgency, 17);
        assert_eq!(score.total, 55);
        assert_eq!(score.quality, LeadQuality::Hot);
    }

    #[test]
    fn unrecognized_buckets_fall_back_to_defaults() {
        let mut sub = submission();
        sub.revenue = "a-zillion".to_string();
        sub.employees = "many".to_string();
        sub.industry = "Alpaca Farming".to_string();
        sub.timeline = "someday".to_string();
        sub.motivation = "vibes".to_string();

        let score = scoring::score(&sub);
        // revenue 10 + employees 10 + industry 8
        assert_eq!(score.fit, 28);
        // timeline 5 + motivation 5
        assert_eq!(score.urgency, 10);
    }

    #[test]
    fn quality_boundary_at_seventy() {
        // fit = 1M-5M (15) + 10-50 (15) + Professional Services (12) = 42
        let mut sub = submission();
        sub.industry = "Professional Services".to_string();
        sub.timeline = "immediately".to_string();

        // urgency = 20 + proactive (7) = 27, total 69
        let score = scoring::score(&sub);
        assert_eq!(score.total, 69);
        assert_eq!(score.quality, LeadQuality::Hot);

        // urgency = 20 + incident (8) = 28, total 70
        sub.motivation = "incident".to_string();
        let score = scoring::score(&sub);
        assert_eq!(score.total, 70);
        assert_eq!(score.quality, LeadQuality::Qualified);
    }

    #[test]
    fn quality_boundaries_at_thirty_and_fifty() {
        assert_eq!(LeadQuality::from_total(29), LeadQuality::Cold);
        assert_eq!(LeadQuality::from_total(30), LeadQuality::Warm);
        assert_eq!(LeadQuality::from_total(49), LeadQuality::Warm);
        assert_eq!(LeadQuality::from_total(50), LeadQuality::Hot);
    }

    #[test]
    fn max_urgency_scenario_is_qualified() {
        let mut sub = submission();
        sub.timeline = "immediately".to_string();
        sub.motivation = "contract".to_string();
        sub.revenue = "20M-50M".to_string();
        sub.employees = "50-200".to_string();
        sub.industry = "Healthcare".to_string();

        let score = scoring::score(&sub);
        assert_eq!(score.urgency, 30);
        assert_eq!(score.fit, 50);
        assert_eq!(score.total, 80);
        assert_eq!(score.quality, LeadQuality::Qualified);
    }
}

mod fallback_risk {
    use super::*;

    #[test]
    fn worst_posture_clamps_to_one_hundred() {
        let mut sub = submission();
        sub.industry = "Technology".to_string();
        sub.revenue = "5M-20M".to_string();
        sub.employees = "50-200".to_string();
        sub.state = "IL".to_string();
        sub.mfa = "no".to_string();
        sub.training = "no".to_string();
        sub.security_tools = vec![];
        sub.it_support = "none".to_string();

        // 50 + 15 + 15 + 12 + 15 + 10 = 117, clamped
        let assessment = risk::assess(&sub);
        assert_eq!(assessment.score, 100);
        assert_eq!(assessment.level, RiskLevel::Critical);
        assert_eq!(
            assessment.insights,
            vec![
                "No multi-factor authentication".to_string(),
                "No employee training".to_string(),
                "Minimal security tools".to_string(),
            ]
        );
    }

    #[test]
    fn strong_posture_scores_low() {
        let mut sub = submission();
        sub.industry = "Construction".to_string();
        sub.mfa = "yes_everywhere".to_string();
        sub.training = "quarterly".to_string();
        sub.security_tools = vec!["backup".to_string()];
        sub.it_support = "internal".to_string();

        // 50 - 8 - 7 - 6 - 8 = 21
        let assessment = risk::assess(&sub);
        assert_eq!(assessment.score, 21);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.insights.is_empty());
        assert!(assessment.strengths.is_empty());
        assert!(assessment.recommendations.is_empty());
    }

    #[test]
    fn data_types_each_add_ten() {
        let mut sub = submission();
        sub.data_types = vec![
            "payment_cards".to_string(),
            "healthcare".to_string(),
            "ssn".to_string(),
        ];

        // baseline 50 + 30 data - 8 (msp) = 72
        let assessment = risk::assess(&sub);
        assert_eq!(assessment.score, 72);
        assert_eq!(assessment.level, RiskLevel::High);
    }

    #[test]
    fn not_sure_mfa_raises_score_without_insight() {
        let mut sub = submission();
        sub.mfa = "not_sure".to_string();
        let with_doubt = risk::assess(&sub);

        sub.mfa = "yes_partial".to_string();
        let baseline = risk::assess(&sub);

        assert_eq!(with_doubt.score, baseline.score + 15);
        assert!(with_doubt.insights.is_empty());
    }

    #[test]
    fn explicit_none_tool_counts_as_unprotected() {
        let mut sub = submission();
        sub.security_tools = vec!["none".to_string()];
        let listed_none = risk::assess(&sub);

        sub.security_tools = vec![];
        let empty = risk::assess(&sub);

        assert_eq!(listed_none.score, empty.score);
        // The insight follows the empty-list condition only
        assert!(listed_none.insights.is_empty());
        assert_eq!(empty.insights, vec!["Minimal security tools".to_string()]);
    }

    #[test]
    fn level_band_boundaries() {
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Critical);
    }
}

mod premium_estimation {
    use super::*;

    #[test]
    fn floor_scenario_computes_exactly() {
        let mut sub = submission();
        sub.revenue = "<500K".to_string();
        sub.industry = "Construction".to_string();
        sub.coverage_limit = "1M".to_string();

        // 1500 * 1.0 * 1.0 * 0.9 * 1.0 = 1350
        let estimate = premium::estimate(&sub, 0);
        assert_eq!(estimate.estimate, 1350);
        assert_eq!(estimate.low, 1080);
        assert_eq!(estimate.high, 1620);
    }

    #[test]
    fn range_is_derived_from_rounded_estimate() {
        let estimate = premium::estimate(&submission(), 47);
        assert_eq!(estimate.low, (estimate.estimate as f64 * 0.8).round() as i64);
        assert_eq!(estimate.high, (estimate.estimate as f64 * 1.2).round() as i64);
        assert!(estimate.low <= estimate.estimate && estimate.estimate <= estimate.high);
    }

    #[test]
    fn estimate_grows_with_risk_score() {
        let sub = submission();
        let low_risk = premium::estimate(&sub, 20);
        let high_risk = premium::estimate(&sub, 80);
        assert!(high_risk.estimate > low_risk.estimate);
    }

    #[test]
    fn unknown_buckets_use_default_multipliers() {
        let mut sub = submission();
        sub.revenue = "unknown".to_string();
        sub.industry = "Alpaca Farming".to_string();
        sub.coverage_limit = "unknown".to_string();

        // 1500 * 1.5 (default) * 1.5 (risk 50) * 1.0 (default) * 1.4 (default)
        let estimate = premium::estimate(&sub, 50);
        assert_eq!(estimate.estimate, 4725);
    }

    #[test]
    fn max_multipliers_scenario() {
        let mut sub = submission();
        sub.revenue = "50M+".to_string();
        sub.industry = "Financial Services".to_string();
        sub.coverage_limit = "10M+".to_string();

        // 1500 * 6.0 * 2.0 * 1.5 * 3.5 = 94500
        let estimate = premium::estimate(&sub, 100);
        assert_eq!(estimate.estimate, 94_500);
    }
}
