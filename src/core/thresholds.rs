use serde::Serialize;

use super::types::{LifeStage, OverallStatus};

/// Points removed from the compliance score for each non-pass verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deductions {
    pub insurance_spending_fail: u32,
    pub death_coverage_warning: u32,
    pub death_coverage_fail: u32,
    pub ci_coverage_warning: u32,
    pub ci_coverage_fail: u32,
    pub emergency_fund_warning: u32,
    pub emergency_fund_fail: u32,
    pub retirement_savings_warning: u32,
    pub life_stage_warning: u32,
    pub life_stage_fail: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBands {
    pub excellent: i32,
    pub good: i32,
    pub fair: i32,
}

impl ScoreBands {
    pub fn classify(&self, score: i32) -> OverallStatus {
        if score >= self.excellent {
            OverallStatus::Excellent
        } else if score >= self.good {
            OverallStatus::Good
        } else if score >= self.fair {
            OverallStatus::Fair
        } else {
            OverallStatus::Poor
        }
    }
}

/// Inclusive age band. `max_age == None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeStageBand {
    pub stage: LifeStage,
    pub min_age: i64,
    pub max_age: Option<i64>,
}

impl LifeStageBand {
    pub fn contains(&self, age: i64) -> bool {
        age >= self.min_age && self.max_age.is_none_or(|max| age <= max)
    }
}

/// Bands overlap (25-29, 55-59); the first matching row wins.
pub const LIFE_STAGE_BANDS: [LifeStageBand; 5] = [
    LifeStageBand {
        stage: LifeStage::FreshEntrant,
        min_age: 19,
        max_age: Some(29),
    },
    LifeStageBand {
        stage: LifeStage::StartingFamily,
        min_age: 25,
        max_age: Some(34),
    },
    LifeStageBand {
        stage: LifeStage::SupportingParents,
        min_age: 35,
        max_age: Some(59),
    },
    LifeStageBand {
        stage: LifeStage::PreRetiree,
        min_age: 55,
        max_age: Some(64),
    },
    LifeStageBand {
        stage: LifeStage::GoldenYears,
        min_age: 65,
        max_age: None,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleThresholds {
    pub max_insurance_ratio: f64,
    pub death_coverage_multiple: f64,
    pub death_coverage_warning_multiple: f64,
    pub ci_coverage_multiple: f64,
    pub ci_coverage_warning_multiple: f64,
    pub min_emergency_months: f64,
    pub recommended_emergency_months: f64,
    pub min_retirement_ratio: f64,
    pub golden_years_projection_years: f64,
    pub golden_years_max_savings_share: f64,
    pub pre_retiree_max_policy_term: i64,
    pub education_fund_per_child: f64,
    pub investment_linked_product: &'static str,
    pub deductions: Deductions,
    pub score_bands: ScoreBands,
    pub life_stage_bands: &'static [LifeStageBand],
}

impl RuleThresholds {
    pub const MONEYSENSE: RuleThresholds = RuleThresholds {
        max_insurance_ratio: 0.15,
        death_coverage_multiple: 9.0,
        death_coverage_warning_multiple: 7.0,
        ci_coverage_multiple: 4.0,
        ci_coverage_warning_multiple: 3.0,
        min_emergency_months: 3.0,
        recommended_emergency_months: 6.0,
        min_retirement_ratio: 0.10,
        golden_years_projection_years: 20.0,
        golden_years_max_savings_share: 0.10,
        pre_retiree_max_policy_term: 10,
        education_fund_per_child: 100_000.0,
        investment_linked_product: "investment-linked",
        deductions: Deductions {
            insurance_spending_fail: 20,
            death_coverage_warning: 10,
            death_coverage_fail: 20,
            ci_coverage_warning: 10,
            ci_coverage_fail: 20,
            emergency_fund_warning: 5,
            emergency_fund_fail: 15,
            retirement_savings_warning: 10,
            life_stage_warning: 5,
            life_stage_fail: 20,
        },
        score_bands: ScoreBands {
            excellent: 90,
            good: 75,
            fair: 60,
        },
        life_stage_bands: &LIFE_STAGE_BANDS,
    };

    pub fn life_stage(&self, age: i64) -> LifeStage {
        self.life_stage_bands
            .iter()
            .find(|band| band.contains(age))
            .map(|band| band.stage)
            .unwrap_or(LifeStage::Unknown)
    }
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self::MONEYSENSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn life_stage_first_match_wins_on_overlapping_bands() {
        let t = RuleThresholds::MONEYSENSE;
        assert_eq!(t.life_stage(18), LifeStage::Unknown);
        assert_eq!(t.life_stage(19), LifeStage::FreshEntrant);
        assert_eq!(t.life_stage(27), LifeStage::FreshEntrant);
        assert_eq!(t.life_stage(29), LifeStage::FreshEntrant);
        assert_eq!(t.life_stage(30), LifeStage::StartingFamily);
        assert_eq!(t.life_stage(34), LifeStage::StartingFamily);
        assert_eq!(t.life_stage(57), LifeStage::SupportingParents);
        assert_eq!(t.life_stage(60), LifeStage::PreRetiree);
        assert_eq!(t.life_stage(64), LifeStage::PreRetiree);
        assert_eq!(t.life_stage(65), LifeStage::GoldenYears);
        assert_eq!(t.life_stage(120), LifeStage::GoldenYears);
        assert_eq!(t.life_stage(-3), LifeStage::Unknown);
    }

    #[test]
    fn score_bands_are_inclusive_lower_bounds() {
        let bands = RuleThresholds::MONEYSENSE.score_bands;
        assert_eq!(bands.classify(100), OverallStatus::Excellent);
        assert_eq!(bands.classify(90), OverallStatus::Excellent);
        assert_eq!(bands.classify(89), OverallStatus::Good);
        assert_eq!(bands.classify(75), OverallStatus::Good);
        assert_eq!(bands.classify(74), OverallStatus::Fair);
        assert_eq!(bands.classify(60), OverallStatus::Fair);
        assert_eq!(bands.classify(59), OverallStatus::Poor);
        assert_eq!(bands.classify(0), OverallStatus::Poor);
    }

    #[test]
    fn guidelines_serialize_with_camel_case_keys() {
        let json = serde_json::to_string(&RuleThresholds::MONEYSENSE).expect("serialize");
        assert!(json.contains("\"maxInsuranceRatio\":0.15"));
        assert!(json.contains("\"lifeStageBands\""));
        assert!(json.contains("\"stage\":\"golden-years\""));
        assert!(json.contains("\"maxAge\":null"));
    }
}
