use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Pass,
    Warning,
    Fail,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    InsuranceSpending,
    DeathCoverage,
    CriticalIllnessCoverage,
    EmergencyFund,
    RetirementSavings,
    LifeStageAlignment,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 6] = [
        RuleCategory::InsuranceSpending,
        RuleCategory::DeathCoverage,
        RuleCategory::CriticalIllnessCoverage,
        RuleCategory::EmergencyFund,
        RuleCategory::RetirementSavings,
        RuleCategory::LifeStageAlignment,
    ];

    pub fn title(self) -> &'static str {
        match self {
            RuleCategory::InsuranceSpending => "Insurance Spending",
            RuleCategory::DeathCoverage => "Death/TPD Coverage",
            RuleCategory::CriticalIllnessCoverage => "Critical Illness Coverage",
            RuleCategory::EmergencyFund => "Emergency Fund",
            RuleCategory::RetirementSavings => "Retirement Savings",
            RuleCategory::LifeStageAlignment => "Life Stage Alignment",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifeStage {
    FreshEntrant,
    StartingFamily,
    SupportingParents,
    PreRetiree,
    GoldenYears,
    Unknown,
}

impl LifeStage {
    pub fn label(self) -> &'static str {
        match self {
            LifeStage::FreshEntrant => "Fresh Entrant (19-29 years)",
            LifeStage::StartingFamily => "Starting a Family (25-34 years)",
            LifeStage::SupportingParents => "Supporting Parents (35-59 years)",
            LifeStage::PreRetiree => "Pre-Retiree (55-64 years)",
            LifeStage::GoldenYears => "Golden Years (65+ years)",
            LifeStage::Unknown => "Unknown Life Stage",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// A household record after coercion. Every field has a concrete value;
/// see `RecordFields` for the lenient wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_premium: f64,
    pub death_coverage: f64,
    pub ci_coverage: f64,
    pub emergency_fund: f64,
    pub retirement_savings: f64,
    pub total_savings: f64,
    pub age: i64,
    pub has_children: bool,
    pub num_children: i64,
    pub product_type: String,
    pub policy_term: i64,
}

impl Default for InputRecord {
    fn default() -> Self {
        Self {
            monthly_income: 0.0,
            monthly_expenses: 0.0,
            monthly_premium: 0.0,
            death_coverage: 0.0,
            ci_coverage: 0.0,
            emergency_fund: 0.0,
            retirement_savings: 0.0,
            total_savings: super::record::DEFAULT_TOTAL_SAVINGS,
            age: 0,
            has_children: false,
            num_children: 0,
            product_type: String::new(),
            policy_term: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub category: RuleCategory,
    pub status: RuleStatus,
    pub title: String,
    pub message: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub deduction: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub results: Vec<RuleResult>,
    pub score: u32,
    pub status: OverallStatus,
    pub life_stage: LifeStage,
    pub advisories: Vec<String>,
}
