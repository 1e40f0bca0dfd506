use super::thresholds::RuleThresholds;
use super::types::{InputRecord, LifeStage, RuleCategory, RuleStatus};

/// Raw outcome of one rule: verdict, deduction, and the numbers behind it.
/// Nothing here is formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub category: RuleCategory,
    pub status: RuleStatus,
    pub deduction: u32,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Metrics {
    InsuranceSpending {
        monthly_premium: f64,
        ratio: f64,
        max_allowed: f64,
        excess: Option<f64>,
    },
    Coverage {
        coverage: f64,
        ratio: f64,
        required_multiple: f64,
        recommended: f64,
        shortfall: Option<f64>,
    },
    EmergencyFund {
        fund: f64,
        months_covered: f64,
        minimum: f64,
        recommended: f64,
        shortfall: Option<f64>,
    },
    RetirementSavings {
        monthly_savings: f64,
        ratio: f64,
        minimum: f64,
        shortfall: Option<f64>,
    },
    LifeStage {
        stage: LifeStage,
        trigger: Option<StageTrigger>,
        advisory: Option<StageAdvisory>,
    },
}

/// Stage-specific condition that replaced the generic life-stage pass.
#[derive(Debug, Clone, PartialEq)]
pub enum StageTrigger {
    InvestmentLinkedProduct,
    LongPolicyTerm {
        years: i64,
    },
    PremiumDrain {
        projected_cost: f64,
        savings_share: f64,
    },
}

/// Informational guidance attached to a life stage. Never changes a verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum StageAdvisory {
    ProtectionFirst,
    FamilyProtection { education_fund: f64 },
    RetirementShift,
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn insurance_spending(record: &InputRecord, t: &RuleThresholds) -> Finding {
    let ratio = safe_ratio(record.monthly_premium, record.monthly_income);
    let max_allowed = record.monthly_income * t.max_insurance_ratio;
    let (status, deduction, excess) = if ratio <= t.max_insurance_ratio {
        (RuleStatus::Pass, 0, None)
    } else {
        (
            RuleStatus::Fail,
            t.deductions.insurance_spending_fail,
            Some(record.monthly_premium - max_allowed),
        )
    };

    Finding {
        category: RuleCategory::InsuranceSpending,
        status,
        deduction,
        metrics: Metrics::InsuranceSpending {
            monthly_premium: record.monthly_premium,
            ratio,
            max_allowed,
            excess,
        },
    }
}

struct CoverageBands {
    multiple: f64,
    warning_multiple: f64,
    warning_deduction: u32,
    fail_deduction: u32,
}

fn coverage(
    category: RuleCategory,
    coverage: f64,
    monthly_income: f64,
    bands: CoverageBands,
) -> Finding {
    let annual_income = monthly_income * 12.0;
    let recommended = annual_income * bands.multiple;
    let ratio = safe_ratio(coverage, annual_income);

    let (status, deduction) = if ratio >= bands.multiple {
        (RuleStatus::Pass, 0)
    } else if ratio >= bands.warning_multiple {
        (RuleStatus::Warning, bands.warning_deduction)
    } else {
        (RuleStatus::Fail, bands.fail_deduction)
    };
    let shortfall = (status != RuleStatus::Pass).then(|| recommended - coverage);

    Finding {
        category,
        status,
        deduction,
        metrics: Metrics::Coverage {
            coverage,
            ratio,
            required_multiple: bands.multiple,
            recommended,
            shortfall,
        },
    }
}

pub fn death_coverage(record: &InputRecord, t: &RuleThresholds) -> Finding {
    coverage(
        RuleCategory::DeathCoverage,
        record.death_coverage,
        record.monthly_income,
        CoverageBands {
            multiple: t.death_coverage_multiple,
            warning_multiple: t.death_coverage_warning_multiple,
            warning_deduction: t.deductions.death_coverage_warning,
            fail_deduction: t.deductions.death_coverage_fail,
        },
    )
}

pub fn critical_illness_coverage(record: &InputRecord, t: &RuleThresholds) -> Finding {
    coverage(
        RuleCategory::CriticalIllnessCoverage,
        record.ci_coverage,
        record.monthly_income,
        CoverageBands {
            multiple: t.ci_coverage_multiple,
            warning_multiple: t.ci_coverage_warning_multiple,
            warning_deduction: t.deductions.ci_coverage_warning,
            fail_deduction: t.deductions.ci_coverage_fail,
        },
    )
}

pub fn emergency_fund(record: &InputRecord, t: &RuleThresholds) -> Finding {
    let fund = record.emergency_fund;
    let months_covered = safe_ratio(fund, record.monthly_expenses);
    let minimum = record.monthly_expenses * t.min_emergency_months;
    let recommended = record.monthly_expenses * t.recommended_emergency_months;

    let (status, deduction, shortfall) = if months_covered >= t.recommended_emergency_months {
        (RuleStatus::Pass, 0, None)
    } else if months_covered >= t.min_emergency_months {
        (
            RuleStatus::Warning,
            t.deductions.emergency_fund_warning,
            Some(recommended - fund),
        )
    } else {
        (
            RuleStatus::Fail,
            t.deductions.emergency_fund_fail,
            Some(minimum - fund),
        )
    };

    Finding {
        category: RuleCategory::EmergencyFund,
        status,
        deduction,
        metrics: Metrics::EmergencyFund {
            fund,
            months_covered,
            minimum,
            recommended,
            shortfall,
        },
    }
}

pub fn retirement_savings(record: &InputRecord, t: &RuleThresholds) -> Finding {
    let ratio = safe_ratio(record.retirement_savings, record.monthly_income);
    let minimum = record.monthly_income * t.min_retirement_ratio;
    let (status, deduction, shortfall) = if ratio >= t.min_retirement_ratio {
        (RuleStatus::Pass, 0, None)
    } else {
        (
            RuleStatus::Warning,
            t.deductions.retirement_savings_warning,
            Some(minimum - record.retirement_savings),
        )
    };

    Finding {
        category: RuleCategory::RetirementSavings,
        status,
        deduction,
        metrics: Metrics::RetirementSavings {
            monthly_savings: record.retirement_savings,
            ratio,
            minimum,
            shortfall,
        },
    }
}

pub fn life_stage_alignment(record: &InputRecord, t: &RuleThresholds) -> Finding {
    let stage = t.life_stage(record.age);

    let advisory = match stage {
        LifeStage::FreshEntrant => Some(StageAdvisory::ProtectionFirst),
        LifeStage::StartingFamily if record.has_children => Some(StageAdvisory::FamilyProtection {
            education_fund: record.num_children as f64 * t.education_fund_per_child,
        }),
        LifeStage::PreRetiree => Some(StageAdvisory::RetirementShift),
        _ => None,
    };

    let triggered = match stage {
        LifeStage::FreshEntrant if record.product_type == t.investment_linked_product => Some((
            RuleStatus::Warning,
            t.deductions.life_stage_warning,
            StageTrigger::InvestmentLinkedProduct,
        )),
        LifeStage::PreRetiree if record.policy_term > t.pre_retiree_max_policy_term => Some((
            RuleStatus::Warning,
            t.deductions.life_stage_warning,
            StageTrigger::LongPolicyTerm {
                years: record.policy_term,
            },
        )),
        LifeStage::GoldenYears => {
            let projected_cost = record.monthly_premium * 12.0 * t.golden_years_projection_years;
            let savings_share = if record.total_savings != 0.0 {
                projected_cost / record.total_savings
            } else {
                0.0
            };
            (savings_share > t.golden_years_max_savings_share).then_some((
                RuleStatus::Fail,
                t.deductions.life_stage_fail,
                StageTrigger::PremiumDrain {
                    projected_cost,
                    savings_share,
                },
            ))
        }
        _ => None,
    };

    let (status, deduction, trigger) = match triggered {
        Some((status, deduction, trigger)) => (status, deduction, Some(trigger)),
        None => (RuleStatus::Pass, 0, None),
    };

    Finding {
        category: RuleCategory::LifeStageAlignment,
        status,
        deduction,
        metrics: Metrics::LifeStage {
            stage,
            trigger,
            advisory,
        },
    }
}

type Evaluator = fn(&InputRecord, &RuleThresholds) -> Finding;

/// Evaluation order; also the display order of the report.
pub const EVALUATORS: [Evaluator; 6] = [
    insurance_spending,
    death_coverage,
    critical_illness_coverage,
    emergency_fund,
    retirement_savings,
    life_stage_alignment,
];
