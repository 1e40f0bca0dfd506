use super::rules::{Finding, Metrics, StageAdvisory, StageTrigger};
use super::thresholds::RuleThresholds;
use super::types::{RuleCategory, RuleResult, RuleStatus};

/// Whole-dollar amount with thousands separators, rounded half away from zero.
/// Negative amounts that round to zero keep their sign ("-0").
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `ratio` as a percentage with one decimal (0.156 -> "15.6%").
pub fn format_percent(ratio: f64) -> String {
    format!("{}%", one_decimal(ratio * 100.0))
}

/// One decimal place, exact ties rounded away from zero (7.25 -> "7.3").
fn one_decimal(value: f64) -> String {
    // A tie at the hundredths is representable only when 4 * |value| is odd.
    let quarters = value.abs() * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (value.abs() * 10.0).ceil();
        let sign = if value.is_sign_negative() { "-" } else { "" };
        return format!("{sign}{}.{}", (tenths / 10.0).trunc(), tenths % 10.0);
    }
    format!("{value:.1}")
}

fn whole(value: f64) -> String {
    format!("{value:.0}")
}

pub fn render(finding: &Finding, t: &RuleThresholds) -> RuleResult {
    let (message, detail, suggestion) = match &finding.metrics {
        Metrics::InsuranceSpending {
            monthly_premium,
            ratio,
            max_allowed,
            excess,
        } => {
            let message = format!(
                "Premium ${}/month = {} of income",
                format_currency(*monthly_premium),
                format_percent(*ratio)
            );
            let cap = format_percent(t.max_insurance_ratio);
            match excess {
                None => (message, format!("Within MoneySense guideline of max {cap}"), None),
                Some(excess) => (
                    message,
                    format!(
                        "Exceeds MoneySense guideline of max {cap} (${}/month)",
                        format_currency(*max_allowed)
                    ),
                    Some(format!(
                        "Reduce premium by ${} or consider extending policy term to lower monthly cost",
                        format_currency(*excess)
                    )),
                ),
            }
        }
        Metrics::Coverage {
            coverage,
            ratio,
            required_multiple,
            recommended,
            shortfall,
        } => {
            let message = format!(
                "Coverage ${} = {}x annual income",
                format_currency(*coverage),
                one_decimal(*ratio)
            );
            let multiple = whole(*required_multiple);
            let recommended = format_currency(*recommended);
            let shortfall = format_currency(shortfall.unwrap_or_default());
            let critical_illness = finding.category == RuleCategory::CriticalIllnessCoverage;
            match finding.status {
                RuleStatus::Pass => (
                    message,
                    format!("Meets MoneySense guideline of {multiple}x annual income"),
                    None,
                ),
                RuleStatus::Warning => (
                    message,
                    format!("Below MoneySense guideline of {multiple}x (${recommended})"),
                    Some(if critical_illness {
                        format!("Consider adding CI rider for ${shortfall} additional coverage")
                    } else {
                        format!(
                            "Consider increasing coverage by ${shortfall} to meet recommended protection level"
                        )
                    }),
                ),
                RuleStatus::Fail => (
                    message,
                    format!(
                        "Significantly below MoneySense guideline of {multiple}x (${recommended})"
                    ),
                    Some(if critical_illness {
                        format!(
                            "Increase CI coverage by ${shortfall}. Consider standalone CI plan or rider attachment"
                        )
                    } else {
                        format!(
                            "Increase coverage by ${shortfall}. Consider term life insurance for affordable protection"
                        )
                    }),
                ),
            }
        }
        Metrics::EmergencyFund {
            fund,
            months_covered,
            minimum,
            recommended,
            shortfall,
        } => {
            let message = format!(
                "Fund ${} = {} months expenses",
                format_currency(*fund),
                one_decimal(*months_covered)
            );
            let min_months = whole(t.min_emergency_months);
            let rec_months = whole(t.recommended_emergency_months);
            let shortfall = format_currency(shortfall.unwrap_or_default());
            match finding.status {
                RuleStatus::Pass => (
                    message,
                    format!("Exceeds MoneySense recommended {rec_months} months coverage"),
                    None,
                ),
                RuleStatus::Warning => (
                    message,
                    format!(
                        "Meets minimum {min_months} months but below recommended {rec_months} months (${})",
                        format_currency(*recommended)
                    ),
                    Some(format!(
                        "Build emergency fund by ${shortfall} before increasing insurance premiums"
                    )),
                ),
                RuleStatus::Fail => (
                    message,
                    format!(
                        "Below MoneySense minimum {min_months} months (${})",
                        format_currency(*minimum)
                    ),
                    Some(format!(
                        "Prioritize building emergency fund by ${shortfall} before committing to higher premiums"
                    )),
                ),
            }
        }
        Metrics::RetirementSavings {
            monthly_savings,
            ratio,
            minimum,
            shortfall,
        } => {
            let message = format!(
                "Saving ${}/month = {} of income",
                format_currency(*monthly_savings),
                format_percent(*ratio)
            );
            let floor = format_percent(t.min_retirement_ratio);
            match shortfall {
                None => (message, format!("Meets MoneySense guideline of min {floor}"), None),
                Some(shortfall) => (
                    message,
                    format!(
                        "Below MoneySense guideline of min {floor} (${}/month)",
                        format_currency(*minimum)
                    ),
                    Some(format!(
                        "Allocate ${}/month more to retirement. Consider rebalancing insurance premium vs retirement savings",
                        format_currency(*shortfall)
                    )),
                ),
            }
        }
        Metrics::LifeStage { stage, trigger, .. } => {
            let message = stage.label().to_string();
            match trigger {
                None => (
                    message,
                    "Recommendation aligns with MoneySense life stage guidelines".to_string(),
                    None,
                ),
                Some(StageTrigger::InvestmentLinkedProduct) => (
                    message,
                    "Investment-linked products may not be age-appropriate".to_string(),
                    Some(
                        "MoneySense recommends prioritizing basic protection coverage first"
                            .to_string(),
                    ),
                ),
                Some(StageTrigger::LongPolicyTerm { years }) => (
                    message,
                    format!("Policy term {years} years extends beyond typical retirement age"),
                    Some(format!(
                        "Consider shorter term ({} years) or whole life with reduced coverage",
                        t.pre_retiree_max_policy_term
                    )),
                ),
                Some(StageTrigger::PremiumDrain {
                    projected_cost,
                    savings_share,
                }) => (
                    message,
                    format!(
                        "Premium cost (${} over {} years) = {} of retirement savings",
                        format_currency(*projected_cost),
                        whole(t.golden_years_projection_years),
                        format_percent(*savings_share)
                    ),
                    Some(format!(
                        "MoneySense recommends max {} of retirement funds for insurance. Focus on MediShield Life supplementation instead",
                        format_percent(t.golden_years_max_savings_share)
                    )),
                ),
            }
        }
    };

    RuleResult {
        category: finding.category,
        status: finding.status,
        title: finding.category.title().to_string(),
        message,
        detail,
        suggestion,
        deduction: finding.deduction,
    }
}

pub fn render_advisory(advisory: &StageAdvisory, t: &RuleThresholds) -> String {
    match advisory {
        StageAdvisory::ProtectionFirst => {
            "MoneySense recommends: Protection (term life + hospitalization) before investment products"
                .to_string()
        }
        StageAdvisory::FamilyProtection { education_fund } => format!(
            "Family protection priority: Income replacement ({}x) + Education fund (${}) + Mortgage protection",
            whole(t.death_coverage_multiple),
            format_currency(*education_fund)
        ),
        StageAdvisory::RetirementShift => {
            "MoneySense suggests: Reduce protection coverage, increase retirement savings, optimize CPF LIFE"
                .to_string()
        }
    }
}
