mod engine;
mod format;
mod record;
mod rules;
mod thresholds;
mod types;

pub use engine::{Assessment, RuleEngine, evaluate, evaluate_fields};
pub use format::{format_currency, format_percent};
pub use record::{DEFAULT_TOTAL_SAVINGS, RecordFields, parse_float_prefix, parse_int_prefix};
pub use rules::{Finding, Metrics, StageAdvisory, StageTrigger};
pub use thresholds::{Deductions, LIFE_STAGE_BANDS, LifeStageBand, RuleThresholds, ScoreBands};
pub use types::{
    ComplianceReport, InputRecord, LifeStage, OverallStatus, RuleCategory, RuleResult, RuleStatus,
};
