use tracing::debug;

use super::format::{render, render_advisory};
use super::record::RecordFields;
use super::rules::{EVALUATORS, Finding, Metrics};
use super::thresholds::RuleThresholds;
use super::types::{ComplianceReport, InputRecord, LifeStage};

const STARTING_SCORE: i32 = 100;

/// Numeric outcome of an evaluation, before any text is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub findings: Vec<Finding>,
    /// Unclamped; may be negative.
    pub raw_score: i32,
}

impl Assessment {
    pub fn score(&self) -> u32 {
        self.raw_score.clamp(0, STARTING_SCORE) as u32
    }

    pub fn life_stage(&self) -> LifeStage {
        self.findings
            .iter()
            .find_map(|finding| match finding.metrics {
                Metrics::LifeStage { stage, .. } => Some(stage),
                _ => None,
            })
            .unwrap_or(LifeStage::Unknown)
    }
}

/// Accumulator for a single evaluation. Built fresh for every call.
#[derive(Debug)]
struct ScoreCard {
    findings: Vec<Finding>,
    score: i32,
}

impl ScoreCard {
    fn new() -> Self {
        Self {
            findings: Vec::with_capacity(EVALUATORS.len()),
            score: STARTING_SCORE,
        }
    }

    fn record(&mut self, finding: Finding) {
        self.score -= finding.deduction as i32;
        self.findings.push(finding);
    }

    fn finish(self) -> Assessment {
        Assessment {
            findings: self.findings,
            raw_score: self.score,
        }
    }
}

/// Evaluates household records against a fixed set of guideline thresholds.
/// Holds no per-call state, so one instance can serve concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine {
    thresholds: RuleThresholds,
}

impl RuleEngine {
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    pub fn assess(&self, record: &InputRecord) -> Assessment {
        let mut card = ScoreCard::new();
        for evaluate in EVALUATORS {
            card.record(evaluate(record, &self.thresholds));
        }
        card.finish()
    }

    pub fn evaluate(&self, record: &InputRecord) -> ComplianceReport {
        let assessment = self.assess(record);
        let score = assessment.score();
        let status = self.thresholds.score_bands.classify(score as i32);

        let results = assessment
            .findings
            .iter()
            .map(|finding| render(finding, &self.thresholds))
            .collect();
        let advisories = assessment
            .findings
            .iter()
            .filter_map(|finding| match &finding.metrics {
                Metrics::LifeStage {
                    advisory: Some(advisory),
                    ..
                } => Some(render_advisory(advisory, &self.thresholds)),
                _ => None,
            })
            .collect();

        debug!(
            raw_score = assessment.raw_score,
            score,
            ?status,
            "household record evaluated"
        );

        ComplianceReport {
            results,
            score,
            status,
            life_stage: assessment.life_stage(),
            advisories,
        }
    }

    pub fn evaluate_fields(&self, fields: &RecordFields) -> ComplianceReport {
        self.evaluate(&InputRecord::from(fields))
    }
}

pub fn evaluate(record: &InputRecord) -> ComplianceReport {
    RuleEngine::default().evaluate(record)
}

pub fn evaluate_fields(fields: &RecordFields) -> ComplianceReport {
    RuleEngine::default().evaluate_fields(fields)
}
