//! Budget pipeline
//!
//! PROFILE → { TAX, CASH FLOW, STRESS, ELIGIBILITY, PROMPT } → ADVISORY → REPORT
//!
//! The four calculators are pure and independent. The prompt goes out to the
//! advisory service and the reply is parsed. A failed advisory call falls
//! back to canned educational guidance, so a report is always produced.

use crate::advisory::{annotate, AdvisoryRequestBuilder, AdvisoryResponseParser, AnnotatedAdvisory};
use crate::cashflow::{effective_net_income, CashFlowProjector};
use crate::client::AdvisoryTransport;
use crate::eligibility::{AssistanceAssessment, AssistanceEligibilityClassifier};
use crate::error::ChatErrorKind;
use crate::tax::TaxEstimator;
use crate::models::{
    AdvisoryResult, ChartBreakdown, FinancialProfile, ResponseFormat, StressLevel, StressScore,
    TaxBreakdown,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorySource {
    Service,
    Fallback,
}

/// Everything derived from a profile without I/O
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetSnapshot {
    pub tax: Option<TaxBreakdown>,
    pub effective_net_income: Decimal,
    pub chart: ChartBreakdown,
    pub stress_score: Option<StressScore>,
    pub stress_level: Option<StressLevel>,
    pub assistance: AssistanceAssessment,
}

impl BudgetSnapshot {
    pub fn compute(profile: &FinancialProfile) -> Self {
        let stress_score = StressScore::score(profile);

        Self {
            tax: TaxEstimator::estimate(profile),
            effective_net_income: effective_net_income(profile),
            chart: CashFlowProjector::project(profile),
            stress_score,
            stress_level: stress_score.map(StressScore::level),
            assistance: AssistanceEligibilityClassifier::assess(profile),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdvisorySection {
    pub result: AdvisoryResult,
    pub highlights: AnnotatedAdvisory,
    pub source: AdvisorySource,
    /// Why the fallback was used, when it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ChatErrorKind>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetReport {
    #[serde(flatten)]
    pub snapshot: BudgetSnapshot,
    pub advisory: AdvisorySection,
}

/// Canned guidance shown when the advisory service cannot be reached
pub fn fallback_advisory() -> AdvisoryResult {
    AdvisoryResult {
        summary: "Based on your inputs, here's an educational summary.".to_string(),
        tips: vec![
            "Consider building a small emergency fund.".to_string(),
            "Reduce variable spending by 10%.".to_string(),
            "Pay off high-interest debt first.".to_string(),
        ],
        disclaimer: "This information is for educational purposes only and not financial advice."
            .to_string(),
        format: ResponseFormat::Structured,
    }
}

/// Runs the full intake pipeline against an advisory transport
pub struct BudgetAdvisor {
    transport: Arc<dyn AdvisoryTransport>,
}

impl BudgetAdvisor {
    pub fn new(transport: Arc<dyn AdvisoryTransport>) -> Self {
        Self { transport }
    }

    /// Never fails: advisory problems degrade to the fallback section.
    pub async fn analyze(&self, profile: &FinancialProfile) -> BudgetReport {
        let start_time = Instant::now();

        let snapshot = BudgetSnapshot::compute(profile);
        debug!(
            tax_computable = snapshot.tax.is_some(),
            stress = ?snapshot.stress_score,
            eligible = snapshot.assistance.eligible,
            "Budget snapshot computed"
        );

        let prompt = AdvisoryRequestBuilder::build_prompt(profile);

        let (result, source, failure) = match self.transport.complete(&prompt).await {
            Ok(reply) => match reply.answer.filter(|a| !a.trim().is_empty()) {
                Some(text) => (AdvisoryResponseParser::parse(&text), AdvisorySource::Service, None),
                None => {
                    warn!("Advisory service returned no answer, using fallback guidance");
                    (fallback_advisory(), AdvisorySource::Fallback, None)
                }
            },
            Err(err) => {
                warn!(
                    kind = ?err.kind(),
                    "Advisory request failed, using fallback guidance: {}",
                    err
                );
                (fallback_advisory(), AdvisorySource::Fallback, Some(err.kind()))
            }
        };

        info!(
            source = ?source,
            format = ?result.format,
            tips = result.tips.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Budget report composed"
        );

        BudgetReport {
            snapshot,
            advisory: AdvisorySection {
                highlights: annotate(&result),
                result,
                source,
                failure,
            },
        }
    }
}
