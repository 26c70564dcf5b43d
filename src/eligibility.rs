//! Assistance Eligibility Classifier
//!
//! Decides whether to surface support resources (food pantry, aid office)
//! next to the budget report. Four independent threshold checks are ORed:
//! - Low income: gross income between 0 and 1500 (exclusive)
//! - High expense burden: expenses take 75% or more of effective net income
//! - Negligible savings: 50 or less saved
//! - Unemployed
//!
//! The rule is deliberately coarse and biased towards false positives:
//! showing a pantry link to someone who does not need it costs nothing,
//! hiding it from someone who does is the failure we care about. Tightening
//! any threshold is a behaviour change.

use crate::cashflow::effective_net_income;
use crate::models::FinancialProfile;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

pub const LOW_INCOME_CEILING: Decimal = dec!(1500);
pub const EXPENSE_BURDEN_RATIO: Decimal = dec!(0.75);
pub const NEGLIGIBLE_SAVINGS: Decimal = dec!(50);

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EligibilitySignal {
    LowIncome,
    HighExpenseBurden,
    NegligibleSavings,
    Unemployed,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SupportResource {
    pub name: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

/// Resources surfaced when a profile is flagged
pub const SUPPORT_RESOURCES: &[SupportResource] = &[SupportResource {
    name: "BMCC Panther Pantry",
    description: "Based on your current budget, you may qualify for campus food assistance.",
    url: "https://www.bmcc.cuny.edu/student-affairs/panther-pantry/",
}];

/// Eligibility decision plus the heuristics that triggered it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AssistanceAssessment {
    pub eligible: bool,
    pub signals: Vec<EligibilitySignal>,
    pub resources: Vec<SupportResource>,
}

pub struct AssistanceEligibilityClassifier;

impl AssistanceEligibilityClassifier {
    pub fn is_eligible(profile: &FinancialProfile) -> bool {
        !Self::signals(profile).is_empty()
    }

    /// Recomputed per submission; never cached.
    pub fn assess(profile: &FinancialProfile) -> AssistanceAssessment {
        let signals = Self::signals(profile);
        let eligible = !signals.is_empty();

        AssistanceAssessment {
            eligible,
            resources: if eligible {
                SUPPORT_RESOURCES.to_vec()
            } else {
                Vec::new()
            },
            signals,
        }
    }

    fn signals(profile: &FinancialProfile) -> Vec<EligibilitySignal> {
        let mut signals = Vec::with_capacity(4);

        if is_low_income(profile) {
            signals.push(EligibilitySignal::LowIncome);
        }
        if has_high_expense_burden(profile) {
            signals.push(EligibilitySignal::HighExpenseBurden);
        }
        if profile.total_savings <= NEGLIGIBLE_SAVINGS {
            signals.push(EligibilitySignal::NegligibleSavings);
        }
        if !profile.employed {
            signals.push(EligibilitySignal::Unemployed);
        }

        signals
    }
}

fn is_low_income(profile: &FinancialProfile) -> bool {
    let gross = profile.gross_monthly_income;
    gross > Decimal::ZERO && gross < LOW_INCOME_CEILING
}

fn has_high_expense_burden(profile: &FinancialProfile) -> bool {
    let net = effective_net_income(profile);
    net > Decimal::ZERO && profile.monthly_expenses >= EXPENSE_BURDEN_RATIO * net
}
