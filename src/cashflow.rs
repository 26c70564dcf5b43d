//! Cash flow projection and budget stress score

use crate::models::{ChartBreakdown, FinancialProfile, StressScore};
use crate::money::round_half_up;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Take-home share of gross assumed when no net income was given.
/// The advisory prompt's "85-90% of gross" guidance brackets this value.
pub const NET_INCOME_FALLBACK_RATIO: Decimal = dec!(0.87);

/// Net income if supplied, otherwise `gross * 0.87`.
pub fn effective_net_income(profile: &FinancialProfile) -> Decimal {
    profile
        .net_monthly_income
        .unwrap_or(profile.gross_monthly_income * NET_INCOME_FALLBACK_RATIO)
}

pub struct CashFlowProjector;

impl CashFlowProjector {
    /// Always produces a breakdown, even for an all-zero profile.
    /// Overspend is floored out of `remaining` and shows up in the stress
    /// score instead.
    pub fn project(profile: &FinancialProfile) -> ChartBreakdown {
        let net = effective_net_income(profile);

        ChartBreakdown {
            taxes: (profile.gross_monthly_income - net).max(Decimal::ZERO),
            expenses: profile.monthly_expenses,
            savings: profile.total_savings,
            remaining: (net - profile.monthly_expenses - profile.total_savings)
                .max(Decimal::ZERO),
        }
    }
}

impl StressScore {
    /// `None` when effective net income is zero.
    pub fn score(profile: &FinancialProfile) -> Option<StressScore> {
        let net = effective_net_income(profile);
        if net <= Decimal::ZERO {
            return None;
        }

        let ratio = profile
            .monthly_expenses
            .checked_div(net)
            .unwrap_or(Decimal::ONE)
            .min(Decimal::ONE);

        let percent = round_half_up(ratio * dec!(100), 0)
            .to_u8()
            .unwrap_or(StressScore::MAX);

        Some(StressScore::new(percent))
    }
}
