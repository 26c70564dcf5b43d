//! Tax Estimator
//!
//! Flat-rate monthly tax estimate. The rates are illustrative constants for
//! budgeting guidance, not any jurisdiction's actual tax law: there are no
//! brackets, credits or caps, and every component is simply `gross * rate`.

use crate::models::{FinancialProfile, MaritalStatus, TaxBreakdown};
use crate::money::round_half_up;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const FEDERAL_BASE_RATE: Decimal = dec!(0.17);
/// Subtracted from the federal base rate for married filers.
pub const MARRIED_FEDERAL_ADJUSTMENT: Decimal = dec!(0.02);
pub const FICA_RATE: Decimal = dec!(0.0765);
pub const STATE_RATE: Decimal = dec!(0.053);
pub const LOCAL_RATE: Decimal = dec!(0.0359);

pub struct TaxEstimator;

impl TaxEstimator {
    /// `None` means "not computable yet" (no gross income), not an error.
    pub fn estimate(profile: &FinancialProfile) -> Option<TaxBreakdown> {
        let gross = profile.gross_monthly_income;
        if gross <= Decimal::ZERO {
            return None;
        }

        // Out-of-range amounts are treated as not computable.
        let federal = gross.checked_mul(Self::federal_rate(profile.marital_status))?;
        let fica = gross.checked_mul(FICA_RATE)?;
        let state = gross.checked_mul(STATE_RATE)?;
        let local = gross.checked_mul(LOCAL_RATE)?;
        let total_tax = federal.checked_add(fica)?.checked_add(state)?.checked_add(local)?;
        let effective_rate = total_tax.checked_mul(dec!(100))?.checked_div(gross)?;

        Some(TaxBreakdown {
            federal,
            fica,
            state,
            local,
            total_tax,
            effective_rate: round_half_up(effective_rate, 2),
            net_after_tax: gross - total_tax,
        })
    }

    pub fn federal_rate(status: MaritalStatus) -> Decimal {
        match status {
            MaritalStatus::Married => FEDERAL_BASE_RATE - MARRIED_FEDERAL_ADJUSTMENT,
            MaritalStatus::Single | MaritalStatus::Unknown => FEDERAL_BASE_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(gross: Decimal, status: MaritalStatus) -> FinancialProfile {
        FinancialProfile {
            gross_monthly_income: gross,
            marital_status: status,
            ..FinancialProfile::default()
        }
    }

    #[test]
    fn test_zero_income_is_not_computable() {
        let profile = create_test_profile(Decimal::ZERO, MaritalStatus::Single);
        assert!(TaxEstimator::estimate(&profile).is_none());
    }

    #[test]
    fn test_single_filer_golden_values() {
        let profile = create_test_profile(dec!(3000), MaritalStatus::Single);
        let tax = TaxEstimator::estimate(&profile).unwrap();

        assert_eq!(tax.federal, dec!(510));
        assert_eq!(tax.fica, dec!(229.5));
        assert_eq!(tax.state, dec!(159));
        assert_eq!(tax.local, dec!(107.7));
        assert_eq!(tax.total_tax, dec!(1006.2));
        assert_eq!(tax.effective_rate, dec!(33.54));
        assert_eq!(tax.net_after_tax, dec!(1993.8));
    }

    #[test]
    fn test_married_filer_gets_reduced_federal_rate() {
        let profile = create_test_profile(dec!(3000), MaritalStatus::Married);
        let tax = TaxEstimator::estimate(&profile).unwrap();

        assert_eq!(tax.federal, dec!(450));
        assert_eq!(tax.effective_rate, dec!(31.54));
    }

    #[test]
    fn test_unknown_status_taxed_as_single() {
        let single = create_test_profile(dec!(2000), MaritalStatus::Single);
        let unknown = create_test_profile(dec!(2000), MaritalStatus::Unknown);
        assert_eq!(TaxEstimator::estimate(&single), TaxEstimator::estimate(&unknown));
    }

    #[test]
    fn test_overflowing_income_is_not_computable() {
        let profile = create_test_profile(Decimal::MAX, MaritalStatus::Single);
        assert!(TaxEstimator::estimate(&profile).is_none());

        let gross = dec!(10000000000000000000000000000);
        let profile = create_test_profile(gross, MaritalStatus::Married);
        assert!(TaxEstimator::estimate(&profile).is_none());
    }

    #[test]
    fn test_components_sum_exactly() {
        let incomes = [dec!(0.01), dec!(1), dec!(123.45), dec!(1499.99), dec!(1234567.89)];
        let statuses = [MaritalStatus::Single, MaritalStatus::Married, MaritalStatus::Unknown];

        for gross in incomes {
            for status in statuses {
                let tax = TaxEstimator::estimate(&create_test_profile(gross, status)).unwrap();

                assert_eq!(tax.federal + tax.fica + tax.state + tax.local, tax.total_tax);
                assert_eq!(tax.federal, gross * TaxEstimator::federal_rate(status));
                assert_eq!(
                    tax.effective_rate,
                    round_half_up(dec!(100) * tax.total_tax / gross, 2)
                );
                assert_eq!(tax.net_after_tax, gross - tax.total_tax);
            }
        }
    }
}
