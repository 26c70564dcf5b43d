//! Core data models for the budget advisor

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    #[default]
    Unknown,
}

/// Display tier of the budget stress score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
}

/// Whether an advisory response carried any of the section markers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Structured,
    Unstructured,
}

//
// ================= Profile =================
//

/// One intake submission. Monetary fields are already validated
/// non-negative by the time a profile exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialProfile {
    pub employed: bool,
    pub marital_status: MaritalStatus,
    pub gross_monthly_income: Decimal,
    /// Absent is a valid state and is not the same as zero.
    pub net_monthly_income: Option<Decimal>,
    pub monthly_expenses: Decimal,
    pub total_debt: Decimal,
    pub total_savings: Decimal,
    pub goal_text: String,
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            employed: true,
            marital_status: MaritalStatus::Unknown,
            gross_monthly_income: Decimal::ZERO,
            net_monthly_income: None,
            monthly_expenses: Decimal::ZERO,
            total_debt: Decimal::ZERO,
            total_savings: Decimal::ZERO,
            goal_text: String::new(),
        }
    }
}

//
// ================= Tax =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxBreakdown {
    pub federal: Decimal,
    pub fica: Decimal,
    pub state: Decimal,
    pub local: Decimal,
    pub total_tax: Decimal,
    /// Percentage of gross income, rounded half-up to two decimals.
    pub effective_rate: Decimal,
    pub net_after_tax: Decimal,
}

//
// ================= Cash Flow =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartBreakdown {
    pub taxes: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
    pub remaining: Decimal,
}

/// One slice of the dashboard chart, in legend order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSegment {
    pub label: &'static str,
    pub color: &'static str,
    pub value: Decimal,
}

impl ChartBreakdown {
    pub fn segments(&self) -> [ChartSegment; 4] {
        [
            ChartSegment { label: "Taxes", color: "#ef4444", value: self.taxes },
            ChartSegment { label: "Expenses", color: "#3b82f6", value: self.expenses },
            ChartSegment { label: "Savings", color: "#22c55e", value: self.savings },
            ChartSegment { label: "Remaining", color: "#facc15", value: self.remaining },
        ]
    }
}

/// Share of effective net income consumed by expenses, 0..=100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct StressScore(u8);

impl StressScore {
    pub const MAX: u8 = 100;

    /// Values above 100 are clamped.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn level(self) -> StressLevel {
        StressLevel::classify(self.0)
    }
}

impl StressLevel {
    /// `<60` low, `60..=84` moderate, `>=85` high.
    pub fn classify(score: u8) -> Self {
        match score {
            0..=59 => StressLevel::Low,
            60..=84 => StressLevel::Moderate,
            _ => StressLevel::High,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StressLevel::Low => "#22c55e",
            StressLevel::Moderate => "#facc15",
            StressLevel::High => "#ef4444",
        }
    }
}

//
// ================= Advisory =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvisoryResult {
    pub summary: String,
    /// Presentation order; each tip stands on its own.
    pub tips: Vec<String>,
    pub disclaimer: String,
    pub format: ResponseFormat,
}

impl AdvisoryResult {
    /// The whole reply kept as a summary when no section markers exist.
    pub fn unstructured(text: &str) -> Self {
        Self {
            summary: text.trim().to_string(),
            tips: Vec::new(),
            disclaimer: String::new(),
            format: ResponseFormat::Unstructured,
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Unknown => "Not specified",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StressLevel::Low => "Low stress",
            StressLevel::Moderate => "Moderate stress",
            StressLevel::High => "High stress",
        };
        write!(f, "{}", s)
    }
}
