//! Intake form validation
//!
//! Raw form fields become a [`FinancialProfile`] here and nowhere else.
//! Everything downstream assumes amounts are non-negative numbers.

use crate::models::{FinancialProfile, MaritalStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest amount accepted for any monthly field.
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// A form field as submitted: browsers send text, API clients may send numbers
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    fn as_text(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.trim().to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeForm {
    #[serde(default)]
    pub employed: Option<bool>,
    #[serde(default)]
    pub marital_status: Option<String>,
    /// Gross monthly income
    #[serde(default)]
    pub income: Option<FieldValue>,
    #[serde(default)]
    pub net_income: Option<FieldValue>,
    #[serde(default)]
    pub expenses: Option<FieldValue>,
    #[serde(default)]
    pub debts: Option<FieldValue>,
    #[serde(default)]
    pub savings: Option<FieldValue>,
    #[serde(default)]
    pub goal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    Missing { field: &'static str },
    NotANumber { field: &'static str, value: String },
    Negative { field: &'static str },
    TooLarge { field: &'static str },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing { field } => write!(f, "{} is required", field),
            FieldError::NotANumber { field, value } => {
                write!(f, "{} must be a number (got {:?})", field, value)
            }
            FieldError::Negative { field } => write!(f, "{} cannot be negative", field),
            FieldError::TooLarge { field } => {
                write!(f, "{} cannot exceed {}", field, crate::money::format_usd(MAX_AMOUNT))
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid intake form: {}", describe(.errors))]
pub struct IntakeError {
    pub errors: Vec<FieldError>,
}

impl TryFrom<IntakeForm> for FinancialProfile {
    type Error = IntakeError;

    fn try_from(form: IntakeForm) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let gross = required_amount("income", form.income.as_ref(), &mut errors);
        let net = optional_amount("net_income", form.net_income.as_ref(), &mut errors);
        let expenses = required_amount("expenses", form.expenses.as_ref(), &mut errors);
        let debt = required_amount("debts", form.debts.as_ref(), &mut errors);
        let savings = optional_amount("savings", form.savings.as_ref(), &mut errors);

        if !errors.is_empty() {
            return Err(IntakeError { errors });
        }

        Ok(FinancialProfile {
            employed: form.employed.unwrap_or(true),
            marital_status: parse_marital_status(form.marital_status.as_deref()),
            gross_monthly_income: gross.unwrap_or_default(),
            net_monthly_income: net,
            monthly_expenses: expenses.unwrap_or_default(),
            total_debt: debt.unwrap_or_default(),
            total_savings: savings.unwrap_or_default(),
            goal_text: form.goal.map(|g| g.trim().to_string()).unwrap_or_default(),
        })
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn parse_marital_status(raw: Option<&str>) -> MaritalStatus {
    match raw.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("single") => MaritalStatus::Single,
        Some("married") => MaritalStatus::Married,
        _ => MaritalStatus::Unknown,
    }
}

fn required_amount(
    field: &'static str,
    value: Option<&FieldValue>,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    let amount = optional_amount(field, value, errors);
    if amount.is_none() && !errors.iter().any(|e| error_field(e) == field) {
        errors.push(FieldError::Missing { field });
    }
    amount
}

/// Blank counts as absent.
fn optional_amount(
    field: &'static str,
    value: Option<&FieldValue>,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    let text = value.map(FieldValue::as_text)?;
    let cleaned: String = text
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.trim().is_empty() {
        return None;
    }

    let amount = match Decimal::from_str(cleaned.trim())
        .or_else(|_| Decimal::from_scientific(cleaned.trim()))
    {
        Ok(amount) => amount,
        Err(_) => {
            errors.push(FieldError::NotANumber { field, value: text });
            return None;
        }
    };

    if amount.is_sign_negative() && !amount.is_zero() {
        errors.push(FieldError::Negative { field });
        return None;
    }

    if amount > MAX_AMOUNT {
        errors.push(FieldError::TooLarge { field });
        return None;
    }

    Some(amount)
}

fn error_field(error: &FieldError) -> &'static str {
    match error {
        FieldError::Missing { field }
        | FieldError::NotANumber { field, .. }
        | FieldError::Negative { field }
        | FieldError::TooLarge { field } => field,
    }
}
