//! Campus Compass budget advisor
//!
//! Turns a student's monthly financial picture into a budget report:
//! - Estimates taxes with flat federal/FICA/state/local rates
//! - Projects where each dollar goes for the breakdown chart
//! - Scores financial stress from the expense-to-income ratio
//! - Flags possible eligibility for campus assistance programs
//! - Requests and parses personalized advice from the advisory service
//! - Runs the MoneyMate chat with one reply in flight at a time
//!
//! PIPELINE:
//! INTAKE → PROFILE → { TAX, CASH FLOW, STRESS, ELIGIBILITY }
//!        → PROMPT → ADVISORY → REPORT

pub mod advisory;
pub mod api;
pub mod cashflow;
pub mod chat;
pub mod client;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod intake;
pub mod models;
pub mod money;
pub mod pipeline;
pub mod tax;

#[cfg(test)]
mod test_support;

pub use error::{AdvisorError, ChatError, Result};

// Re-export common types
pub use models::*;
pub use advisory::{AdvisoryRequestBuilder, AdvisoryResponseParser};
pub use cashflow::CashFlowProjector;
pub use chat::{ChatSession, ChatSessionController};
pub use client::{AdvisoryTransport, HttpAdvisoryClient};
pub use config::AppConfig;
pub use eligibility::AssistanceEligibilityClassifier;
pub use pipeline::{BudgetAdvisor, BudgetReport};
pub use tax::TaxEstimator;
