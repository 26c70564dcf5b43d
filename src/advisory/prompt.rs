//! Advisory prompt construction

use super::{DISCLAIMER_HEADER, SUMMARY_HEADER, TIPS_HEADER};
use crate::models::FinancialProfile;
use crate::money::format_usd;

pub struct AdvisoryRequestBuilder;

impl AdvisoryRequestBuilder {
    /// Render a profile as the natural-language request sent to the
    /// advisory service.
    pub fn build_prompt(profile: &FinancialProfile) -> String {
        let employment = if profile.employed {
            "Employed"
        } else {
            "Not currently employed"
        };

        let net_income = match profile.net_monthly_income {
            Some(net) => format_usd(net),
            None => "Not provided. Estimate take-home pay as 85-90% of gross income.".to_string(),
        };

        let goal = match profile.goal_text.trim() {
            "" => "Not specified",
            goal => goal,
        };

        format!(
            r#"You are MoneyMate, a friendly budgeting coach for college students.

Here is a student's monthly financial snapshot:
- Employment: {}
- Marital status: {}
- Gross monthly income: {}
- Net monthly income: {}
- Monthly expenses: {}
- Total debt: {}
- Total savings: {}
- Main financial goal: {}

Give practical, educational budgeting guidance tailored to this student.
Respond using exactly this format and nothing else:

{} <one sentence describing their overall financial situation>
{}
1. <actionable tip>
2. <actionable tip>
3. <actionable tip>
{} <one line reminding them this is educational guidance, not financial advice>"#,
            employment,
            profile.marital_status,
            format_usd(profile.gross_monthly_income),
            net_income,
            format_usd(profile.monthly_expenses),
            format_usd(profile.total_debt),
            format_usd(profile.total_savings),
            goal,
            SUMMARY_HEADER,
            TIPS_HEADER,
            DISCLAIMER_HEADER,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::AdvisoryResponseParser;
    use crate::models::MaritalStatus;
    use rust_decimal_macros::dec;

    fn create_test_profile() -> FinancialProfile {
        FinancialProfile {
            employed: true,
            marital_status: MaritalStatus::Single,
            gross_monthly_income: dec!(1750),
            net_monthly_income: Some(dec!(1330)),
            monthly_expenses: dec!(850),
            total_debt: dec!(3500),
            total_savings: dec!(300),
            goal_text: "Save for a laptop".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_profile() {
        let prompt = AdvisoryRequestBuilder::build_prompt(&create_test_profile());

        assert!(prompt.contains("Gross monthly income: $1,750.00"));
        assert!(prompt.contains("Net monthly income: $1,330.00"));
        assert!(prompt.contains("Total debt: $3,500.00"));
        assert!(prompt.contains("Marital status: Single"));
        assert!(prompt.contains("Save for a laptop"));
        assert!(!prompt.contains("85-90%"));
    }

    #[test]
    fn test_missing_net_income_requests_estimate() {
        let profile = FinancialProfile {
            net_monthly_income: None,
            employed: false,
            goal_text: "   ".to_string(),
            ..create_test_profile()
        };
        let prompt = AdvisoryRequestBuilder::build_prompt(&profile);

        assert!(prompt.contains("85-90% of gross"));
        assert!(prompt.contains("Not currently employed"));
        assert!(prompt.contains("Main financial goal: Not specified"));
    }

    #[test]
    fn test_prompt_requests_the_parsed_sections() {
        let prompt = AdvisoryRequestBuilder::build_prompt(&create_test_profile());

        for header in [SUMMARY_HEADER, TIPS_HEADER, DISCLAIMER_HEADER] {
            assert!(prompt.contains(header));
        }

        // The template section itself parses as a structured reply
        let template = &prompt[prompt.find(SUMMARY_HEADER).unwrap()..];
        let parsed = AdvisoryResponseParser::parse(template);
        assert_eq!(parsed.tips.len(), 3);
        assert!(!parsed.summary.is_empty());
        assert!(!parsed.disclaimer.is_empty());
    }
}
