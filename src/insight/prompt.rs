//! Prompt text and response schema for narrative insights

use crate::format::{format_amount, CURRENCY_SYMBOL};
use crate::investment::InvestmentInput;
use crate::projection::ProjectionResult;
use serde_json::{json, Value};

/// Build the insight prompt for one projection
pub fn build_prompt(input: &InvestmentInput, result: &ProjectionResult) -> String {
    format!(
        "Analyze the following investment plan for an Indian investor and provide a structured JSON response.\n\
         Details:\n\
         - Type: {plan}\n\
         - Amount: {sym}{amount}\n\
         - Return Rate: {rate}% p.a.\n\
         - Horizon: {years} years\n\
         - Final Value: {sym}{value}\n\
         \n\
         Provide a concise analysis, one pro tip, and one warning.",
        plan = input.plan_description(),
        sym = CURRENCY_SYMBOL,
        amount = format_amount(input.amount),
        rate = input.annual_return_rate,
        years = input.horizon_years,
        value = format_amount(result.total_value),
    )
}

/// JSON schema the model must answer with
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "analysis": {
                "type": "STRING",
                "description": "A brief analysis of this wealth accumulation plan in the context of Indian market trends."
            },
            "proTip": {
                "type": "STRING",
                "description": "A single, actionable 'Pro Tip' for an Indian investor regarding their commitment."
            },
            "warning": {
                "type": "STRING",
                "description": "A single, realistic warning or consideration (e.g., taxation or inflation impact)."
            }
        },
        "required": ["analysis", "proTip", "warning"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investment::Frequency;
    use crate::projection::project;

    #[test]
    fn test_sip_prompt() {
        let input = InvestmentInput::default();
        let prompt = build_prompt(&input, &project(&input));

        assert!(prompt.starts_with("Analyze the following investment plan"));
        assert!(prompt.contains("- Type: Monthly SIP\n"));
        assert!(prompt.contains("- Amount: ₹5,000\n"));
        assert!(prompt.contains("- Return Rate: 12% p.a.\n"));
        assert!(prompt.contains("- Horizon: 10 years\n"));
        assert!(prompt.contains("- Final Value: ₹11,61,695\n"));
        assert!(prompt.ends_with("one pro tip, and one warning."));
    }

    #[test]
    fn test_lumpsum_prompt() {
        let input = InvestmentInput::lumpsum(250_000.0, 9.5, 7).unwrap();
        let prompt = build_prompt(&input, &project(&input));
        assert!(prompt.contains("- Type: One-time Lumpsum\n"));
        assert!(prompt.contains("- Amount: ₹2,50,000\n"));
        assert!(prompt.contains("- Return Rate: 9.5% p.a.\n"));

        let weekly = InvestmentInput::sip(100.0, 10.0, 1, Frequency::Weekly).unwrap();
        assert!(build_prompt(&weekly, &project(&weekly)).contains("Weekly SIP"));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = response_schema();
        assert_eq!(schema["required"], json!(["analysis", "proTip", "warning"]));
        assert_eq!(schema["properties"]["proTip"]["type"], "STRING");
    }
}
