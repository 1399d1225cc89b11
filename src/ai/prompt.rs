//! Prompt construction for the case generator. Kept separate from the HTTP
//! client so the wording is testable without the `network` feature.

pub const SYSTEM_MESSAGE: &str =
    "You are a McKinsey case interview coach creating realistic case prompts.";

/// Minimal probe used by the Settings "test key" action.
pub const PROBE_MESSAGE: &str = "Say \"test successful\" if you can read this.";

pub fn case_prompt(case_name: &str, industry_name: &str) -> String {
    format!(
        "You are a McKinsey case interview coach. Generate a realistic consulting case interview prompt.\n\
         \n\
         Requirements:\n\
         - Case Type: {case_name}\n\
         - Industry: {industry_name}\n\
         - Include: Client background (1-2 sentences), problem statement, key data points (2-3 metrics), and the question posed to the candidate\n\
         - Make it realistic and representative of actual MBB interviews\n\
         - Keep it concise (4-5 sentences total)\n\
         \n\
         Generate the case prompt now:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_case_and_industry() {
        let prompt = case_prompt("Market Entry", "Healthcare & Pharma");
        assert!(prompt.contains("Case Type: Market Entry"));
        assert!(prompt.contains("Industry: Healthcare & Pharma"));
        assert!(prompt.ends_with("Generate the case prompt now:"));
    }
}
