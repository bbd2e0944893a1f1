// Prompt constants for the forecast module.

/// First year of every forecast window.
pub const FORECAST_START_YEAR: i32 = 2024;
/// Length of the forecast window in years.
pub const FORECAST_HORIZON_YEARS: i32 = 10;

/// Forecast prompt template.
/// Replace: {profession}, {horizon_years}, {start_year}, {end_year}
pub const FORECAST_PROMPT_TEMPLATE: &str = r#"Act as a world-class labor economist and AI futurist.
Analyze the future of the profession: "{profession}" over the next {horizon_years} years ({start_year}-{end_year}).

Based on recent employment statistics, technological advancements in LLMs, robotics, and automation:
1. Estimate the percentage of tasks performed by AI vs Humans over time.
2. Identify specific subfields within this profession and their susceptibility to automation.
3. Recommend skills needed to survive/thrive.

Provide a realistic, data-informed projection. Be honest about displacement risks but also highlight augmentation opportunities."#;

pub fn forecast_end_year() -> i32 {
    FORECAST_START_YEAR + FORECAST_HORIZON_YEARS
}

/// "2024-2034"
pub fn outlook_label() -> String {
    format!("{}-{}", FORECAST_START_YEAR, forecast_end_year())
}

/// Builds the forecast instruction for one profession. The profession text is
/// embedded verbatim.
pub fn build_prompt(profession: &str) -> String {
    FORECAST_PROMPT_TEMPLATE
        .replace("{horizon_years}", &FORECAST_HORIZON_YEARS.to_string())
        .replace("{start_year}", &FORECAST_START_YEAR.to_string())
        .replace("{end_year}", &forecast_end_year().to_string())
        // last, so placeholder-looking text inside the profession is left alone
        .replace("{profession}", profession)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_profession_and_window() {
        let prompt = build_prompt("Truck Driver");
        assert!(prompt.contains(r#"profession: "Truck Driver""#));
        assert!(prompt.contains("next 10 years (2024-2034)"));
        assert!(prompt.contains("labor economist"));
    }

    #[test]
    fn test_prompt_lists_three_outputs_and_balance() {
        let prompt = build_prompt("Nurse");
        assert!(prompt.contains("1. Estimate the percentage of tasks"));
        assert!(prompt.contains("2. Identify specific subfields"));
        assert!(prompt.contains("3. Recommend skills"));
        assert!(prompt.contains("displacement risks"));
        assert!(prompt.contains("augmentation opportunities"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt("Actuary"), build_prompt("Actuary"));
    }

    #[test]
    fn test_profession_is_embedded_verbatim() {
        let odd = "  Chef {end_year} \"sous\"  ";
        let prompt = build_prompt(odd);
        assert!(prompt.contains(odd));
        assert!(!prompt.contains("{profession}"));
    }

    #[test]
    fn test_outlook_label() {
        assert_eq!(outlook_label(), "2024-2034");
    }
}
