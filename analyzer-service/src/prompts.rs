pub const REPORT_ANALYSIS: &str = include_str!("../data/prompts/report_analysis.txt");
pub const BILL_AUDIT: &str = include_str!("../data/prompts/bill_audit.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the instruction text for a request.
///
/// Only the exact string `"report"` selects the report template; every
/// other mode value falls through to the bill audit.
pub fn for_mode(mode: &str, lang: &str) -> String {
    let template = if mode == "report" {
        REPORT_ANALYSIS
    } else {
        BILL_AUDIT
    };
    render(template, &[("lang", lang)])
}
