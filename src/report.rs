use serde::Serialize;

use crate::cli::OutputFormat;
use crate::models::Severity;
use crate::services::CheckOutcome;

/// 检查名称，出现在输出的最前面
pub const CHECK_NAME: &str = "Procs";

#[derive(Serialize)]
struct JsonReport<'a> {
    name: &'a str,
    status: Severity,
    message: &'a str,
    patterns: &'a [crate::services::PatternOutcome],
}

/// 文本输出：`Procs OK: <message>`
pub fn render_text(outcome: &CheckOutcome) -> String {
    format!("{} {}: {}", CHECK_NAME, outcome.status, outcome.message)
}

pub fn render_json(outcome: &CheckOutcome) -> serde_json::Result<String> {
    serde_json::to_string(&JsonReport {
        name: CHECK_NAME,
        status: outcome.status,
        message: &outcome.message,
        patterns: &outcome.patterns,
    })
}

pub fn render(outcome: &CheckOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(outcome),
        OutputFormat::Json => render_json(outcome).unwrap_or_else(|e| {
            log::error!("Failed to render json report: {}", e);
            render_text(outcome)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::PatternOutcome;

    fn outcome() -> CheckOutcome {
        CheckOutcome {
            status: Severity::Warning,
            message: "\nFound 4 matching processes; cmd /nginx/".to_string(),
            patterns: vec![PatternOutcome {
                pattern: "nginx".to_string(),
                count: 4,
                status: Severity::Warning,
                message: "Found 4 matching processes; cmd /nginx/".to_string(),
            }],
        }
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            render_text(&outcome()),
            "Procs WARNING: \nFound 4 matching processes; cmd /nginx/"
        );
    }

    #[test]
    fn test_render_json() {
        let json: serde_json::Value =
            serde_json::from_str(&render(&outcome(), OutputFormat::Json)).unwrap();
        assert_eq!(json["name"], "Procs");
        assert_eq!(json["status"], "WARNING");
        assert_eq!(json["patterns"][0]["pattern"], "nginx");
        assert_eq!(json["patterns"][0]["count"], 4);
        assert_eq!(json["patterns"][0]["status"], "WARNING");
        assert!(json["patterns"][0].get("message").is_none());
    }

    #[test]
    fn test_render_unknown() {
        let outcome = CheckOutcome::unknown("regex parse error");
        assert_eq!(render_text(&outcome), "Procs UNKNOWN: regex parse error");
    }
}
