use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::Component;

/// R-RATELIMIT: `middleware.http.ratelimit`'s `maxRequestsPerSecond` sanity.
pub struct RuleRateLimit;

impl Rule for RuleRateLimit {
    fn ident(&self) -> &'static str {
        "R-RATELIMIT"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        if component.driver != "middleware.http.ratelimit" {
            return Vec::new();
        }

        let Some(entry) = component.metadata("maxRequestsPerSecond") else {
            return Vec::new();
        };
        let Some(raw) = &entry.value else {
            return Vec::new();
        };

        match raw.trim().parse::<i64>() {
            Ok(n) if n <= 0 => vec![self.finding(
                component,
                Severity::Error,
                format!("'maxRequestsPerSecond' must be positive, got {n}"),
            )],
            Ok(n) if n > 10_000 => vec![self.finding(
                component,
                Severity::Warning,
                format!("'maxRequestsPerSecond' of {n} is unusually high"),
            )],
            Ok(_) => Vec::new(),
            Err(_) => vec![self.finding(
                component,
                Severity::Error,
                format!("'maxRequestsPerSecond' value '{raw}' is not an integer"),
            )],
        }
    }
}

impl RuleRateLimit {
    fn finding(&self, component: &Component, severity: Severity, message: String) -> Finding {
        Finding::builder(self.ident(), "rate_limit_sanity")
            .severity(severity)
            .component(component.name.clone())
            .file(component.source_file.clone())
            .message(message)
            .build()
    }
}
