use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::{Component, Duration};

/// R-RESILIENCY: sanity checks for retry, timeout, and circuit-breaker
/// policies expressed as metadata on a `resiliency.*`-driven component.
///
/// There's no distinct resource type for resiliency policies, so (per
/// DESIGN.md) this rule treats a `resiliency.*`
/// component's metadata entries as a flat policy bundle and only evaluates
/// the sub-checks whose relevant keys are actually present, to avoid
/// firing on components that don't describe a resiliency policy at all.
pub struct RuleResiliency;

impl Rule for RuleResiliency {
    fn ident(&self) -> &'static str {
        "R-RESILIENCY"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        if !component.driver.starts_with("resiliency.") {
            return Vec::new();
        }

        let mut findings = Vec::new();

        if let Some(entry) = component.metadata("retryMaxRetries") {
            if let Some(raw) = &entry.value {
                if let Ok(max_retries) = raw.trim().parse::<i64>() {
                    if max_retries > 20 {
                        findings.push(self.finding(
                            component,
                            Severity::Warning,
                            format!("retry policy allows {max_retries} retries, more than 20"),
                        ));
                    }
                }
            }
        }

        if let Some(entry) = component.metadata("retryDuration") {
            if let Some(raw) = &entry.value {
                if let Some(duration) = Duration::parse(raw) {
                    if duration.as_secs() < 0.1 {
                        findings.push(self.finding(
                            component,
                            Severity::Warning,
                            format!("retry duration '{raw}' is under 100ms, risking a retry storm"),
                        ));
                    }
                }
            }
        }

        if let Some(entry) = component.metadata("timeoutInSeconds") {
            match entry.value.as_deref().and_then(Duration::parse) {
                Some(duration) if duration.as_secs() <= 0.0 => {
                    findings.push(self.finding(
                        component,
                        Severity::Error,
                        "timeout policy is zero".to_string(),
                    ));
                }
                Some(duration) if duration.as_secs() > 300.0 => {
                    findings.push(self.finding(
                        component,
                        Severity::Warning,
                        format!("timeout of {}s exceeds 300s", duration.as_secs()),
                    ));
                }
                None => {
                    findings.push(self.finding(
                        component,
                        Severity::Error,
                        "timeout policy is absent or unparseable".to_string(),
                    ));
                }
                _ => {}
            }
        }

        if component.metadata("circuitBreakerConsecutiveErrors").is_some()
            || component.metadata("circuitBreakerTimeoutInSeconds").is_some()
        {
            let consecutive_errors = component
                .metadata("circuitBreakerConsecutiveErrors")
                .and_then(|e| e.value.as_deref())
                .and_then(|v| v.trim().parse::<i64>().ok());

            if matches!(consecutive_errors, Some(n) if n < 2) {
                findings.push(self.finding(
                    component,
                    Severity::Warning,
                    "circuit breaker trips after fewer than 2 consecutive errors".to_string(),
                ));
            }

            if component.metadata("circuitBreakerTimeoutInSeconds").is_none() {
                findings.push(self.finding(
                    component,
                    Severity::Warning,
                    "circuit breaker policy is missing 'circuitBreakerTimeoutInSeconds'".to_string(),
                ));
            }
        }

        findings
    }
}

impl RuleResiliency {
    fn finding(&self, component: &Component, severity: Severity, message: String) -> Finding {
        Finding::builder(self.ident(), "resiliency_sanity")
            .severity(severity)
            .component(component.name.clone())
            .file(component.source_file.clone())
            .message(message)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentKind, MetadataEntry};
    use camino::Utf8PathBuf;

    fn component(entries: Vec<(&str, &str)>) -> Component {
        Component {
            name: "policy".to_string(),
            kind: ComponentKind::Other,
            driver: "resiliency.default".to_string(),
            version: "v1".to_string(),
            scopes: Vec::new(),
            metadata_entries: entries
                .into_iter()
                .map(|(name, value)| MetadataEntry {
                    name: name.to_string(),
                    value: Some(value.to_string()),
                    secret_ref: None,
                })
                .collect(),
            auth_secret_store: None,
            source_file: Utf8PathBuf::from("c.yaml"),
        }
    }

    #[test]
    fn flags_zero_timeout() {
        let findings = RuleResiliency.check(&component(vec![("timeoutInSeconds", "0s")]));
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn flags_excessive_retries() {
        let findings = RuleResiliency.check(&component(vec![("retryMaxRetries", "25")]));
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn ignores_unrelated_driver() {
        let mut component = component(vec![("timeoutInSeconds", "0s")]);
        component.driver = "state.redis".to_string();
        assert!(RuleResiliency.check(&component).is_empty());
    }
}
