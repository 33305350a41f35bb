use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::Component;

/// R-BEARER: `middleware.http.bearer` should have an `audience` and a
/// plaintext-free issuer.
pub struct RuleBearer;

impl Rule for RuleBearer {
    fn ident(&self) -> &'static str {
        "R-BEARER"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        if component.driver != "middleware.http.bearer" {
            return Vec::new();
        }

        let mut findings = Vec::new();

        if component.metadata("audience").is_none() {
            findings.push(self.finding(component, "missing 'audience' metadata entry"));
        }

        let issuer = component
            .metadata("issuerURL")
            .or_else(|| component.metadata("issuer"))
            .and_then(|e| e.value.as_deref());

        if let Some(issuer) = issuer {
            if issuer.starts_with("http://") {
                findings.push(self.finding(component, "issuer URL uses insecure http://"));
            }
        }

        findings
    }
}

impl RuleBearer {
    fn finding(&self, component: &Component, message: &str) -> Finding {
        Finding::builder(self.ident(), "bearer_misconfiguration")
            .severity(Severity::Warning)
            .component(component.name.clone())
            .file(component.source_file.clone())
            .message(message)
            .build()
    }
}
