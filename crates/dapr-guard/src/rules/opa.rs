use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::Component;

/// R-OPA: `middleware.http.opa`'s `rego` policy should deny by default.
pub struct RuleOpa;

impl Rule for RuleOpa {
    fn ident(&self) -> &'static str {
        "R-OPA"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        if component.driver != "middleware.http.opa" {
            return Vec::new();
        }

        let Some(entry) = component.metadata("rego") else {
            return Vec::new();
        };
        let Some(rego) = &entry.value else {
            return Vec::new();
        };

        let normalized: String = rego.split_whitespace().collect::<Vec<_>>().join(" ");
        let default_deny = normalized.replace(' ', "").contains("defaultallow=false");

        if default_deny {
            return Vec::new();
        }

        vec![Finding::builder(self.ident(), "opa_default_allow")
            .severity(Severity::Warning)
            .component(component.name.clone())
            .file(component.source_file.clone())
            .message("OPA policy does not set 'default allow = false'")
            .build()]
    }
}
