use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::Component;

const SUPPORTED_VERSION: &str = "v1";

/// R-SCHEMA: `version` non-empty and the supported schema version.
pub struct RuleSchema;

impl Rule for RuleSchema {
    fn ident(&self) -> &'static str {
        "R-SCHEMA"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        if component.version.is_empty() {
            return vec![Finding::builder(self.ident(), "missing_version")
                .severity(Severity::Warning)
                .component(component.name.clone())
                .file(component.source_file.clone())
                .message("component has no 'spec.version'")
                .build()];
        }

        if component.version != SUPPORTED_VERSION {
            return vec![Finding::builder(self.ident(), "unsupported_version")
                .severity(Severity::Error)
                .component(component.name.clone())
                .file(component.source_file.clone())
                .message(format!(
                    "component version '{}' is not supported (expected '{SUPPORTED_VERSION}')",
                    component.version
                ))
                .build()];
        }

        Vec::new()
    }
}
