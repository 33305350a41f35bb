use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::Component;

const URL_METADATA_NAMES: &[&str] = &["authURL", "tokenURL", "issuerURL", "opaURL", "url"];

/// R-HTTPS: URL-shaped metadata entries using plaintext `http://`.
pub struct RuleHttps;

impl Rule for RuleHttps {
    fn ident(&self) -> &'static str {
        "R-HTTPS"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        let is_middleware = component.driver.starts_with("middleware.");

        component
            .metadata_entries
            .iter()
            .filter_map(|entry| {
                if !URL_METADATA_NAMES.contains(&entry.name.as_str()) {
                    return None;
                }
                let value = entry.value.as_deref()?;
                if !value.starts_with("http://") {
                    return None;
                }

                let severity = if is_middleware {
                    Severity::Error
                } else {
                    Severity::Warning
                };

                Some(
                    Finding::builder(self.ident(), "insecure_url")
                        .severity(severity)
                        .component(component.name.clone())
                        .file(component.source_file.clone())
                        .message(format!("'{}' uses an insecure http:// URL", entry.name))
                        .build(),
                )
            })
            .collect()
    }
}
