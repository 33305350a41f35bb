use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::Component;

const SECRET_NAME_SUBSTRINGS: &[&str] = &[
    "password",
    "secret",
    "key",
    "token",
    "credential",
    "connectionstring",
    "masterkey",
    "accesskey",
    "apikey",
    "clientid",
    "clientsecret",
];

/// R-SECRET-LEAK: a metadata entry whose name looks secret-shaped but
/// carries a plain `value` instead of a `secretKeyRef`.
pub struct RuleSecretLeak;

impl Rule for RuleSecretLeak {
    fn ident(&self) -> &'static str {
        "R-SECRET-LEAK"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        component
            .metadata_entries
            .iter()
            .filter_map(|entry| {
                let lower = entry.name.to_ascii_lowercase();
                let looks_secret = SECRET_NAME_SUBSTRINGS.iter().any(|s| lower.contains(s));
                let value = entry.value.as_deref()?;

                if !looks_secret {
                    return None;
                }
                if value.starts_with('$') || value.starts_with("{{") {
                    return None;
                }

                Some(
                    Finding::builder(self.ident(), "plain_secret")
                        .severity(Severity::Error)
                        .component(component.name.clone())
                        .file(component.source_file.clone())
                        .message(format!(
                            "metadata entry '{}' looks like a secret but uses a plain 'value'; use 'secretKeyRef' instead",
                            entry.name
                        ))
                        .build(),
                )
            })
            .collect()
    }
}
