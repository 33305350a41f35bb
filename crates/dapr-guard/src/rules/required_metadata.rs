use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::Component;

/// Minimum metadata entries required for a component type to function,
/// lifted from the original validator's `REQUIRED_METADATA` table.
const REQUIRED_METADATA: &[(&str, &[&str])] = &[
    ("state.redis", &["redisHost"]),
    ("state.azure.cosmosdb", &["url", "database", "collection"]),
    ("pubsub.redis", &["redisHost"]),
    ("secretstores.azure.keyvault", &["vaultName"]),
    ("secretstores.local.file", &["secretsFile"]),
];

/// R-REQUIRED-METADATA: component types with a known minimum-configuration
/// contract must carry every required metadata entry.
///
/// Supplemented from the original validator's behavior, which this rule
/// preserves.
pub struct RuleRequiredMetadata;

impl Rule for RuleRequiredMetadata {
    fn ident(&self) -> &'static str {
        "R-REQUIRED-METADATA"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        let Some((_, required)) = REQUIRED_METADATA
            .iter()
            .find(|(driver, _)| *driver == component.driver)
        else {
            return Vec::new();
        };

        required
            .iter()
            .filter(|name| component.metadata(name).is_none())
            .map(|name| {
                Finding::builder(self.ident(), "missing_required_metadata")
                    .severity(Severity::Error)
                    .component(component.name.clone())
                    .file(component.source_file.clone())
                    .message(format!(
                        "component type '{}' is missing required metadata entry '{name}'",
                        component.driver
                    ))
                    .build()
            })
            .collect()
    }
}
