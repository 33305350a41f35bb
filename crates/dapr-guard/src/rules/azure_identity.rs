use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::Component;

const AZURE_NATIVE_DRIVERS: &[&str] = &[
    "state.azure.cosmosdb",
    "state.azure.tablestorage",
    "state.azure.blobstorage",
    "pubsub.azure.servicebus.topics",
    "pubsub.azure.servicebus.queues",
    "pubsub.azure.eventhubs",
    "bindings.azure.blobstorage",
    "bindings.azure.eventgrid",
    "bindings.azure.eventhubs",
    "bindings.azure.signalr",
    "bindings.azure.queues",
    "secretstores.azure.keyvault",
];

const CONNECTION_SECRET_NAMES: &[&str] = &["connectionString", "accountKey", "masterKey"];

/// R-AZURE-IDENTITY: managed-identity coherence for Azure-native drivers.
pub struct RuleAzureIdentity;

impl Rule for RuleAzureIdentity {
    fn ident(&self) -> &'static str {
        "R-AZURE-IDENTITY"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        if !AZURE_NATIVE_DRIVERS.contains(&component.driver.as_str()) {
            return Vec::new();
        }

        let has_client_id = component.metadata("azureClientId").is_some();
        let has_connection_secret = CONNECTION_SECRET_NAMES
            .iter()
            .any(|name| component.metadata(name).is_some());

        match (has_client_id, has_connection_secret) {
            (true, true) => vec![Finding::builder(self.ident(), "ambiguous_identity")
                .severity(Severity::Warning)
                .component(component.name.clone())
                .file(component.source_file.clone())
                .message("component declares both 'azureClientId' and a connection secret; pick one auth mode")
                .build()],
            (false, true) => vec![Finding::builder(self.ident(), "connection_secret_only")
                .severity(Severity::Info)
                .component(component.name.clone())
                .file(component.source_file.clone())
                .message("component authenticates with a connection secret; consider Azure managed identity instead")
                .build()],
            _ => Vec::new(),
        }
    }
}
