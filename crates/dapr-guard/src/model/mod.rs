//! Typed domain model for a parsed project.
//!
//! Values here are produced once by [`crate::parse`] and never mutated
//! afterwards (invariant 5 of the data model: the Project is immutable
//! after parse).

mod duration;
mod quantity;

pub use duration::Duration;
pub use quantity::Quantity;

use camino::Utf8PathBuf;
use serde::Serialize;

/// The kind of external resource a [`Component`] represents.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    State,
    Pubsub,
    SecretStore,
    BindingInput,
    BindingOutput,
    Middleware,
    Configuration,
    Crypto,
    Lock,
    Workflow,
    Conversation,
    Other,
}

impl ComponentKind {
    /// Classifies a component's driver string (e.g. `state.redis`) into a
    /// [`ComponentKind`] by its dotted prefix.
    pub fn classify(driver: &str) -> Self {
        let prefix = driver.split('.').next().unwrap_or(driver);
        match prefix {
            "state" => ComponentKind::State,
            "pubsub" => ComponentKind::Pubsub,
            "secretstores" => ComponentKind::SecretStore,
            // The driver string alone doesn't distinguish an input binding
            // from an output binding (Dapr determines that from which
            // direction the app code invokes); treat all bindings as
            // output-shaped for rule purposes, the more common case.
            "bindings" => ComponentKind::BindingOutput,
            "middleware" => ComponentKind::Middleware,
            "configuration" => ComponentKind::Configuration,
            "crypto" => ComponentKind::Crypto,
            "lock" => ComponentKind::Lock,
            "workflow" => ComponentKind::Workflow,
            "conversation" => ComponentKind::Conversation,
            _ => ComponentKind::Other,
        }
    }
}

/// A single `spec.metadata` entry.
///
/// Exactly one of `value`/`secret_ref` is populated (invariant 3); a
/// both-absent or both-populated entry is a parse-stage error, but the
/// component is still registered so downstream rules can run.
#[derive(Clone, Debug, Serialize)]
pub struct MetadataEntry {
    pub name: String,
    pub value: Option<String>,
    pub secret_ref: Option<SecretRef>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SecretRef {
    pub store: String,
    pub key: String,
}

/// A typed, parsed Dapr component.
#[derive(Clone, Debug, Serialize)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
    pub driver: String,
    pub version: String,
    pub scopes: Vec<String>,
    pub metadata_entries: Vec<MetadataEntry>,
    pub auth_secret_store: Option<String>,
    pub source_file: Utf8PathBuf,
}

impl Component {
    pub fn is_secret_store(&self) -> bool {
        matches!(self.kind, ComponentKind::SecretStore)
    }

    pub fn metadata(&self, name: &str) -> Option<&MetadataEntry> {
        self.metadata_entries.iter().find(|m| m.name == name)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ResourceRequest {
    pub cpu: f64,
    pub memory: Quantity,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ScaleSpec {
    pub min_replicas: u32,
    pub max_replicas: u32,
}

/// A Dapr-enabled application process, i.e. a sidecar-registered workload.
#[derive(Clone, Debug, Serialize)]
pub struct App {
    pub id: String,
    pub app_port: Option<u16>,
    pub sidecar_http_port: u16,
    pub sidecar_grpc_port: u16,
    pub app_dir: Option<Utf8PathBuf>,
    pub resources: Option<ResourceRequest>,
    pub scale: Option<ScaleSpec>,
    pub source_file: Utf8PathBuf,
}

pub const DEFAULT_SIDECAR_HTTP_PORT: u16 = 3500;
pub const DEFAULT_SIDECAR_GRPC_PORT: u16 = 50001;

/// The single, optional mesh-wide `Configuration` resource.
#[derive(Clone, Debug, Serialize)]
pub struct ConfigurationResource {
    pub name: String,
    pub mtls_enabled: bool,
    pub workload_cert_ttl: Duration,
    pub allowed_clock_skew: Duration,
    pub source_file: Utf8PathBuf,
}
