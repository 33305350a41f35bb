//! Run configuration assembled from CLI flags.
//!
//! Distinct from [`crate::model`]: this is the analyzer's own operating
//! configuration, not anything parsed out of the project under analysis.

use clap::ValueEnum;

use crate::model::Quantity;

/// Which deployment platform's quota ceilings apply to `X-QUOTA`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum DeploymentTarget {
    ContainerApps,
    Kubernetes,
}

impl Default for DeploymentTarget {
    fn default() -> Self {
        DeploymentTarget::ContainerApps
    }
}

/// A platform's resource ceilings.
pub struct PlatformLimits {
    pub cpu_max: f64,
    pub memory_max: Quantity,
    pub max_replicas: u32,
}

impl DeploymentTarget {
    pub fn limits(&self) -> PlatformLimits {
        match self {
            DeploymentTarget::ContainerApps => PlatformLimits {
                cpu_max: 4.0,
                memory_max: Quantity::gib(8.0),
                max_replicas: 300,
            },
            DeploymentTarget::Kubernetes => PlatformLimits {
                cpu_max: 8.0,
                memory_max: Quantity::gib(32.0),
                max_replicas: 1000,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeploymentTarget::ContainerApps => "container-apps",
            DeploymentTarget::Kubernetes => "kubernetes",
        }
    }
}

/// Output format selected by `--json`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Everything the pipeline needs to know about how this invocation should
/// behave, assembled once in `main` from [`crate::Cli`] and threaded
/// read-only through every stage.
pub struct RunConfig {
    pub deployment_target: DeploymentTarget,
    pub is_production: bool,
    pub strict: bool,
    pub warnings_as_errors: bool,
    pub format: OutputFormat,
}
