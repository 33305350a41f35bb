//! The Rule Engine: single-node rules.
//!
//! Each [`Rule`] examines one [`Component`] and emits zero or more
//! [`Finding`]s. Rules are side-effect-free and run independently, so they
//! fan out across `rayon`'s thread pool in [`crate::run`].

mod azure_identity;
mod bearer;
mod https;
mod name;
mod opa;
mod ratelimit;
mod required_metadata;
mod resiliency;
mod schema;
mod secret_leak;

use crate::finding::Finding;
use crate::model::Component;

/// A single-node rule, examining one component in isolation.
pub trait Rule {
    fn ident(&self) -> &'static str;
    fn check(&self, component: &Component) -> Vec<Finding>;
}

/// All per-node rules, in the fixed tie-break order (NAME, SCHEMA,
/// SECRET-LEAK, HTTPS, RATELIMIT, OPA, BEARER, RESILIENCY, AZURE-IDENTITY),
/// plus the supplemented R-REQUIRED-METADATA placed immediately after SCHEMA
/// since both gate on component completeness.
pub fn default_rules() -> Vec<Box<dyn Rule + Send + Sync>> {
    vec![
        Box::new(name::RuleName),
        Box::new(schema::RuleSchema),
        Box::new(required_metadata::RuleRequiredMetadata),
        Box::new(secret_leak::RuleSecretLeak),
        Box::new(https::RuleHttps),
        Box::new(ratelimit::RuleRateLimit),
        Box::new(opa::RuleOpa),
        Box::new(bearer::RuleBearer),
        Box::new(resiliency::RuleResiliency),
        Box::new(azure_identity::RuleAzureIdentity),
    ]
}

/// Runs every registered rule against `component`, in registration order.
/// Callers sort the merged output by `(rule rank, component, file, message)`
/// before folding it into the run's overall Findings Set — see
/// `Finding::cmp` for how "rule rank" maps each `rule_id` to its position
/// in the spec's fixed cross-rule order.
pub fn run_all(rules: &[Box<dyn Rule + Send + Sync>], component: &Component) -> Vec<Finding> {
    rules.iter().flat_map(|rule| rule.check(component)).collect()
}
