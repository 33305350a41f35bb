//! The Cross-File Analyzer: rules that need the whole
//! [`Project`] and/or the [`Graph`], as opposed to the per-node rules in
//! [`crate::rules`].

mod chain_depth;
mod cycle;
mod mtls;
mod port;
mod quota;
mod scope;
mod secret_ref;
mod service_invoke;

use crate::config::RunConfig;
use crate::finding::Finding;
use crate::graph::Graph;
use crate::project::Project;

/// Runs every cross-file rule, in the fixed tie-break order (CYCLE,
/// SECRET-REF, SCOPE, SERVICE-INVOKE, CHAIN-DEPTH, PORT, QUOTA, MTLS).
/// Final deterministic ordering is applied
/// once by the caller sorting the merged Findings Set.
pub fn analyze(project: &Project, graph: &Graph, config: &RunConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    findings.extend(cycle::check(graph));
    findings.extend(secret_ref::check(project));
    findings.extend(scope::check(project));
    findings.extend(service_invoke::check(project));
    findings.extend(chain_depth::check(project, graph));
    findings.extend(port::check(project));
    findings.extend(quota::check(project, config.deployment_target));
    findings.extend(mtls::check(project, config.is_production));
    findings
}
