//! X-CHAIN-DEPTH: components whose dependency chain runs deeper than 3 hops.

use crate::finding::{Finding, Severity};
use crate::graph::Graph;
use crate::project::Project;

const MAX_DEPTH: usize = 3;

pub fn check(project: &Project, graph: &Graph) -> Vec<Finding> {
    project
        .components
        .values()
        .filter_map(|component| {
            let depth = graph.chain_depth(&component.name);
            if depth <= MAX_DEPTH {
                return None;
            }

            Some(
                Finding::builder("X-CHAIN-DEPTH", "deep_dependency_chain")
                    .severity(Severity::Warning)
                    .component(component.name.clone())
                    .file(component.source_file.clone())
                    .message(format!(
                        "component '{}' has a dependency chain {depth} hops deep, more than {MAX_DEPTH}",
                        component.name
                    ))
                    .detail("depth", depth as u64)
                    .build(),
            )
        })
        .collect()
}
