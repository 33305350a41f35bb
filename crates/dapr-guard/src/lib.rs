//! Library entry point: wires the Discovery Walker, Parser, Rule Engine,
//! Dependency Graph, and Cross-File Analyzer into a single pass over a
//! project root.

pub mod analyzer;
pub mod config;
pub mod discovery;
pub mod error;
pub mod finding;
pub mod graph;
pub mod model;
pub mod parse;
pub mod project;
pub mod report;
pub mod rules;

use camino::Utf8Path;
use rayon::prelude::*;

use crate::config::RunConfig;
use crate::error::Error;
use crate::finding::Finding;
use crate::graph::Graph;
use crate::project::Project;

/// The outcome of one full analysis pass: the parsed project, its
/// dependency graph, and every finding produced along the way, already
/// sorted into a deterministic presentation order.
pub struct RunOutcome {
    pub project: Project,
    pub graph: Graph,
    pub findings: Vec<Finding>,
}

/// Runs the whole pipeline against `root`: discovery, parsing, the
/// per-node Rule Engine fanned out across rayon's thread pool, graph
/// construction, and the Cross-File Analyzer, in that order.
///
/// Per-node rules are independent of each other and of any other
/// component, so they're safe to run concurrently; the Cross-File
/// Analyzer needs the whole graph and runs afterwards, single-threaded,
/// since its own rules are cheap relative to walking a filesystem.
///
/// The only fatal condition is the root path itself being unreadable;
/// every other failure degrades to a Finding instead.
pub fn run(root: &Utf8Path, config: &RunConfig) -> Result<RunOutcome, Error> {
    std::fs::read_dir(root.as_std_path()).map_err(|source| Error::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let (project, mut findings) = project::build(root);

    let rules = rules::default_rules();
    let rule_findings: Vec<Finding> = project
        .components_in_order()
        .collect::<Vec<_>>()
        .par_iter()
        .flat_map(|component| rules::run_all(&rules, component))
        .collect();
    findings.extend(rule_findings);

    let graph = Graph::build(&project);
    findings.extend(analyzer::analyze(&project, &graph, config));

    findings.sort();

    Ok(RunOutcome {
        project,
        graph,
        findings,
    })
}
