//! The Report Aggregator & Emitter: renders the accumulated Findings Set
//! plus a graph summary in human or JSON form, and maps severity to the
//! process exit code.

use anstream::println as aprintln;
use camino::Utf8Path;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::finding::{Finding, Severity};
use crate::graph::Graph;
use crate::project::Project;

/// The top-5-by-degree / isolated-components summary shared by both output
/// forms.
#[derive(Serialize)]
pub struct GraphSummary {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub most_connected: Vec<ConnectedComponent>,
    pub isolated_components: Vec<String>,
}

#[derive(Serialize)]
pub struct ConnectedComponent {
    pub name: String,
    pub connections: usize,
}

pub fn graph_summary(graph: &Graph) -> GraphSummary {
    let mut by_degree: Vec<(String, usize)> = graph
        .nodes()
        .map(|name| (name.to_string(), graph.in_degree(name) + graph.out_degree(name)))
        .collect();
    by_degree.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let isolated_components = by_degree
        .iter()
        .filter(|(_, degree)| *degree == 0)
        .map(|(name, _)| name.clone())
        .collect();

    let most_connected = by_degree
        .into_iter()
        .filter(|(_, degree)| *degree > 0)
        .take(5)
        .map(|(name, connections)| ConnectedComponent { name, connections })
        .collect();

    GraphSummary {
        total_nodes: graph.nodes().count(),
        total_edges: graph.edge_count(),
        most_connected,
        isolated_components,
    }
}

/// 1 iff strictness demands it: any error, or (with `warnings_as_errors`)
/// any warning. Non-strict runs always exit 0.
pub fn exit_code(findings: &[Finding], strict: bool, warnings_as_errors: bool) -> u8 {
    if !strict {
        return 0;
    }

    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    let has_warning = findings.iter().any(|f| f.severity == Severity::Warning);

    if has_error || (warnings_as_errors && has_warning) {
        1
    } else {
        0
    }
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    }
}

fn print_bucket(label: &str, findings: &[&Finding]) {
    if findings.is_empty() {
        return;
    }

    aprintln!("\n{label}:");
    for finding in findings {
        let marker = format!("[{}]", severity_marker(finding.severity));
        let marker = match finding.severity {
            Severity::Error => marker.red().to_string(),
            Severity::Warning => marker.yellow().to_string(),
            Severity::Info => marker.cyan().to_string(),
        };

        let mut line = format!("  {marker} {}", finding.category.bold());
        if let Some(component) = &finding.component {
            line.push_str(&format!(" ({component})"));
        }
        if let Some(file) = &finding.file {
            line.push_str(&format!(" {file}"));
        }
        line.push_str(&format!(": {}", finding.message));
        aprintln!("{line}");
    }
}

/// Renders the human (cargo-style) report to stdout.
pub fn render_human(root: &Utf8Path, project: &Project, graph: &Graph, findings: &[Finding]) {
    aprintln!(
        "scanned {root} — {components} components, {apps} apps",
        components = project.components.len(),
        apps = project.apps.len(),
    );

    let errors: Vec<&Finding> = findings.iter().filter(|f| f.severity == Severity::Error).collect();
    let warnings: Vec<&Finding> = findings.iter().filter(|f| f.severity == Severity::Warning).collect();
    let infos: Vec<&Finding> = findings.iter().filter(|f| f.severity == Severity::Info).collect();

    print_bucket("Errors", &errors);
    print_bucket("Warnings", &warnings);
    print_bucket("Info", &infos);

    if findings.is_empty() {
        aprintln!("\n{}", "no findings".green());
    }

    let summary = graph_summary(graph);
    aprintln!(
        "\ngraph: {} nodes, {} edges",
        summary.total_nodes,
        summary.total_edges
    );
    if !summary.most_connected.is_empty() {
        aprintln!("most connected:");
        for component in &summary.most_connected {
            aprintln!("  {} ({} connections)", component.name, component.connections);
        }
    }
    if !summary.isolated_components.is_empty() {
        aprintln!("isolated: {}", summary.isolated_components.join(", "));
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    components: Vec<&'a str>,
    apps: Vec<&'a str>,
    issues: &'a [&'a Finding],
    warnings: &'a [&'a Finding],
    graph_summary: GraphSummary,
}

/// Renders the JSON report. Returns the serialized document
/// rather than writing it directly, so callers control the sink.
pub fn render_json(project: &Project, graph: &Graph, findings: &[Finding]) -> serde_json::Result<String> {
    let issues: Vec<&Finding> = findings.iter().filter(|f| f.severity >= Severity::Error).collect();
    let warnings: Vec<&Finding> = findings.iter().filter(|f| f.severity == Severity::Warning).collect();

    let report = JsonReport {
        components: project.components.keys().map(String::as_str).collect(),
        apps: project.apps.keys().map(String::as_str).collect(),
        issues: &issues,
        warnings: &warnings,
        graph_summary: graph_summary(graph),
    };

    serde_json::to_string_pretty(&report)
}
