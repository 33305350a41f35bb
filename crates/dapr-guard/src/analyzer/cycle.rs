//! X-CYCLE: circular dependencies in the component graph.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::finding::{Finding, Severity};
use crate::graph::Graph;

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Rotates a closed cycle (`[n0, n1, ..., n0]`) so it starts at its
/// lexicographically smallest node, making two reports of the same cycle
/// from different entry points compare equal.
fn canonicalize(cycle: &[&str]) -> Vec<String> {
    let ring = &cycle[..cycle.len() - 1];
    let min_idx = ring
        .iter()
        .enumerate()
        .min_by_key(|(_, s)| **s)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut rotated: Vec<String> = ring[min_idx..]
        .iter()
        .chain(ring[..min_idx].iter())
        .map(|s| s.to_string())
        .collect();
    rotated.push(rotated[0].clone());
    rotated
}

/// Runs a single colored DFS over the whole graph (white/gray/black — unlike
/// a plain recursive DFS that pops its path after returning from each
/// neighbor, which misses cycles closed through an already-popped ancestor)
/// and records every distinct cycle found. Overlapping cycles sharing a
/// node are reported separately; the
/// same cycle rediscovered from a different entry point is deduplicated by
/// its canonical rotation.
pub fn check(graph: &Graph) -> Vec<Finding> {
    let mut color: IndexMap<&str, Color> = graph.nodes().map(|n| (n, Color::White)).collect();
    let mut stack: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    let mut findings = Vec::new();

    let mut nodes: Vec<&str> = graph.nodes().collect();
    nodes.sort_unstable();

    for start in nodes {
        if color[start] == Color::White {
            visit(graph, start, &mut color, &mut stack, &mut seen, &mut findings);
        }
    }

    findings
}

fn visit<'a>(
    graph: &'a Graph,
    node: &'a str,
    color: &mut IndexMap<&'a str, Color>,
    stack: &mut Vec<&'a str>,
    seen: &mut HashSet<Vec<String>>,
    findings: &mut Vec<Finding>,
) {
    color.insert(node, Color::Gray);
    stack.push(node);

    for next in graph.dependencies(node) {
        match color.get(next).copied().unwrap_or(Color::White) {
            Color::White => visit(graph, next, color, stack, seen, findings),
            Color::Gray => {
                let entry_pos = stack.iter().position(|n| *n == next).unwrap_or(0);
                let mut raw_cycle: Vec<&str> = stack[entry_pos..].to_vec();
                raw_cycle.push(next);

                let cycle = canonicalize(&raw_cycle);
                if seen.insert(cycle.clone()) {
                    findings.push(
                        Finding::builder("X-CYCLE", "circular_dependency")
                            .severity(Severity::Error)
                            .component(cycle[0].clone())
                            .message(format!("circular dependency: {}", cycle.join(" -> ")))
                            .detail("cycle", cycle.clone())
                            .build(),
                    );
                }
            }
            Color::Black => {}
        }
    }

    stack.pop();
    color.insert(node, Color::Black);
}
