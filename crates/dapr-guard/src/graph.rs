//! The Dependency Graph.
//!
//! A directed multigraph over component names, built once after parse and
//! read-only thereafter.

use indexmap::IndexMap;

use crate::project::Project;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EdgeKind {
    SecretRef,
    AuthStore,
}

pub struct Graph {
    forward: IndexMap<String, Vec<(String, EdgeKind)>>,
    reverse: IndexMap<String, Vec<(String, EdgeKind)>>,
}

impl Graph {
    /// Builds the graph from a parsed [`Project`]. Edges to store names
    /// that aren't a known component are intentionally *not* added here —
    /// that's `crate::analyzer::secret_ref`'s job to report as a finding.
    /// An edge binds only to the literally-referenced store, not to every
    /// store in the project.
    pub fn build(project: &Project) -> Self {
        let mut forward: IndexMap<String, Vec<(String, EdgeKind)>> = project
            .components
            .keys()
            .map(|name| (name.clone(), Vec::new()))
            .collect();
        let mut reverse: IndexMap<String, Vec<(String, EdgeKind)>> = forward.clone();

        for component in project.components.values() {
            for entry in &component.metadata_entries {
                let Some(secret_ref) = &entry.secret_ref else {
                    continue;
                };
                if secret_ref.store == component.name {
                    continue;
                }
                if project.components.contains_key(&secret_ref.store) {
                    forward
                        .entry(component.name.clone())
                        .or_default()
                        .push((secret_ref.store.clone(), EdgeKind::SecretRef));
                    reverse
                        .entry(secret_ref.store.clone())
                        .or_default()
                        .push((component.name.clone(), EdgeKind::SecretRef));
                }
            }

            if let Some(store) = &component.auth_secret_store {
                if store != &component.name && project.components.contains_key(store) {
                    forward
                        .entry(component.name.clone())
                        .or_default()
                        .push((store.clone(), EdgeKind::AuthStore));
                    reverse
                        .entry(store.clone())
                        .or_default()
                        .push((component.name.clone(), EdgeKind::AuthStore));
                }
            }
        }

        Graph { forward, reverse }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }

    pub fn dependencies(&self, name: &str) -> impl Iterator<Item = &str> {
        self.forward
            .get(name)
            .into_iter()
            .flatten()
            .map(|(n, _)| n.as_str())
    }

    pub fn dependents(&self, name: &str) -> impl Iterator<Item = &str> {
        self.reverse
            .get(name)
            .into_iter()
            .flatten()
            .map(|(n, _)| n.as_str())
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.forward.get(name).map(Vec::len).unwrap_or(0)
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.reverse.get(name).map(Vec::len).unwrap_or(0)
    }

    pub fn edge_count(&self) -> usize {
        self.forward.values().map(Vec::len).sum()
    }

    /// Detects whether a cycle is reachable starting at `start`, returning
    /// the ordered cycle (starting at the re-entered node) if one exists.
    ///
    /// Implemented with the white/gray/black DFS coloring scheme rather
    /// than a `visited.pop()`-after-recursion stack, which under-detects
    /// cycles that revisit a node already fully processed in a sibling
    /// branch.
    pub fn find_cycle_from(&self, start: &str) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let mut color: IndexMap<&str, Color> =
            self.forward.keys().map(|k| (k.as_str(), Color::White)).collect();
        let mut stack: Vec<&str> = Vec::new();

        fn visit<'a>(
            graph: &'a Graph,
            node: &'a str,
            color: &mut IndexMap<&'a str, Color>,
            stack: &mut Vec<&'a str>,
        ) -> Option<Vec<String>> {
            color.insert(node, Color::Gray);
            stack.push(node);

            for next in graph.dependencies(node) {
                match color.get(next).copied().unwrap_or(Color::White) {
                    Color::White => {
                        if let Some(cycle) = visit(graph, next, color, stack) {
                            return Some(cycle);
                        }
                    }
                    Color::Gray => {
                        let entry_pos = stack.iter().position(|n| *n == next).unwrap_or(0);
                        let mut cycle: Vec<String> =
                            stack[entry_pos..].iter().map(|s| s.to_string()).collect();
                        cycle.push(next.to_string());
                        return Some(cycle);
                    }
                    Color::Black => {}
                }
            }

            stack.pop();
            color.insert(node, Color::Black);
            None
        }

        visit(self, start, &mut color, &mut stack)
    }

    /// Longest acyclic path starting at `n`. On a cycle, the depth is
    /// capped at the path length up to (not including) the repeated node.
    pub fn chain_depth(&self, start: &str) -> usize {
        fn depth<'a>(
            graph: &'a Graph,
            node: &'a str,
            visiting: &mut Vec<&'a str>,
            memo: &mut IndexMap<&'a str, usize>,
        ) -> usize {
            if let Some(cached) = memo.get(node) {
                return *cached;
            }
            if visiting.contains(&node) {
                return 0;
            }

            visiting.push(node);
            let best = graph
                .dependencies(node)
                .map(|next| 1 + depth(graph, next, visiting, memo))
                .max()
                .unwrap_or(0);
            visiting.pop();

            memo.insert(node, best);
            best
        }

        let mut visiting = Vec::new();
        let mut memo = IndexMap::new();
        depth(self, start, &mut visiting, &mut memo)
    }
}
