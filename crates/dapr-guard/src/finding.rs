//! Models for findings: the sole diagnostic currency this analyzer produces.

use std::cmp::Ordering;

use camino::Utf8PathBuf;
use serde::Serialize;

/// How serious a finding is. Drives both presentation and the exit code.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic emitted by a rule.
///
/// Findings are accumulated into a flat `Vec` as the pipeline runs and
/// never merged or mutated once built.
#[derive(Clone, Debug, Serialize)]
pub struct Finding {
    pub severity: Severity,
    /// Short, stable tag identifying the kind of finding, e.g. `plain_secret`.
    pub category: &'static str,
    /// The rule that produced this finding, for deterministic tie-breaking.
    pub rule_id: &'static str,
    pub component: Option<String>,
    pub file: Option<Utf8PathBuf>,
    pub line: Option<u32>,
    pub message: String,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// The fixed cross-rule tie-break order from spec.md §4.E, plus
/// `R-REQUIRED-METADATA` slotted in immediately after `R-SCHEMA` per
/// `rules::default_rules`'s registration order.
const RULE_ORDER: &[&str] = &[
    "R-NAME",
    "R-SCHEMA",
    "R-REQUIRED-METADATA",
    "R-SECRET-LEAK",
    "R-HTTPS",
    "R-RATELIMIT",
    "R-OPA",
    "R-BEARER",
    "R-RESILIENCY",
    "R-AZURE-IDENTITY",
    "X-CYCLE",
    "X-SECRET-REF",
    "X-SCOPE",
    "X-SERVICE-INVOKE",
    "X-CHAIN-DEPTH",
    "X-PORT",
    "X-QUOTA",
    "X-MTLS",
];

/// Position of `rule_id` in [`RULE_ORDER`]. Unknown ids (there are none in
/// practice — this is exhaustive over every rule in the registry) sort last.
fn rule_rank(rule_id: &str) -> u8 {
    RULE_ORDER
        .iter()
        .position(|id| *id == rule_id)
        .map_or(u8::MAX, |pos| pos as u8)
}

impl Finding {
    pub fn builder(rule_id: &'static str, category: &'static str) -> FindingBuilder {
        FindingBuilder::new(rule_id, category)
    }

    /// The sort key used to make emission order deterministic, per the
    /// spec's ordering contract: `(rule id, component name, file, message)`.
    ///
    /// "Rule id" here means the fixed cross-rule order spec.md §4.E spells
    /// out (NAME, SCHEMA, ..., MTLS), not the lexicographic order of the
    /// `rule_id` tag string itself — `R-AZURE-IDENTITY` sorting before
    /// `R-NAME` would contradict the table. `rule_rank` maps each tag to its
    /// position in that table.
    fn sort_key(&self) -> (u8, &str, &str, &str) {
        (
            rule_rank(self.rule_id),
            self.component.as_deref().unwrap_or(""),
            self.file.as_ref().map(Utf8PathBuf::as_str).unwrap_or(""),
            self.message.as_str(),
        )
    }
}

impl PartialEq for Finding {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Finding {}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

pub struct FindingBuilder {
    rule_id: &'static str,
    category: &'static str,
    severity: Severity,
    component: Option<String>,
    file: Option<Utf8PathBuf>,
    line: Option<u32>,
    message: String,
    details: serde_json::Map<String, serde_json::Value>,
}

impl FindingBuilder {
    fn new(rule_id: &'static str, category: &'static str) -> Self {
        Self {
            rule_id,
            category,
            severity: Severity::Info,
            component: None,
            file: None,
            line: None,
            message: String::new(),
            details: serde_json::Map::new(),
        }
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn file(mut self, file: impl Into<Utf8PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> Finding {
        Finding {
            severity: self.severity,
            category: self.category,
            rule_id: self.rule_id,
            component: self.component,
            file: self.file,
            line: self.line,
            message: self.message,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn findings_sort_by_rule_component_file_message() {
        // X-MTLS sorts last in the spec's fixed cross-rule order even
        // though "X" < "R-NAME" alphabetically: the sort key is each
        // rule's position in that table, not the rule_id string itself.
        let mut findings = vec![
            Finding::builder("X-MTLS", "cat")
                .message("m")
                .component("b")
                .build(),
            Finding::builder("R-NAME", "cat")
                .message("m")
                .component("a")
                .build(),
            Finding::builder("R-NAME", "cat")
                .message("m")
                .component("a")
                .file("z.yaml")
                .build(),
        ];
        findings.sort();
        assert_eq!(findings[0].rule_id, "R-NAME");
        assert_eq!(findings[1].rule_id, "R-NAME");
        assert!(findings[1].file.is_some());
        assert_eq!(findings[2].rule_id, "X-MTLS");
    }

    #[test]
    fn rule_rank_matches_spec_cross_rule_order() {
        assert!(rule_rank("R-NAME") < rule_rank("R-SCHEMA"));
        assert!(rule_rank("R-SCHEMA") < rule_rank("R-REQUIRED-METADATA"));
        assert!(rule_rank("R-AZURE-IDENTITY") < rule_rank("X-CYCLE"));
        assert!(rule_rank("X-CYCLE") < rule_rank("X-SECRET-REF"));
        assert!(rule_rank("X-SECRET-REF") < rule_rank("X-SCOPE"));
        assert!(rule_rank("X-SERVICE-INVOKE") < rule_rank("X-CHAIN-DEPTH"));
        assert!(rule_rank("X-CHAIN-DEPTH") < rule_rank("X-PORT"));
        assert!(rule_rank("X-QUOTA") < rule_rank("X-MTLS"));
    }
}
