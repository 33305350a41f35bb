//! The Project: the immutable bag of parsed artifacts.

use std::collections::HashSet;

use camino::Utf8Path;
use indexmap::IndexMap;

use crate::discovery::{self, Classification};
use crate::finding::{Finding, Severity};
use crate::model::{App, Component, ConfigurationResource};
use crate::parse::{self, ParsedDocument};

/// Bag of artifacts after parsing, indexed by kind and name.
pub struct Project {
    pub components: IndexMap<String, Component>,
    pub apps: IndexMap<String, App>,
    pub configuration: Option<ConfigurationResource>,
}

impl Project {
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn app_ids(&self) -> HashSet<&str> {
        self.apps.keys().map(String::as_str).collect()
    }

    /// Components with `scopes` referencing an app id that doesn't exist
    /// are still loaded (invariant 4: reported, not fatal); see
    /// `crate::analyzer::scope`.
    pub fn components_in_order(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }
}

/// Runs the Discovery Walker and Parser over `root`, assembling a
/// [`Project`] plus every finding produced along the way.
///
/// Duplicate component names and duplicate app ids are fatal to the
/// duplicate artifact itself: the first-seen artifact wins and a
/// severity-error finding is recorded for every subsequent duplicate, but
/// the run continues rather than aborting (see DESIGN.md open-question
/// resolution).
pub fn build(root: &Utf8Path) -> (Project, Vec<Finding>) {
    let mut findings = Vec::new();
    let (candidates, mut discovery_findings) = discovery::discover(root);
    findings.append(&mut discovery_findings);

    let mut components = IndexMap::new();
    let mut apps = IndexMap::new();
    let mut configuration = None;

    for candidate in candidates {
        let is_app_manifest = candidate.classification == Classification::AppManifest;
        let (document, mut parse_findings) = parse::parse_file(&candidate.path, is_app_manifest);
        findings.append(&mut parse_findings);

        match document {
            Some(ParsedDocument::Component(component)) => {
                if let Some(existing) = components.get(&component.name) {
                    findings.push(
                        Finding::builder("PARSE", "duplicate_component")
                            .severity(Severity::Error)
                            .component(component.name.clone())
                            .file(candidate.path.clone())
                            .message(format!(
                                "duplicate component name '{}' (first seen in {})",
                                component.name,
                                existing.source_file
                            ))
                            .build(),
                    );
                } else {
                    components.insert(component.name.clone(), component);
                }
            }
            Some(ParsedDocument::AppManifest(manifest_apps)) => {
                for app in manifest_apps {
                    if let Some(existing) = apps.get(&app.id) {
                        findings.push(
                            Finding::builder("PARSE", "duplicate_app_id")
                                .severity(Severity::Error)
                                .component(app.id.clone())
                                .file(candidate.path.clone())
                                .message(format!(
                                    "duplicate appId '{}' (first seen in {})",
                                    app.id,
                                    existing.source_file
                                ))
                                .build(),
                        );
                    } else {
                        apps.insert(app.id.clone(), app);
                    }
                }
            }
            Some(ParsedDocument::Configuration(config)) => {
                if configuration.is_some() {
                    findings.push(
                        Finding::builder("PARSE", "duplicate_configuration")
                            .severity(Severity::Error)
                            .file(candidate.path.clone())
                            .message("multiple Configuration resources found; only one is supported")
                            .build(),
                    );
                } else {
                    configuration = Some(config);
                }
            }
            Some(ParsedDocument::Unrecognized) | None => {}
        }
    }

    (
        Project {
            components,
            apps,
            configuration,
        },
        findings,
    )
}
