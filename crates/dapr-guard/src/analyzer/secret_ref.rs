//! X-SECRET-REF: references to a secret store that doesn't exist, or that
//! exists but isn't actually a `secretstore` component.

use crate::finding::{Finding, Severity};
use crate::model::Component;
use crate::project::Project;

struct Reference<'a> {
    field: &'static str,
    store: &'a str,
}

fn known_secret_store(project: &Project, name: &str) -> bool {
    project.component(name).map(Component::is_secret_store).unwrap_or(false)
}

pub fn check(project: &Project) -> Vec<Finding> {
    let has_any_secret_store = project.components.values().any(Component::is_secret_store);
    let mut findings = Vec::new();

    for component in project.components.values() {
        let mut refs: Vec<Reference> = component
            .metadata_entries
            .iter()
            .filter_map(|entry| {
                entry
                    .secret_ref
                    .as_ref()
                    .map(|secret_ref| Reference {
                        field: "secretKeyRef",
                        store: secret_ref.store.as_str(),
                    })
            })
            .collect();

        if let Some(store) = &component.auth_secret_store {
            refs.push(Reference {
                field: "auth.secretStore",
                store,
            });
        }

        for reference in refs {
            if known_secret_store(project, reference.store) {
                continue;
            }

            let mut message = format!(
                "component '{}' references unknown secret store '{}' via '{}'",
                component.name, reference.store, reference.field
            );
            if !has_any_secret_store {
                message.push_str("; the project has no secretstore component at all, consider introducing one");
            }

            findings.push(
                Finding::builder("X-SECRET-REF", "missing_secret_store")
                    .severity(Severity::Error)
                    .component(component.name.clone())
                    .file(component.source_file.clone())
                    .message(message)
                    .build(),
            );
        }
    }

    findings
}
