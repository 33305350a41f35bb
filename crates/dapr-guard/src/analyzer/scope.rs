//! X-SCOPE: a component scoped to an app id that doesn't exist.
//! Skipped entirely when the project has zero apps, since
//! there is nothing to validate scopes against.

use crate::finding::{Finding, Severity};
use crate::project::Project;

pub fn check(project: &Project) -> Vec<Finding> {
    if project.apps.is_empty() {
        return Vec::new();
    }

    let app_ids = project.app_ids();
    let mut findings = Vec::new();

    for component in project.components.values() {
        for scope in &component.scopes {
            if app_ids.contains(scope.as_str()) {
                continue;
            }

            findings.push(
                Finding::builder("X-SCOPE", "unknown_scope")
                    .severity(Severity::Warning)
                    .component(component.name.clone())
                    .file(component.source_file.clone())
                    .message(format!(
                        "component '{}' is scoped to unknown app '{scope}'",
                        component.name
                    ))
                    .build(),
            );
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{App, Component, ComponentKind, DEFAULT_SIDECAR_GRPC_PORT, DEFAULT_SIDECAR_HTTP_PORT};
    use camino::Utf8PathBuf;
    use indexmap::IndexMap;

    fn app(id: &str) -> App {
        App {
            id: id.to_string(),
            app_port: None,
            sidecar_http_port: DEFAULT_SIDECAR_HTTP_PORT,
            sidecar_grpc_port: DEFAULT_SIDECAR_GRPC_PORT,
            app_dir: None,
            resources: None,
            scale: None,
            source_file: Utf8PathBuf::from("dapr.yaml"),
        }
    }

    fn component(scopes: Vec<&str>) -> Component {
        Component {
            name: "c".to_string(),
            kind: ComponentKind::State,
            driver: "state.redis".to_string(),
            version: "v1".to_string(),
            scopes: scopes.into_iter().map(str::to_string).collect(),
            metadata_entries: Vec::new(),
            auth_secret_store: None,
            source_file: Utf8PathBuf::from("c.yaml"),
        }
    }

    #[test]
    fn flags_dangling_scope() {
        let project = Project {
            components: [("c".to_string(), component(vec!["payments-service"]))].into_iter().collect::<IndexMap<_, _>>(),
            apps: [("orders-service".to_string(), app("orders-service"))].into_iter().collect::<IndexMap<_, _>>(),
            configuration: None,
        };
        let findings = check(&project);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "unknown_scope");
    }

    #[test]
    fn skips_when_no_apps_exist() {
        let project = Project {
            components: [("c".to_string(), component(vec!["payments-service"]))].into_iter().collect::<IndexMap<_, _>>(),
            apps: IndexMap::new(),
            configuration: None,
        };
        assert!(check(&project).is_empty());
    }
}
