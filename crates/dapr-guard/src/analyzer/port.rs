//! X-PORT: apps colliding on `appPort`, and apps claiming a reserved sidecar
//! port.

use indexmap::IndexMap;

use crate::finding::{Finding, Severity};
use crate::model::App;
use crate::project::Project;

/// Ports the sidecar runtime itself binds by default; only flagged when an
/// app explicitly claims one as its *own* `appPort`, never as a default
/// sidecar port.
const RESERVED_PORTS: &[u16] = &[3500, 50001, 9090, 8080, 8443];

pub fn check(project: &Project) -> Vec<Finding> {
    let mut by_port: IndexMap<u16, Vec<&App>> = IndexMap::new();
    for app in project.apps.values() {
        if let Some(port) = app.app_port {
            by_port.entry(port).or_default().push(app);
        }
    }

    let mut findings = Vec::new();
    for (port, apps) in &by_port {
        if apps.len() > 1 {
            let mut names: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
            names.sort_unstable();

            findings.push(
                Finding::builder("X-PORT", "port_conflict")
                    .severity(Severity::Error)
                    .message(format!(
                        "port {port} is claimed by multiple apps: {}",
                        names.join(", ")
                    ))
                    .detail("port", *port as u64)
                    .detail("apps", names.iter().map(|n| n.to_string()).collect::<Vec<_>>())
                    .build(),
            );
        }

        if RESERVED_PORTS.contains(port) {
            for app in apps {
                findings.push(
                    Finding::builder("X-PORT", "reserved_port")
                        .severity(Severity::Warning)
                        .component(app.id.clone())
                        .file(app.source_file.clone())
                        .message(format!(
                            "app '{}' claims reserved port {port} as its appPort",
                            app.id
                        ))
                        .build(),
                );
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_SIDECAR_GRPC_PORT, DEFAULT_SIDECAR_HTTP_PORT};
    use camino::Utf8PathBuf;

    fn app(id: &str, port: u16) -> App {
        App {
            id: id.to_string(),
            app_port: Some(port),
            sidecar_http_port: DEFAULT_SIDECAR_HTTP_PORT,
            sidecar_grpc_port: DEFAULT_SIDECAR_GRPC_PORT,
            app_dir: None,
            resources: None,
            scale: None,
            source_file: Utf8PathBuf::from("dapr.yaml"),
        }
    }

    fn project_of(apps: Vec<App>) -> Project {
        Project {
            components: IndexMap::new(),
            apps: apps.into_iter().map(|a| (a.id.clone(), a)).collect::<IndexMap<_, _>>(),
            configuration: None,
        }
    }

    #[test]
    fn flags_port_conflict_and_reserved() {
        let project = project_of(vec![app("svc-a", 8080), app("svc-b", 8080)]);
        let findings = check(&project);
        assert!(findings.iter().any(|f| f.category == "port_conflict"));
        assert_eq!(findings.iter().filter(|f| f.category == "reserved_port").count(), 2);
    }

    #[test]
    fn flags_3500_as_reserved_without_quota_error() {
        let project = project_of(vec![app("svc-a", 3500)]);
        let findings = check(&project);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "reserved_port");
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn accepts_distinct_non_reserved_ports() {
        let project = project_of(vec![app("svc-a", 6000), app("svc-b", 6001)]);
        assert!(check(&project).is_empty());
    }
}
