//! X-SERVICE-INVOKE: best-effort textual scan of an app's source tree for
//! `invoke("target")` calls naming a service id that isn't registered
//! anywhere in the project. File-read failures are silently
//! skipped; this rule never turns a scan error into a fatal condition.

use camino::Utf8PathBuf;
use ignore::WalkBuilder;
use regex::Regex;

use crate::finding::{Finding, Severity};
use crate::project::Project;

fn invoke_pattern() -> Regex {
    Regex::new(r#"invoke\s*\(\s*["']([a-zA-Z0-9_-]+)["']"#).expect("static pattern is valid")
}

pub fn check(project: &Project) -> Vec<Finding> {
    let app_ids = project.app_ids();
    let pattern = invoke_pattern();
    let mut findings = Vec::new();

    for app in project.apps.values() {
        let Some(app_dir) = &app.app_dir else {
            continue;
        };

        let base = app.source_file.parent().unwrap_or_else(|| camino::Utf8Path::new("."));
        let resolved = if app_dir.is_absolute() {
            app_dir.clone()
        } else {
            base.join(app_dir)
        };

        if !resolved.is_dir() {
            continue;
        }

        let walker = WalkBuilder::new(&resolved)
            .follow_links(true)
            .git_ignore(false)
            .git_exclude(false)
            .git_global(false)
            .hidden(false)
            .build();

        for entry in walker {
            let Ok(entry) = entry else { continue };
            let Some(file_type) = entry.file_type() else { continue };
            if !file_type.is_file() {
                continue;
            }

            let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                continue;
            };
            if !matches!(path.extension(), Some("py") | Some("js") | Some("ts")) {
                continue;
            }

            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };

            for captures in pattern.captures_iter(&content) {
                let target = &captures[1];
                if target == app.id || app_ids.contains(target) {
                    continue;
                }

                findings.push(
                    Finding::builder("X-SERVICE-INVOKE", "unknown_service")
                        .severity(Severity::Warning)
                        .component(app.id.clone())
                        .file(path.clone())
                        .message(format!(
                            "app '{}' invokes unregistered service '{target}'",
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
    use crate::model::{App, DEFAULT_SIDECAR_GRPC_PORT, DEFAULT_SIDECAR_HTTP_PORT};
    use indexmap::IndexMap;
    use std::fs;

    #[test]
    fn flags_unknown_invoke_target() {
        let tmp = tempfile::tempdir().unwrap();
        let root = camino::Utf8Path::from_path(tmp.path()).unwrap();
        fs::create_dir_all(root.join("cart")).unwrap();
        fs::write(
            root.join("cart/main.py"),
            "client.invoke(\"ghost-service\")\nclient.invoke('cart')\n",
        )
        .unwrap();

        let app = App {
            id: "cart".to_string(),
            app_port: None,
            sidecar_http_port: DEFAULT_SIDECAR_HTTP_PORT,
            sidecar_grpc_port: DEFAULT_SIDECAR_GRPC_PORT,
            app_dir: Some(camino::Utf8PathBuf::from("cart")),
            resources: None,
            scale: None,
            source_file: root.join("dapr.yaml"),
        };

        let project = Project {
            components: IndexMap::new(),
            apps: [("cart".to_string(), app)].into_iter().collect::<IndexMap<_, _>>(),
            configuration: None,
        };

        let findings = check(&project);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("ghost-service"));
    }
}
