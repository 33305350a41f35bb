use camino::Utf8Path;
use serde_yaml::Value;

use super::str_field;
use crate::finding::{Finding, Severity};
use crate::model::{
    App, Quantity, ResourceRequest, ScaleSpec, DEFAULT_SIDECAR_GRPC_PORT, DEFAULT_SIDECAR_HTTP_PORT,
};

/// Decodes a `dapr.yaml` app manifest's `apps: [...]` list.
pub(super) fn parse_app_manifest(path: &Utf8Path, value: &Value) -> (Vec<App>, Vec<Finding>) {
    let mut apps = Vec::new();
    let mut findings = Vec::new();

    let Some(mapping) = value.as_mapping() else {
        return (apps, findings);
    };

    let Some(raw_apps) = mapping.get(Value::from("apps")).and_then(Value::as_sequence) else {
        return (apps, findings);
    };

    for (index, raw) in raw_apps.iter().enumerate() {
        let Some(entry) = raw.as_mapping() else {
            findings.push(
                Finding::builder("PARSE", "invalid_app_entry")
                    .severity(Severity::Error)
                    .file(path.to_path_buf())
                    .message(format!("app at index {index} is not a mapping"))
                    .build(),
            );
            continue;
        };

        let id = str_field(entry, "appId")
            .or_else(|| str_field(entry, "appID"))
            .unwrap_or_default()
            .to_string();

        if id.is_empty() {
            findings.push(
                Finding::builder("PARSE", "missing_app_id")
                    .severity(Severity::Error)
                    .file(path.to_path_buf())
                    .message(format!("app at index {index} missing 'appId'"))
                    .build(),
            );
            continue;
        }

        let app_port = entry
            .get(Value::from("appPort"))
            .and_then(Value::as_u64)
            .and_then(|p| u16::try_from(p).ok());

        let sidecar_http_port = entry
            .get(Value::from("daprHTTPPort"))
            .and_then(Value::as_u64)
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or(DEFAULT_SIDECAR_HTTP_PORT);

        let sidecar_grpc_port = entry
            .get(Value::from("daprGRPCPort"))
            .and_then(Value::as_u64)
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or(DEFAULT_SIDECAR_GRPC_PORT);

        let app_dir = str_field(entry, "appDirPath").map(Utf8Path::new).map(Utf8Path::to_path_buf);

        let (resources, mut resource_findings) = parse_resources(path, &id, entry);
        findings.append(&mut resource_findings);

        let scale = entry
            .get(Value::from("scale"))
            .and_then(Value::as_mapping)
            .map(|scale| ScaleSpec {
                min_replicas: scale
                    .get(Value::from("minReplicas"))
                    .and_then(Value::as_u64)
                    .unwrap_or(0) as u32,
                max_replicas: scale
                    .get(Value::from("maxReplicas"))
                    .and_then(Value::as_u64)
                    .unwrap_or(0) as u32,
            });

        apps.push(App {
            id,
            app_port,
            sidecar_http_port,
            sidecar_grpc_port,
            app_dir,
            resources,
            scale,
            source_file: path.to_path_buf(),
        });
    }

    (apps, findings)
}

fn parse_resources(
    path: &Utf8Path,
    app_id: &str,
    entry: &serde_yaml::Mapping,
) -> (Option<ResourceRequest>, Vec<Finding>) {
    let mut findings = Vec::new();
    let Some(resources) = entry.get(Value::from("resources")).and_then(Value::as_mapping) else {
        return (None, findings);
    };

    let cpu = resources
        .get(Value::from("cpu"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let memory = match str_field(resources, "memory") {
        Some(raw) => Quantity::parse(raw).unwrap_or_else(|| {
            findings.push(
                Finding::builder("PARSE", "invalid_quantity")
                    .severity(Severity::Warning)
                    .component(app_id)
                    .file(path.to_path_buf())
                    .message(format!("could not parse memory quantity '{raw}'"))
                    .build(),
            );
            Quantity::default()
        }),
        None => Quantity::default(),
    };

    (Some(ResourceRequest { cpu, memory }), findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_apps_with_defaults() {
        let value: Value = serde_yaml::from_str(
            r#"
version: 1
apps:
  - appId: cartservice
    appPort: 6000
"#,
        )
        .unwrap();
        let (apps, findings) = parse_app_manifest(Utf8Path::new("dapr.yaml"), &value);
        assert!(findings.is_empty());
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].sidecar_http_port, DEFAULT_SIDECAR_HTTP_PORT);
        assert_eq!(apps[0].sidecar_grpc_port, DEFAULT_SIDECAR_GRPC_PORT);
    }

    #[test]
    fn flags_missing_app_id() {
        let value: Value = serde_yaml::from_str(
            r#"
version: 1
apps:
  - appPort: 6000
"#,
        )
        .unwrap();
        let (apps, findings) = parse_app_manifest(Utf8Path::new("dapr.yaml"), &value);
        assert!(apps.is_empty());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, "missing_app_id");
    }
}
