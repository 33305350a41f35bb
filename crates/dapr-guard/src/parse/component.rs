use camino::Utf8Path;
use serde_yaml::Value;

use super::str_field;
use crate::finding::{Finding, Severity};
use crate::model::{Component, ComponentKind, MetadataEntry, SecretRef};

/// Decodes a `kind: Component` document. Callers have already confirmed
/// `kind == "Component"`; this checks `apiVersion` and the remaining
/// required keys.
pub(super) fn parse_component(path: &Utf8Path, value: &Value) -> (Option<Component>, Vec<Finding>) {
    let mut findings = Vec::new();
    let mapping = value.as_mapping().expect("caller verified this is a mapping");

    let api_version = str_field(mapping, "apiVersion").unwrap_or_default();
    if api_version != "dapr.io/v1alpha1" {
        // Not ours: some other tool's `kind: Component` document. Silently
        // drop, per the schema-gate policy.
        return (None, findings);
    }

    let metadata = mapping.get(Value::from("metadata")).and_then(Value::as_mapping);
    let name = metadata
        .and_then(|m| str_field(m, "name"))
        .unwrap_or_default()
        .to_string();

    if name.is_empty() {
        findings.push(
            Finding::builder("PARSE", "missing_name")
                .severity(Severity::Error)
                .file(path.to_path_buf())
                .message("component is missing 'metadata.name'")
                .build(),
        );
        return (None, findings);
    }

    // Name-format validation (R-NAME) is the Rule Engine's job, run later
    // against every registered component regardless of how it was built;
    // the component is still registered under its raw name either way.

    let spec = mapping.get(Value::from("spec")).and_then(Value::as_mapping);
    let Some(spec) = spec else {
        findings.push(
            Finding::builder("PARSE", "missing_spec")
                .severity(Severity::Error)
                .component(name.clone())
                .file(path.to_path_buf())
                .message("component is missing 'spec'")
                .build(),
        );
        return (None, findings);
    };

    let driver = str_field(spec, "type").unwrap_or_default().to_string();
    if driver.is_empty() {
        findings.push(
            Finding::builder("PARSE", "missing_type")
                .severity(Severity::Error)
                .component(name.clone())
                .file(path.to_path_buf())
                .message("component is missing 'spec.type'")
                .build(),
        );
    }

    let version = str_field(spec, "version").unwrap_or_default().to_string();
    if version.is_empty() {
        findings.push(
            Finding::builder("PARSE", "missing_version")
                .severity(Severity::Error)
                .component(name.clone())
                .file(path.to_path_buf())
                .message("component is missing 'spec.version'")
                .build(),
        );
    }

    let kind = ComponentKind::classify(&driver);
    if kind == ComponentKind::Other && !driver.is_empty() {
        findings.push(
            Finding::builder("PARSE", "unknown_driver")
                .severity(Severity::Info)
                .component(name.clone())
                .file(path.to_path_buf())
                .message(format!("unrecognized component type '{driver}'"))
                .build(),
        );
    }

    let scopes = metadata
        .and_then(|m| m.get(Value::from("scopes")))
        .and_then(Value::as_sequence)
        .map(|seq| {
            seq.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let (metadata_entries, mut metadata_findings) =
        parse_metadata_entries(path, &name, spec);
    findings.append(&mut metadata_findings);

    let auth_secret_store = mapping
        .get(Value::from("auth"))
        .and_then(Value::as_mapping)
        .and_then(|auth| str_field(auth, "secretStore"))
        .map(str::to_string);

    let component = Component {
        name,
        kind,
        driver,
        version,
        scopes,
        metadata_entries,
        auth_secret_store,
        source_file: path.to_path_buf(),
    };

    (Some(component), findings)
}

fn parse_metadata_entries(
    path: &Utf8Path,
    component_name: &str,
    spec: &serde_yaml::Mapping,
) -> (Vec<MetadataEntry>, Vec<Finding>) {
    let mut entries = Vec::new();
    let mut findings = Vec::new();

    let Some(raw_entries) = spec.get(Value::from("metadata")).and_then(Value::as_sequence) else {
        return (entries, findings);
    };

    for raw in raw_entries {
        let Some(entry_map) = raw.as_mapping() else {
            continue;
        };

        let name = str_field(entry_map, "name").unwrap_or_default().to_string();
        let value = str_field(entry_map, "value").map(str::to_string);
        let secret_ref = entry_map
            .get(Value::from("secretKeyRef"))
            .and_then(Value::as_mapping)
            .map(|secret_ref_map| SecretRef {
                store: str_field(secret_ref_map, "name").unwrap_or_default().to_string(),
                key: str_field(secret_ref_map, "key").unwrap_or_default().to_string(),
            });

        match (&value, &secret_ref) {
            (Some(_), Some(_)) => {
                findings.push(
                    Finding::builder("PARSE", "ambiguous_metadata_entry")
                        .severity(Severity::Error)
                        .component(component_name)
                        .file(path.to_path_buf())
                        .message(format!(
                            "metadata entry '{name}' has both 'value' and 'secretKeyRef'"
                        ))
                        .build(),
                );
            }
            (None, None) => {
                findings.push(
                    Finding::builder("PARSE", "empty_metadata_entry")
                        .severity(Severity::Error)
                        .component(component_name)
                        .file(path.to_path_buf())
                        .message(format!(
                            "metadata entry '{name}' has neither 'value' nor 'secretKeyRef'"
                        ))
                        .build(),
                );
            }
            _ => {}
        }

        entries.push(MetadataEntry {
            name,
            value,
            secret_ref,
        });
    }

    (entries, findings)
}
