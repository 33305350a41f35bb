use camino::Utf8Path;
use serde_yaml::Value;

use super::str_field;
use crate::finding::{Finding, Severity};
use crate::model::{ConfigurationResource, Duration};

/// Decodes a `kind: Configuration` document into a [`ConfigurationResource`].
pub(super) fn parse_configuration(
    path: &Utf8Path,
    value: &Value,
) -> (Option<ConfigurationResource>, Vec<Finding>) {
    let mut findings = Vec::new();
    let mapping = value.as_mapping().expect("caller verified this is a mapping");

    let name = mapping
        .get(Value::from("metadata"))
        .and_then(Value::as_mapping)
        .and_then(|m| str_field(m, "name"))
        .unwrap_or("configuration")
        .to_string();

    let Some(spec) = mapping.get(Value::from("spec")).and_then(Value::as_mapping) else {
        return (None, findings);
    };

    let mtls = spec.get(Value::from("mtls")).and_then(Value::as_mapping);

    let mtls_enabled = mtls
        .and_then(|m| m.get(Value::from("enabled")))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let workload_cert_ttl = mtls
        .and_then(|m| str_field(m, "workloadCertTTL"))
        .map(|raw| {
            Duration::parse(raw).unwrap_or_else(|| {
                findings.push(
                    Finding::builder("PARSE", "invalid_duration")
                        .severity(Severity::Warning)
                        .component(name.clone())
                        .file(path.to_path_buf())
                        .message(format!("could not parse workloadCertTTL '{raw}'"))
                        .build(),
                );
                Duration::ZERO
            })
        })
        .unwrap_or(Duration::ZERO);

    let allowed_clock_skew = mtls
        .and_then(|m| str_field(m, "allowedClockSkew"))
        .map(|raw| {
            Duration::parse(raw).unwrap_or_else(|| {
                findings.push(
                    Finding::builder("PARSE", "invalid_duration")
                        .severity(Severity::Warning)
                        .component(name.clone())
                        .file(path.to_path_buf())
                        .message(format!("could not parse allowedClockSkew '{raw}'"))
                        .build(),
                );
                Duration::ZERO
            })
        })
        .unwrap_or(Duration::ZERO);

    (
        Some(ConfigurationResource {
            name,
            mtls_enabled,
            workload_cert_ttl,
            allowed_clock_skew,
            source_file: path.to_path_buf(),
        }),
        findings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mtls_block() {
        let value: Value = serde_yaml::from_str(
            r#"
apiVersion: dapr.io/v1alpha1
kind: Configuration
metadata:
  name: mesh
spec:
  mtls:
    enabled: true
    workloadCertTTL: 24h
    allowedClockSkew: 15m
"#,
        )
        .unwrap();
        let (config, findings) = parse_configuration(Utf8Path::new("config.yaml"), &value);
        let config = config.unwrap();
        assert!(findings.is_empty());
        assert!(config.mtls_enabled);
        assert_eq!(config.workload_cert_ttl.as_secs(), 86400.0);
        assert_eq!(config.allowed_clock_skew.as_secs(), 900.0);
    }
}
