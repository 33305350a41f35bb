//! X-MTLS: mesh-wide mutual-TLS posture.

use crate::finding::{Finding, Severity};
use crate::model::Duration;
use crate::project::Project;

const MAX_CERT_TTL_SECS: f64 = 24.0 * 3600.0;
const MAX_CLOCK_SKEW_SECS: f64 = 15.0 * 60.0;

pub fn check(project: &Project, is_production: bool) -> Vec<Finding> {
    let Some(config) = &project.configuration else {
        return if is_production {
            vec![Finding::builder("X-MTLS", "mtls_absent")
                .severity(Severity::Warning)
                .message("no Configuration resource found; mTLS posture cannot be verified")
                .build()]
        } else {
            Vec::new()
        };
    };

    let mut findings = Vec::new();

    if !config.mtls_enabled && is_production {
        findings.push(
            Finding::builder("X-MTLS", "mtls_disabled")
                .severity(Severity::Error)
                .component(config.name.clone())
                .file(config.source_file.clone())
                .message("mTLS is disabled in a production run")
                .build(),
        );
    }

    if config.workload_cert_ttl.as_secs() > MAX_CERT_TTL_SECS {
        findings.push(
            Finding::builder("X-MTLS", "cert_ttl_too_long")
                .severity(Severity::Warning)
                .component(config.name.clone())
                .file(config.source_file.clone())
                .message(format!(
                    "workload cert TTL of {} exceeds 24h",
                    Duration::from_secs(config.workload_cert_ttl.as_secs())
                ))
                .build(),
        );
    }

    if config.allowed_clock_skew.as_secs() > MAX_CLOCK_SKEW_SECS {
        findings.push(
            Finding::builder("X-MTLS", "clock_skew_too_large")
                .severity(Severity::Warning)
                .component(config.name.clone())
                .file(config.source_file.clone())
                .message(format!(
                    "allowed clock skew of {} exceeds 15m",
                    Duration::from_secs(config.allowed_clock_skew.as_secs())
                ))
                .build(),
        );
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfigurationResource;
    use camino::Utf8PathBuf;
    use indexmap::IndexMap;

    fn project_with(config: Option<ConfigurationResource>) -> Project {
        Project {
            components: IndexMap::new(),
            apps: IndexMap::new(),
            configuration: config,
        }
    }

    #[test]
    fn warns_when_absent_in_production() {
        let findings = check(&project_with(None), true);
        assert_eq!(findings[0].category, "mtls_absent");
    }

    #[test]
    fn silent_when_absent_outside_production() {
        assert!(check(&project_with(None), false).is_empty());
    }

    #[test]
    fn errors_when_disabled_in_production() {
        let config = ConfigurationResource {
            name: "mesh".to_string(),
            mtls_enabled: false,
            workload_cert_ttl: Duration::ZERO,
            allowed_clock_skew: Duration::ZERO,
            source_file: Utf8PathBuf::from("config.yaml"),
        };
        let findings = check(&project_with(Some(config)), true);
        assert_eq!(findings[0].category, "mtls_disabled");
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn warns_on_long_ttl_and_skew() {
        let config = ConfigurationResource {
            name: "mesh".to_string(),
            mtls_enabled: true,
            workload_cert_ttl: Duration::from_secs(48.0 * 3600.0),
            allowed_clock_skew: Duration::from_secs(30.0 * 60.0),
            source_file: Utf8PathBuf::from("config.yaml"),
        };
        let findings = check(&project_with(Some(config)), true);
        assert_eq!(findings.len(), 2);
    }
}
