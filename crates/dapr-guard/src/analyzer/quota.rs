//! X-QUOTA: app resource requests and replica ceilings against the
//! selected deployment platform's limits.

use crate::config::DeploymentTarget;
use crate::finding::{Finding, Severity};
use crate::project::Project;

pub fn check(project: &Project, target: DeploymentTarget) -> Vec<Finding> {
    let limits = target.limits();
    let mut findings = Vec::new();

    for app in project.apps.values() {
        if let Some(resources) = &app.resources {
            if resources.cpu > limits.cpu_max {
                findings.push(
                    Finding::builder("X-QUOTA", "cpu_quota_exceeded")
                        .severity(Severity::Error)
                        .component(app.id.clone())
                        .file(app.source_file.clone())
                        .message(format!(
                            "app '{}' requests {} cpu cores, exceeding {}'s limit of {}",
                            app.id,
                            resources.cpu,
                            target.label(),
                            limits.cpu_max
                        ))
                        .build(),
                );
            }

            if resources.memory.bytes() > limits.memory_max.bytes() {
                findings.push(
                    Finding::builder("X-QUOTA", "memory_quota_exceeded")
                        .severity(Severity::Error)
                        .component(app.id.clone())
                        .file(app.source_file.clone())
                        .message(format!(
                            "app '{}' requests {}, exceeding {}'s limit of {}",
                            app.id,
                            resources.memory,
                            target.label(),
                            limits.memory_max
                        ))
                        .build(),
                );
            }
        }

        if let Some(scale) = &app.scale {
            if scale.max_replicas > limits.max_replicas {
                findings.push(
                    Finding::builder("X-QUOTA", "replica_quota_exceeded")
                        .severity(Severity::Error)
                        .component(app.id.clone())
                        .file(app.source_file.clone())
                        .message(format!(
                            "app '{}' requests {} max replicas, exceeding {}'s limit of {}",
                            app.id,
                            scale.max_replicas,
                            target.label(),
                            limits.max_replicas
                        ))
                        .build(),
                );
            }
        }
    }

    findings
}
