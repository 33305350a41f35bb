//! The Discovery Walker.
//!
//! Resolves a configuration root by walking toward the filesystem root
//! looking for `dapr.yaml` or a `components/` directory, then enumerates
//! candidate files beneath it.

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;

use crate::finding::{Finding, Severity};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Classification {
    AppManifest,
    ComponentCandidate,
}

pub struct Candidate {
    pub path: Utf8PathBuf,
    pub classification: Classification,
}

const COMPONENT_SUBDIRS: &[&str] = &["components", "middleware", "bindings"];

/// Walks upward from `start` looking for `dapr.yaml`/`dapr.yml` or a
/// `components` directory. Falls back to `start` itself if neither is
/// found before the filesystem root, which is not an error.
pub fn resolve_configuration_root(start: &Utf8Path) -> Utf8PathBuf {
    let mut current = start.to_path_buf();
    if let Ok(canonical) = current.canonicalize_utf8() {
        current = canonical;
    }

    let mut cursor = current.as_path();
    loop {
        if cursor.join("dapr.yaml").is_file()
            || cursor.join("dapr.yml").is_file()
            || cursor.join("components").is_dir()
        {
            return cursor.to_path_buf();
        }

        match cursor.parent() {
            Some(parent) => cursor = parent,
            None => return current,
        }
    }
}

/// Enumerates candidate files under `root`, classifying each as an
/// app-manifest or component-candidate. Entries are returned in
/// deterministic, case-sensitive lexicographic order of relative path.
///
/// Unreadable entries produce a `load_error` warning [`Finding`] rather
/// than aborting the walk.
pub fn discover(start: &Utf8Path) -> (Vec<Candidate>, Vec<Finding>) {
    let root = resolve_configuration_root(start);
    let mut findings = Vec::new();
    let mut candidates = Vec::new();

    for name in ["dapr.yaml", "dapr.yml"] {
        let path = root.join(name);
        if path.is_file() {
            candidates.push(Candidate {
                path,
                classification: Classification::AppManifest,
            });
            break;
        }
    }

    for subdir in COMPONENT_SUBDIRS {
        let dir = root.join(subdir);
        if !dir.is_dir() {
            continue;
        }

        let walker = WalkBuilder::new(&dir)
            .follow_links(true)
            .git_ignore(false)
            .git_exclude(false)
            .git_global(false)
            .hidden(false)
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                        continue;
                    };

                    let is_yaml = matches!(path.extension(), Some("yaml") | Some("yml"));
                    if is_yaml {
                        candidates.push(Candidate {
                            path,
                            classification: Classification::ComponentCandidate,
                        });
                    }
                }
                Err(err) => {
                    findings.push(
                        Finding::builder("DISCOVERY", "load_error")
                            .severity(Severity::Warning)
                            .message(format!("could not read entry: {err}"))
                            .build(),
                    );
                }
            }
        }
    }

    candidates.sort_by(|a, b| a.path.as_str().cmp(b.path.as_str()));

    (candidates, findings)
}
