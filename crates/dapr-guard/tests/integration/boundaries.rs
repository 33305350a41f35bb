//! Boundary behaviors that aren't already covered by one of the six
//! concrete scenarios in `scenarios.rs`.

use std::fs;
use std::os::unix::fs::symlink;

use test_support::{DaprGuard, Fixture};

#[test]
fn empty_directory_reports_nothing() {
    let fixture = Fixture::new();
    let result = DaprGuard::new().path(fixture.path()).json().run();
    assert_eq!(result.code, 0);
    let json = result.json();
    assert_eq!(json["components"].as_array().unwrap().len(), 0);
    assert_eq!(json["apps"].as_array().unwrap().len(), 0);
    assert_eq!(json["issues"].as_array().unwrap().len(), 0);
    assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
}

#[test]
fn unreadable_entry_degrades_to_a_load_error_warning_not_a_fatal_error() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.path().join("components")).unwrap();
    // A dangling symlink can't be stat'd by the walker regardless of the
    // invoking user's privileges, unlike a chmod-0 file (which root can
    // still read) — so this is what actually exercises the load_error path.
    symlink(
        fixture.path().join("components/does-not-exist.yaml"),
        fixture.path().join("components/broken.yaml"),
    )
    .unwrap();

    let result = DaprGuard::new().path(fixture.path()).json().run();
    assert_eq!(result.code, 0);
    let json = result.json();
    let warnings = json["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|f| f["category"] == "load_error"));
}

#[test]
fn overlapping_cycles_sharing_a_node_are_both_reported() {
    let fixture = Fixture::new();
    // a <-> b (len 2), and a -> c -> d -> a (len 3), sharing `a`.
    fixture.file(
        "components/a.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: a
spec:
  type: secretstores.local.file
  version: v1
  metadata:
    - name: one
      secretKeyRef: {name: b, key: k}
    - name: two
      secretKeyRef: {name: c, key: k}
"#,
    );
    fixture.file(
        "components/b.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: b
spec:
  type: secretstores.local.file
  version: v1
  metadata:
    - name: one
      secretKeyRef: {name: a, key: k}
"#,
    );
    fixture.file(
        "components/c.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: c
spec:
  type: secretstores.local.file
  version: v1
  metadata:
    - name: one
      secretKeyRef: {name: d, key: k}
"#,
    );
    fixture.file(
        "components/d.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: d
spec:
  type: secretstores.local.file
  version: v1
  metadata:
    - name: one
      secretKeyRef: {name: a, key: k}
"#,
    );

    let result = DaprGuard::new().path(fixture.path()).json().run();
    let json = result.json();
    let cycles: Vec<&serde_json::Value> = json["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["category"] == "circular_dependency")
        .collect();
    assert_eq!(cycles.len(), 2);
}

#[test]
fn app_port_3500_is_reserved_but_not_a_quota_error() {
    let fixture = Fixture::new();
    fixture.file(
        "dapr.yaml",
        r#"
apps:
  - appId: svc-a
    appPort: 3500
"#,
    );

    let result = DaprGuard::new().path(fixture.path()).json().run();
    let json = result.json();
    assert_eq!(json["issues"].as_array().unwrap().len(), 0);
    let warnings = json["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["category"], "reserved_port");
}

#[test]
fn idempotent_across_repeated_runs() {
    let fixture = Fixture::new();
    fixture.file(
        "components/statestore.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: statestore
spec:
  type: state.redis
  version: v1
  metadata:
    - name: redisHost
      value: "localhost:6379"
"#,
    );

    let first = DaprGuard::new().path(fixture.path()).json().run();
    let second = DaprGuard::new().path(fixture.path()).json().run();
    assert_eq!(first.stdout, second.stdout);
}
