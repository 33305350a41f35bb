//! Six concrete end-to-end scenarios covering the pipeline's main behaviors.

use test_support::{DaprGuard, Fixture};

#[test]
fn scenario_1_clean_project_has_no_findings() {
    let fixture = Fixture::new();
    fixture.file(
        "dapr.yaml",
        r#"
apps:
  - appId: svc-a
    appPort: 8001
"#,
    );
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

    let result = DaprGuard::new().path(fixture.path()).json().run();
    assert_eq!(result.code, 0);
    let json = result.json();
    assert_eq!(json["issues"].as_array().unwrap().len(), 0);
    assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
}

#[test]
fn scenario_2_plain_text_secret_is_an_error() {
    let fixture = Fixture::new();
    fixture.file(
        "components/db.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: db
spec:
  type: state.azure.cosmosdb
  version: v1
  metadata:
    - name: url
      value: "https://example.documents.azure.com"
    - name: database
      value: appdb
    - name: collection
      value: items
    - name: masterKey
      value: "supersecretkey123"
"#,
    );

    let result = DaprGuard::new().path(fixture.path()).json().run();
    let json = result.json();
    let issues = json["issues"].as_array().unwrap();
    assert!(issues
        .iter()
        .any(|f| f["category"] == "plain_secret" && f["component"] == "db"));

    let strict = DaprGuard::new().path(fixture.path()).strict().run();
    assert_eq!(strict.code, 1);
}

#[test]
fn scenario_3_circular_secret_store_dependency() {
    let fixture = Fixture::new();
    fixture.file(
        "components/vault-a.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: vault-a
spec:
  type: secretstores.local.file
  version: v1
  metadata:
    - name: secretsFile
      value: secrets.json
auth:
  secretStore: vault-b
"#,
    );
    fixture.file(
        "components/vault-b.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: vault-b
spec:
  type: secretstores.local.file
  version: v1
  metadata:
    - name: secretsFile
      value: secrets.json
auth:
  secretStore: vault-a
"#,
    );

    let result = DaprGuard::new().path(fixture.path()).json().run();
    let json = result.json();
    let issues = json["issues"].as_array().unwrap();
    let cycle = issues
        .iter()
        .find(|f| f["category"] == "circular_dependency")
        .expect("expected a circular_dependency finding");
    let cycle_nodes: Vec<&str> = cycle["details"]["cycle"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(cycle_nodes, vec!["vault-a", "vault-b", "vault-a"]);

    let strict = DaprGuard::new().path(fixture.path()).strict().run();
    assert_eq!(strict.code, 1);
}

#[test]
fn scenario_4_dangling_scope_is_a_warning_not_an_error() {
    let fixture = Fixture::new();
    fixture.file(
        "dapr.yaml",
        r#"
apps:
  - appId: orders-service
"#,
    );
    fixture.file(
        "components/statestore.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: statestore
  scopes:
    - payments-service
spec:
  type: state.redis
  version: v1
  metadata:
    - name: redisHost
      value: "localhost:6379"
"#,
    );

    let result = DaprGuard::new().path(fixture.path()).json().run();
    assert_eq!(result.code, 0);
    let json = result.json();
    assert_eq!(json["issues"].as_array().unwrap().len(), 0);
    let warnings = json["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|f| f["category"] == "unknown_scope"));

    let strict = DaprGuard::new().path(fixture.path()).strict().run();
    assert_eq!(strict.code, 0);

    let strict_warn = DaprGuard::new().path(fixture.path()).strict().warnings_as_errors().run();
    assert_eq!(strict_warn.code, 1);
}

#[test]
fn scenario_5_port_conflict_between_apps() {
    let fixture = Fixture::new();
    fixture.file(
        "dapr.yaml",
        r#"
apps:
  - appId: svc-a
    appPort: 8080
  - appId: svc-b
    appPort: 8080
"#,
    );

    let result = DaprGuard::new().path(fixture.path()).json().run();
    let json = result.json();
    let issues = json["issues"].as_array().unwrap();
    assert!(issues.iter().any(|f| f["category"] == "port_conflict"));
    let warnings = json["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|f| f["category"] == "reserved_port"));

    let strict = DaprGuard::new().path(fixture.path()).strict().run();
    assert_eq!(strict.code, 1);
}

#[test]
fn scenario_6_mtls_disabled_in_production() {
    let fixture = Fixture::new();
    fixture.file(
        "components/config.yaml",
        r#"
apiVersion: dapr.io/v1alpha1
kind: Configuration
metadata:
  name: mesh
spec:
  mtls:
    enabled: false
"#,
    );

    let result = DaprGuard::new().path(fixture.path()).production().json().run();
    let json = result.json();
    let issues = json["issues"].as_array().unwrap();
    assert!(issues.iter().any(|f| f["category"] == "mtls_disabled"));

    let strict = DaprGuard::new().path(fixture.path()).production().strict().run();
    assert_eq!(strict.code, 1);
}
