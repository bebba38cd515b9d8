//! End-to-end backup run against a mock Graph server
//!
//! Drives the orchestrator with a real HTTP client, a mock Graph API and a
//! filesystem content store, then inspects the directory tree a run leaves
//! behind.

use graphvault::adapters::graph::{BearerToken, GraphClient, ItemStream};
use graphvault::adapters::storage::{ContentStore, FileStore};
use graphvault::config::RetryConfig;
use graphvault::core::export::{BackupOrchestrator, GraphEndpoints, ObjectWriter};
use graphvault::domain::{ApiVersion, ResourceSpec};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const RUN_DATE: &str = "2026-08-25";

fn graph_client() -> GraphClient {
    GraphClient::new(
        BearerToken::new("test-token"),
        &RetryConfig {
            max_attempts: 3,
            retry_after_default_secs: 0,
        },
        Duration::from_secs(5),
    )
    .expect("client should build")
}

fn endpoints(server: &ServerGuard) -> GraphEndpoints {
    GraphEndpoints {
        v1_base: format!("{}/v1.0", server.url()),
        beta_base: format!("{}/beta", server.url()),
    }
}

fn orchestrator(
    server: &ServerGuard,
    store: Arc<FileStore>,
    catalog: Vec<ResourceSpec>,
    include_baselines: bool,
    dry_run: bool,
) -> BackupOrchestrator {
    let writer = ObjectWriter::new(store, RUN_DATE, dry_run);
    BackupOrchestrator::from_parts(
        graph_client(),
        writer,
        catalog,
        endpoints(server),
        include_baselines,
    )
}

fn backup_file(root: &Path, category: &str, file: &str) -> std::path::PathBuf {
    root.join("entra-backups")
        .join(RUN_DATE)
        .join(category)
        .join(file)
}

#[tokio::test]
async fn test_catalog_run_writes_dated_tree() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path(), "entra-backups"));
    store.ensure_container().await.unwrap();

    let page2_url = format!("{}/v1.0/users/page2", server.url());
    server
        .mock("GET", "/v1.0/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "value": [
                    {"id": "u1", "displayName": "Alice"},
                    {"id": "u2", "displayName": "Bob/Admin"}
                ],
                "@odata.nextLink": page2_url
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/v1.0/users/page2")
        .with_status(200)
        .with_body(json!({"value": [{"id": "u3", "displayName": "Carol"}]}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/beta/deviceManagement/deviceManagementScripts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"value": [{"id": "s1", "displayName": "Cleanup"}]}).to_string())
        .create_async()
        .await;

    let catalog = vec![
        ResourceSpec::new("Entra_Users", "/users?$top=100", ApiVersion::V1),
        ResourceSpec::new(
            "Intune_Scripts",
            "/deviceManagement/deviceManagementScripts?$top=100",
            ApiVersion::Beta,
        ),
    ];
    let summary = orchestrator(&server, store, catalog, false, false)
        .run()
        .await;

    assert_eq!(summary.reports.len(), 2);
    assert_eq!(summary.total_saved(), 4);
    assert!(summary.is_complete());

    // Stable surface items land under the resource name with sanitized labels
    assert!(backup_file(dir.path(), "Entra_Users", "Alice (u1).json").exists());
    assert!(backup_file(dir.path(), "Entra_Users", "BobAdmin (u2).json").exists());
    assert!(backup_file(dir.path(), "Entra_Users", "Carol (u3).json").exists());
    assert!(backup_file(dir.path(), "Intune_Scripts", "Cleanup (s1).json").exists());

    // Written bodies are pretty-printed JSON of the original item
    let body =
        std::fs::read_to_string(backup_file(dir.path(), "Entra_Users", "Alice (u1).json")).unwrap();
    assert!(body.contains('\n'));
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["displayName"], "Alice");
}

#[tokio::test]
async fn test_forbidden_resource_does_not_block_later_resources() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path(), "entra-backups"));
    store.ensure_container().await.unwrap();

    server
        .mock("GET", "/v1.0/restricted")
        .match_query(Matcher::Any)
        .with_status(403)
        .create_async()
        .await;
    server
        .mock("GET", "/v1.0/groups")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"value": [{"id": "g1", "displayName": "Everyone"}]}).to_string())
        .create_async()
        .await;

    let catalog = vec![
        ResourceSpec::new("Restricted", "/restricted", ApiVersion::V1),
        ResourceSpec::new("Entra_Groups", "/groups?$top=100", ApiVersion::V1),
    ];
    let summary = orchestrator(&server, store, catalog, false, false)
        .run()
        .await;

    assert_eq!(summary.total_saved(), 1);
    assert!(!summary.is_complete());
    assert!(summary.reports[0].truncated);
    assert!(!summary.reports[1].truncated);
    assert!(backup_file(dir.path(), "Entra_Groups", "Everyone (g1).json").exists());
}

#[tokio::test]
async fn test_baseline_instances_tagged_with_source_template() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path(), "entra-backups"));
    store.ensure_container().await.unwrap();

    server
        .mock("GET", "/beta/deviceManagement/templates")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "value": [
                    {"id": "t1", "displayName": "MDM Baseline"},
                    {"id": "t2", "displayName": "Edge Baseline"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/beta/deviceManagement/templates/t1/migratableInstances")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "value": [
                    {"id": "i1", "displayName": "Prod profile"},
                    {"id": "i2", "displayName": "Pilot profile"},
                    {"id": "i3", "displayName": "Legacy profile"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    // A template with zero instances contributes nothing
    server
        .mock("GET", "/beta/deviceManagement/templates/t2/migratableInstances")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"value": []}).to_string())
        .create_async()
        .await;

    let summary = orchestrator(&server, store, Vec::new(), true, false)
        .run()
        .await;

    assert_eq!(summary.total_saved(), 3);
    assert!(summary.is_complete());

    let path = backup_file(
        dir.path(),
        "Intune_SecurityBaselines",
        "Prod profile (i1).json",
    );
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(saved["_SourceTemplate"], "MDM Baseline");
    assert_eq!(saved["id"], "i1");
}

#[tokio::test]
async fn test_large_resource_spans_three_pages() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path(), "entra-backups"));
    store.ensure_container().await.unwrap();

    let users = |from: usize, count: usize| -> Vec<serde_json::Value> {
        (from..from + count)
            .map(|n| json!({"id": format!("u{n}"), "displayName": format!("User {n}")}))
            .collect()
    };

    server
        .mock("GET", "/v1.0/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "value": users(0, 100),
                "@odata.nextLink": format!("{}/v1.0/users/page2", server.url())
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/v1.0/users/page2")
        .with_status(200)
        .with_body(
            json!({
                "value": users(100, 100),
                "@odata.nextLink": format!("{}/v1.0/users/page3", server.url())
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/v1.0/users/page3")
        .with_status(200)
        .with_body(json!({"value": users(200, 50)}).to_string())
        .create_async()
        .await;

    let catalog = vec![ResourceSpec::new(
        "Entra_Users",
        "/users?$top=100",
        ApiVersion::V1,
    )];
    let summary = orchestrator(&server, store, catalog, false, false)
        .run()
        .await;

    assert_eq!(summary.total_saved(), 250);
    assert!(summary.is_complete());

    let category_dir = dir
        .path()
        .join("entra-backups")
        .join(RUN_DATE)
        .join("Entra_Users");
    assert_eq!(std::fs::read_dir(category_dir).unwrap().count(), 250);
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path(), "entra-backups"));
    store.ensure_container().await.unwrap();

    server
        .mock("GET", "/v1.0/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"value": [{"id": "u1", "displayName": "Alice"}]}).to_string())
        .create_async()
        .await;

    let catalog = vec![ResourceSpec::new(
        "Entra_Users",
        "/users?$top=100",
        ApiVersion::V1,
    )];
    let summary = orchestrator(&server, store, catalog, false, true)
        .run()
        .await;

    assert_eq!(summary.total_saved(), 0);
    assert_eq!(summary.total_skipped(), 1);
    assert!(!backup_file(dir.path(), "Entra_Users", "Alice (u1).json").exists());
}

#[tokio::test]
async fn test_same_run_date_overwrites_previous_attempt() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path(), "entra-backups"));
    store.ensure_container().await.unwrap();

    server
        .mock("GET", "/v1.0/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"value": [{"id": "u1", "displayName": "Alice"}]}).to_string())
        .expect(2)
        .create_async()
        .await;

    let catalog = vec![ResourceSpec::new(
        "Entra_Users",
        "/users?$top=100",
        ApiVersion::V1,
    )];
    let client = graph_client();
    let url = endpoints(&server).resource_url(&catalog[0]);

    // Two saves of the same item on the same run date end up as one file.
    let writer = ObjectWriter::new(store, RUN_DATE, false);
    for _ in 0..2 {
        let mut items = ItemStream::new(&client, url.clone());
        while let Some(item) = items.next().await {
            assert!(writer.save("Entra_Users", &item).await.is_saved());
        }
    }

    let category_dir = dir
        .path()
        .join("entra-backups")
        .join(RUN_DATE)
        .join("Entra_Users");
    assert_eq!(std::fs::read_dir(category_dir).unwrap().count(), 1);
}
