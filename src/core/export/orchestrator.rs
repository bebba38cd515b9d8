//! Backup orchestrator - top-level run loop and failure boundary
//!
//! Walks the resource catalog in order, drives the paginator per resource,
//! and routes every yielded item to the object writer. After the fixed
//! catalog it performs the two-level security-baseline traversal: the
//! template list drives a per-template fetch of migratable instances.
//!
//! Resources are exported strictly sequentially, and pages within a
//! resource too (each page's URL comes from the previous response). The
//! only suspension point is the rate-limit backoff inside the retry
//! client, which deliberately blocks the whole run: all requests share one
//! token and one throttling budget.

use crate::adapters::graph::{GraphAuthenticator, GraphClient, ItemStream};
use crate::adapters::identity::workload_credential;
use crate::adapters::keyvault::KeyVaultClient;
use crate::adapters::storage::{create_store, ContentStore};
use crate::config::{GraphVaultConfig, StorageConfig};
use crate::core::export::summary::{BackupSummary, ResourceReport};
use crate::core::export::writer::ObjectWriter;
use crate::domain::{ApiVersion, GraphVaultError, ResourceSpec, Result};
use azure_core::credentials::TokenCredential;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Category the baseline instances are saved under, distinct from the
/// main catalog.
const BASELINE_CATEGORY: &str = "Intune_SecurityBaselines";

/// Synthetic field carrying the owning template's display name.
const SOURCE_TEMPLATE_FIELD: &str = "_SourceTemplate";

/// Version-qualified API base URLs
#[derive(Debug, Clone)]
pub struct GraphEndpoints {
    /// Stable surface base, e.g. `https://graph.microsoft.com/v1.0`
    pub v1_base: String,
    /// Pre-release surface base, e.g. `https://graph.microsoft.com/beta`
    pub beta_base: String,
}

impl GraphEndpoints {
    /// Base URL for an API surface
    pub fn base(&self, version: ApiVersion) -> &str {
        match version {
            ApiVersion::V1 => &self.v1_base,
            ApiVersion::Beta => &self.beta_base,
        }
    }

    /// Full URL for a catalog resource
    ///
    /// Absolute paths pass through untouched so a catalog entry can point
    /// anywhere.
    pub fn resource_url(&self, spec: &ResourceSpec) -> String {
        if spec.path.starts_with("http") {
            spec.path.clone()
        } else {
            format!("{}{}", self.base(spec.api_version), spec.path)
        }
    }
}

/// Backup orchestrator
///
/// Owns the catalog, the authenticated Graph client and the object writer
/// for one run. Constructed either via [`bootstrap`](Self::bootstrap)
/// (full Azure setup) or [`from_parts`](Self::from_parts) (pre-built
/// collaborators, used by tests and embedders).
pub struct BackupOrchestrator {
    client: GraphClient,
    writer: ObjectWriter,
    catalog: Vec<ResourceSpec>,
    endpoints: GraphEndpoints,
    include_baselines: bool,
}

impl BackupOrchestrator {
    /// Assemble an orchestrator from pre-built collaborators
    pub fn from_parts(
        client: GraphClient,
        writer: ObjectWriter,
        catalog: Vec<ResourceSpec>,
        endpoints: GraphEndpoints,
        include_baselines: bool,
    ) -> Self {
        Self {
            client,
            writer,
            catalog,
            endpoints,
            include_baselines,
        }
    }

    /// Full production setup: storage bootstrap, certificate retrieval,
    /// token exchange
    ///
    /// Any failure here is fatal and aborts the run before a single
    /// resource is touched. Setup order follows the reference behavior:
    /// storage first, then the secret store, then authentication.
    pub async fn bootstrap(config: &GraphVaultConfig) -> Result<Self> {
        let run_date = Utc::now().format("%Y-%m-%d").to_string();
        tracing::info!(run_date = %run_date, "Initializing backup run");

        let credential = workload_credential(config.azure.credential)?;

        // 1. Content store bootstrap
        let store = bootstrap_store(&config.storage, Some(credential.clone())).await?;
        tracing::info!("Storage connection successful");

        // 2. Signing certificate from the secret store (in memory only)
        let keyvault = KeyVaultClient::new(&config.keyvault.vault_name, credential)?;
        let certificate = keyvault
            .get_secret(&config.keyvault.certificate_secret_name)
            .await?;

        // 3. Certificate exchange; the certificate handle drops here on
        // every path.
        let authenticator = GraphAuthenticator::new(
            &config.graph.tenant_id,
            &config.graph.client_id,
            &config.graph.scope,
        );
        let token = authenticator.acquire_token(certificate).await?;

        let client = GraphClient::new(
            token,
            &config.graph.retry,
            Duration::from_secs(config.graph.timeout_seconds),
        )?;
        let writer = ObjectWriter::new(store, run_date, config.application.dry_run);

        Ok(Self {
            client,
            writer,
            catalog: config.backup.catalog(),
            endpoints: GraphEndpoints {
                v1_base: config.graph.base_url_v1.clone(),
                beta_base: config.graph.base_url_beta.clone(),
            },
            include_baselines: config.backup.include_security_baselines,
        })
    }

    /// Execute the backup
    ///
    /// Each resource's export is independent; one resource's total failure
    /// (e.g. a permanent 403) never prevents subsequent resources from
    /// exporting. The run itself cannot fail once setup has succeeded -
    /// losses show up in the summary instead.
    pub async fn run(&self) -> BackupSummary {
        let start_time = Instant::now();
        let mut summary = BackupSummary::new();

        for spec in &self.catalog {
            tracing::info!(resource = %spec.name, surface = %spec.api_version, "Exporting resource");
            summary.add_report(self.export_resource(spec).await);
        }

        if self.include_baselines {
            summary.add_report(self.export_baselines().await);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        summary
    }

    /// Export one catalog resource, page by page
    async fn export_resource(&self, spec: &ResourceSpec) -> ResourceReport {
        let mut report = ResourceReport::new(&spec.name);
        let url = self.endpoints.resource_url(spec);

        let mut items = ItemStream::new(&self.client, url);
        while let Some(item) = items.next().await {
            report.record(&self.writer.save(&spec.name, &item).await);
        }
        report.truncated = items.truncated();

        report
    }

    /// Two-level traversal for security baselines
    ///
    /// The outer template list drives a per-template paginated fetch of
    /// migratable instances. Each instance is tagged with the owning
    /// template's display name before saving. A template with zero
    /// instances contributes nothing; zero templates produce an empty
    /// report, neither is an error.
    async fn export_baselines(&self) -> ResourceReport {
        tracing::info!(resource = BASELINE_CATEGORY, "Exporting security baselines");
        let mut report = ResourceReport::new(BASELINE_CATEGORY);

        let templates_url = format!(
            "{}/deviceManagement/templates?$top=100",
            self.endpoints.beta_base
        );

        let mut templates = ItemStream::new(&self.client, templates_url);
        while let Some(template) = templates.next().await {
            let Some(template_id) = template.get("id").and_then(Value::as_str) else {
                tracing::warn!("Baseline template without id, skipping");
                continue;
            };
            let template_name = template
                .get("displayName")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            let instances_url = format!(
                "{}/deviceManagement/templates/{}/migratableInstances?$expand=settings",
                self.endpoints.beta_base, template_id
            );

            let mut instances = ItemStream::new(&self.client, instances_url);
            while let Some(mut instance) = instances.next().await {
                if let Some(fields) = instance.as_object_mut() {
                    fields.insert(
                        SOURCE_TEMPLATE_FIELD.to_string(),
                        Value::String(template_name.clone()),
                    );
                }
                report.record(&self.writer.save(BASELINE_CATEGORY, &instance).await);
            }
            report.truncated |= instances.truncated();
        }
        report.truncated |= templates.truncated();

        report
    }
}

/// Build the content store and make sure the backup container exists
///
/// Container check/creation failures surface as
/// [`GraphVaultError::StorageBootstrap`] and abort the run during setup.
async fn bootstrap_store(
    storage: &StorageConfig,
    credential: Option<Arc<dyn TokenCredential>>,
) -> Result<Arc<dyn ContentStore>> {
    let store = create_store(storage, credential)?;
    store
        .ensure_container()
        .await
        .map_err(|e| GraphVaultError::StorageBootstrap(e.to_string()))?;
    Ok(store)
}
