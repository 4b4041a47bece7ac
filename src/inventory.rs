//! Namespace snapshots and the audit pipeline built on top of them.

use anyhow::Result;
use k8s_openapi::api::core::v1::{Pod, Secret};
use kube::Client;

use crate::detect::detect_unused_secrets;
use crate::k8s::list::list_all;

/// Source of complete, point-in-time Pod and Secret snapshots for a namespace.
#[allow(async_fn_in_trait)] // only ever used with concrete types inside this crate
pub trait Inventory {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>>;
    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>>;
}

/// Inventory backed by a live cluster.
#[derive(Clone)]
pub struct ClusterInventory {
    client: Client,
    page_size: u32,
}

impl ClusterInventory {
    pub fn new(client: Client, page_size: u32) -> Self {
        Self { client, page_size }
    }
}

impl Inventory for ClusterInventory {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        list_all(self.client.clone(), namespace, self.page_size).await
    }

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>> {
        list_all(self.client.clone(), namespace, self.page_size).await
    }
}

/// Outcome of one audit run.
#[derive(Debug, Clone)]
pub struct Audit {
    pub namespace: String,
    pub pods_scanned: usize,
    pub secrets_scanned: usize,
    /// Unused opaque Secrets, in the order the API listed them.
    pub unused: Vec<Secret>,
}

/// Snapshot pods, then secrets, then detect. Any listing failure aborts the
/// run before detection starts.
pub async fn audit<I: Inventory>(inventory: &I, namespace: &str) -> Result<Audit> {
    tracing::info!(namespace, "retrieving pods");
    let pods = inventory.list_pods(namespace).await?;

    tracing::info!(namespace, "retrieving secrets");
    let secrets = inventory.list_secrets(namespace).await?;

    tracing::info!(
        namespace,
        pods = pods.len(),
        secrets = secrets.len(),
        "detecting unused secrets"
    );
    let unused: Vec<Secret> = detect_unused_secrets(&pods, &secrets)
        .into_iter()
        .cloned()
        .collect();

    Ok(Audit {
        namespace: namespace.to_string(),
        pods_scanned: pods.len(),
        secrets_scanned: secrets.len(),
        unused,
    })
}
