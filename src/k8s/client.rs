use std::path::Path;

use anyhow::{Context, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client,
};

/// Build a kube::Client.
///
/// With an explicit kubeconfig path and/or context the kubeconfig is loaded
/// with those overrides. With neither, the usual inference applies:
/// $KUBECONFIG or ~/.kube/config, falling back to the in-cluster service account.
pub async fn build_client(context: Option<&str>, kubeconfig: Option<&Path>) -> Result<Client> {
    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    let config = match (kubeconfig, context) {
        (Some(path), _) => {
            let raw = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig '{}'", path.display()))?;
            kube::Config::from_custom_kubeconfig(raw, &options)
                .await
                .with_context(|| {
                    format!(
                        "Failed to load context '{}' from kubeconfig '{}'",
                        context.unwrap_or("<current>"),
                        path.display()
                    )
                })?
        }
        (None, Some(name)) => kube::Config::from_kubeconfig(&options)
            .await
            .with_context(|| format!("Failed to load kubeconfig context '{name}'"))?,
        (None, None) => kube::Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    Client::try_from(config).context("Failed to build Kubernetes client")
}

/// Return the current context name from kubeconfig (for log lines).
pub fn current_context(kubeconfig: Option<&Path>) -> String {
    let raw = match kubeconfig {
        Some(path) => Kubeconfig::read_from(path),
        None => Kubeconfig::read(),
    };
    raw.ok()
        .and_then(|cfg| cfg.current_context)
        .unwrap_or_else(|| "unknown".to_string())
}
