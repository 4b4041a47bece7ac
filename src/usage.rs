//! Usage extraction: which Secrets does a Pod consume?
//!
//! Only `spec.containers` and `spec.volumes` are walked. Init containers,
//! ephemeral containers, `imagePullSecrets` and projected volume sources are
//! not inspected, so a Secret consumed only through one of those channels is
//! reported as unused.

use std::collections::HashSet;

use k8s_openapi::api::core::v1::{Container, Pod, Volume};

/// Where in a Pod spec a Secret reference was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSite<'a> {
    /// `containers[].envFrom[].secretRef`: every key imported as an env var.
    EnvFrom { container: &'a str },
    /// `containers[].env[].valueFrom.secretKeyRef`: one key injected as `env`.
    SecretKeyRef {
        container: &'a str,
        env: &'a str,
        key: &'a str,
    },
    /// `volumes[].secret`: mounted as files.
    Volume { volume: &'a str },
}

impl ReferenceSite<'_> {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnvFrom { .. } => "envFrom",
            Self::SecretKeyRef { .. } => "secretKeyRef",
            Self::Volume { .. } => "volume",
        }
    }
}

/// A Secret name together with the site that references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretReference<'a> {
    pub secret: &'a str,
    pub site: ReferenceSite<'a>,
}

/// Every Secret reference in `pod`, in spec order: per container the `envFrom`
/// entries then the `env` entries, followed by the pod's volumes.
/// Duplicates are kept; see [`used_secret_names`] for the collapsed set.
pub fn secret_references(pod: &Pod) -> Vec<SecretReference<'_>> {
    let Some(spec) = pod.spec.as_ref() else {
        return Vec::new();
    };

    let mut refs = Vec::new();
    for container in &spec.containers {
        container_references(container, &mut refs);
    }
    for volume in spec.volumes.iter().flatten() {
        if let Some(reference) = volume_reference(volume) {
            refs.push(reference);
        }
    }
    refs
}

fn container_references<'a>(container: &'a Container, refs: &mut Vec<SecretReference<'a>>) {
    let name = container.name.as_str();

    for env_from in container.env_from.iter().flatten() {
        if let Some(secret_ref) = &env_from.secret_ref {
            refs.push(SecretReference {
                secret: &secret_ref.name,
                site: ReferenceSite::EnvFrom { container: name },
            });
        }
    }

    for env in container.env.iter().flatten() {
        let selector = env
            .value_from
            .as_ref()
            .and_then(|source| source.secret_key_ref.as_ref());
        if let Some(selector) = selector {
            refs.push(SecretReference {
                secret: &selector.name,
                site: ReferenceSite::SecretKeyRef {
                    container: name,
                    env: &env.name,
                    key: &selector.key,
                },
            });
        }
    }
}

fn volume_reference(volume: &Volume) -> Option<SecretReference<'_>> {
    let secret_name = volume.secret.as_ref()?.secret_name.as_deref()?;
    Some(SecretReference {
        secret: secret_name,
        site: ReferenceSite::Volume {
            volume: &volume.name,
        },
    })
}

/// The deduplicated set of Secret names `pod` references.
pub fn used_secret_names(pod: &Pod) -> HashSet<&str> {
    secret_references(pod)
        .into_iter()
        .map(|reference| reference.secret)
        .collect()
}
