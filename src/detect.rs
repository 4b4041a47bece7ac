//! Unused-secret detection over a namespace snapshot.

use std::collections::HashSet;

use k8s_openapi::api::core::v1::{Pod, Secret};
use kube::ResourceExt;

use crate::usage::{secret_references, used_secret_names};

/// The `type` of a generic, user-managed Secret.
pub const SECRET_TYPE_OPAQUE: &str = "Opaque";

/// Whether `secret` is a generic/opaque Secret. Other types (service-account
/// tokens, TLS, dockerconfig, bootstrap tokens...) are system-managed and are
/// never candidates for the unused report. A Secret without a `type` is not
/// opaque either.
pub fn is_opaque(secret: &Secret) -> bool {
    secret.type_.as_deref() == Some(SECRET_TYPE_OPAQUE)
}

/// Return the opaque Secrets from `secrets` that no Pod in `pods` references,
/// in the order they appear in `secrets`.
///
/// Both slices must come from the same namespace. The function is pure: the same
/// inputs always yield the same output and nothing is cloned or mutated.
pub fn detect_unused_secrets<'s>(pods: &[Pod], secrets: &'s [Secret]) -> Vec<&'s Secret> {
    let mut used: HashSet<&str> = HashSet::new();
    for pod in pods {
        if tracing::enabled!(tracing::Level::TRACE) {
            for reference in secret_references(pod) {
                tracing::trace!(
                    pod = %pod.name_any(),
                    secret = reference.secret,
                    site = reference.site.as_str(),
                    "secret referenced"
                );
            }
        }
        used.extend(used_secret_names(pod));
    }

    secrets
        .iter()
        .filter(|secret| is_opaque(secret))
        .filter(|secret| !used.contains(secret.metadata.name.as_deref().unwrap_or_default()))
        .collect()
}
