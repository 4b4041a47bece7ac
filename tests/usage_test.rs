//! Tests for secret_sweep::usage — reference enumeration across the three channels.

use std::collections::HashSet;

use k8s_openapi::api::core::v1::{
    ConfigMapEnvSource, Container, EnvFromSource, EnvVar, EnvVarSource, Pod, PodSpec,
    SecretEnvSource, SecretKeySelector, SecretVolumeSource, Volume,
};
use secret_sweep::usage::{secret_references, used_secret_names, ReferenceSite};

// ── Fixture helpers ───────────────────────────────────────────────────────────

fn env_from_secret(secret: &str) -> EnvFromSource {
    EnvFromSource {
        secret_ref: Some(SecretEnvSource {
            name: secret.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn env_from_secret_key(var: &str, secret: &str, key: &str) -> EnvVar {
    EnvVar {
        name: var.to_string(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: secret.to_string(),
                key: key.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn secret_volume(volume: &str, secret: &str) -> Volume {
    Volume {
        name: volume.to_string(),
        secret: Some(SecretVolumeSource {
            secret_name: Some(secret.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn container(name: &str, env_from: Vec<EnvFromSource>, env: Vec<EnvVar>) -> Container {
    Container {
        name: name.to_string(),
        env_from: Some(env_from),
        env: Some(env),
        ..Default::default()
    }
}

fn pod(containers: Vec<Container>, volumes: Vec<Volume>) -> Pod {
    Pod {
        spec: Some(PodSpec {
            containers,
            volumes: Some(volumes),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn names<'a>(list: &[&'a str]) -> HashSet<&'a str> {
    list.iter().copied().collect()
}

// ── Empty pods ────────────────────────────────────────────────────────────────

#[test]
fn pod_without_spec_references_nothing() {
    let pod = Pod::default();
    assert!(secret_references(&pod).is_empty());
    assert!(used_secret_names(&pod).is_empty());
}

#[test]
fn pod_with_no_containers_or_volumes_references_nothing() {
    let pod = pod(vec![], vec![]);
    assert!(used_secret_names(&pod).is_empty());
}

#[test]
fn container_with_absent_env_lists_references_nothing() {
    let pod = Pod {
        spec: Some(PodSpec {
            containers: vec![Container {
                name: "app".into(),
                ..Default::default()
            }],
            volumes: None,
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(used_secret_names(&pod).is_empty());
}

// ── Each channel individually ────────────────────────────────────────────────

#[test]
fn env_from_secret_ref_is_found() {
    let pod = pod(vec![container("app", vec![env_from_secret("db-creds")], vec![])], vec![]);
    let refs = secret_references(&pod);
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].secret, "db-creds");
    assert_eq!(refs[0].site, ReferenceSite::EnvFrom { container: "app" });
}

#[test]
fn secret_key_ref_yields_secret_name_not_key() {
    let pod = pod(
        vec![container("app", vec![], vec![env_from_secret_key("API_KEY", "api", "token")])],
        vec![],
    );
    let refs = secret_references(&pod);
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].secret, "api");
    assert_eq!(
        refs[0].site,
        ReferenceSite::SecretKeyRef {
            container: "app",
            env: "API_KEY",
            key: "token"
        }
    );
    assert!(!used_secret_names(&pod).contains("token"));
}

#[test]
fn secret_volume_is_found() {
    let pod = pod(vec![], vec![secret_volume("certs", "tls-material")]);
    let refs = secret_references(&pod);
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].secret, "tls-material");
    assert_eq!(refs[0].site, ReferenceSite::Volume { volume: "certs" });
}

// ── Absent sources are skipped ───────────────────────────────────────────────

#[test]
fn env_from_config_map_is_ignored() {
    let from_cm = EnvFromSource {
        config_map_ref: Some(ConfigMapEnvSource {
            name: "settings".into(),
            ..Default::default()
        }),
        ..Default::default()
    };
    let pod = pod(vec![container("app", vec![from_cm], vec![])], vec![]);
    assert!(used_secret_names(&pod).is_empty());
}

#[test]
fn plain_env_values_and_empty_value_from_are_ignored() {
    let literal = EnvVar {
        name: "MODE".into(),
        value: Some("prod".into()),
        ..Default::default()
    };
    let empty_source = EnvVar {
        name: "EMPTY".into(),
        value_from: Some(EnvVarSource::default()),
        ..Default::default()
    };
    let pod = pod(vec![container("app", vec![], vec![literal, empty_source])], vec![]);
    assert!(used_secret_names(&pod).is_empty());
}

#[test]
fn non_secret_volumes_and_nameless_secret_volumes_are_ignored() {
    let empty_dir = Volume {
        name: "scratch".into(),
        ..Default::default()
    };
    let nameless = Volume {
        name: "broken".into(),
        secret: Some(SecretVolumeSource::default()),
        ..Default::default()
    };
    let pod = pod(vec![], vec![empty_dir, nameless]);
    assert!(used_secret_names(&pod).is_empty());
}

// ── Ordering and deduplication ───────────────────────────────────────────────

#[test]
fn references_follow_spec_order() {
    let pod = pod(
        vec![
            container(
                "web",
                vec![env_from_secret("a")],
                vec![env_from_secret_key("B", "b", "k")],
            ),
            container("sidecar", vec![env_from_secret("c")], vec![]),
        ],
        vec![secret_volume("v", "d")],
    );
    let order: Vec<&str> = secret_references(&pod).iter().map(|r| r.secret).collect();
    assert_eq!(order, vec!["a", "b", "c", "d"]);
}

#[test]
fn used_names_are_deduplicated_across_channels_and_containers() {
    let pod = pod(
        vec![
            container(
                "web",
                vec![env_from_secret("shared")],
                vec![
                    env_from_secret_key("USER", "shared", "user"),
                    env_from_secret_key("PASS", "shared", "pass"),
                ],
            ),
            container("worker", vec![env_from_secret("shared")], vec![]),
        ],
        vec![secret_volume("mount", "shared"), secret_volume("other", "extra")],
    );
    assert_eq!(secret_references(&pod).len(), 6);
    assert_eq!(used_secret_names(&pod), names(&["shared", "extra"]));
}

// ── Unchecked channels ───────────────────────────────────────────────────────

#[test]
fn init_containers_are_not_inspected() {
    let pod = Pod {
        spec: Some(PodSpec {
            init_containers: Some(vec![container(
                "migrate",
                vec![env_from_secret("migration-creds")],
                vec![],
            )]),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(used_secret_names(&pod).is_empty());
}

#[test]
fn site_labels() {
    assert_eq!(ReferenceSite::EnvFrom { container: "x" }.as_str(), "envFrom");
    assert_eq!(
        ReferenceSite::SecretKeyRef {
            container: "x",
            env: "E",
            key: "k"
        }
        .as_str(),
        "secretKeyRef"
    );
    assert_eq!(ReferenceSite::Volume { volume: "v" }.as_str(), "volume");
}
