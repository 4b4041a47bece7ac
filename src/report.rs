use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use k8s_openapi::{
    api::core::v1::Secret,
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
    jiff::{SpanRound, Timestamp, Unit},
};
use kube::ResourceExt;
use serde::{Deserialize, Serialize};

use crate::detect::SECRET_TYPE_OPAQUE;
use crate::inventory::Audit;

/// How the unused Secrets are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One secret name per line.
    #[default]
    Name,
    /// Name, key count and age in aligned columns.
    Wide,
    /// A JSON array of objects.
    Json,
}

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretRow {
    pub namespace: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub keys: usize,
    pub age: String,
}

impl SecretRow {
    pub fn from_secret(secret: &Secret) -> Self {
        let keys = secret.data.as_ref().map_or(0, |d| d.len())
            + secret.string_data.as_ref().map_or(0, |d| d.len());
        Self {
            namespace: secret.namespace().unwrap_or_default(),
            name: secret.name_any(),
            type_: secret
                .type_
                .clone()
                .unwrap_or_else(|| SECRET_TYPE_OPAQUE.to_string()),
            keys,
            age: resource_age(&secret.metadata),
        }
    }
}

/// Write the audit result to `out` in the requested format.
pub fn render(audit: &Audit, format: OutputFormat, mut out: impl Write) -> Result<()> {
    let rows: Vec<SecretRow> = audit.unused.iter().map(SecretRow::from_secret).collect();

    match format {
        OutputFormat::Name => {
            for row in &rows {
                writeln!(out, "{}", row.name)?;
            }
        }
        OutputFormat::Wide => {
            let width = rows
                .iter()
                .map(|r| r.name.len())
                .max()
                .unwrap_or(0)
                .max("NAME".len());
            writeln!(out, "{:<width$}   {:>4}   AGE", "NAME", "KEYS")?;
            for row in &rows {
                writeln!(out, "{:<width$}   {:>4}   {}", row.name, row.keys, row.age)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &rows).context("Failed to encode JSON report")?;
            writeln!(out)?;
        }
    }

    out.flush().context("Failed to flush report")
}

/// Age of an object from its creation timestamp: `3d`, `5h`, `12m`, or `?`.
/// Only the largest unit is shown, so seconds never matter and the span is
/// rounded to whole minutes before picking it.
pub fn resource_age(meta: &ObjectMeta) -> String {
    meta.creation_timestamp
        .as_ref()
        .and_then(|t| {
            Timestamp::now()
                .since(t.0)
                .ok()
                .and_then(|dur| {
                    dur.round(
                        SpanRound::new()
                            .largest(Unit::Day)
                            .days_are_24_hours()
                            .smallest(Unit::Minute),
                    )
                    .ok()
                })
                .map(|dur| match (dur.get_days(), dur.get_hours(), dur.get_minutes()) {
                    (d, _, _) if d > 0 => format!("{d}d"),
                    (_, h, _) if h > 0 => format!("{h}h"),
                    (_, _, m) => format!("{m}m"),
                })
        })
        .unwrap_or_else(|| "?".to_string())
}
