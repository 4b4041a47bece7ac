//! Optional config file and the settings resolved from it and the command line.
//!
//! Precedence is flag > config file > built-in default.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::cli::Args;
use crate::k8s::list::DEFAULT_PAGE_SIZE;
use crate::report::OutputFormat;

pub const DEFAULT_NAMESPACE: &str = "default";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub context: Option<String>,
    pub namespace: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub page_size: Option<u32>,
    pub output: Option<OutputFormat>,
}

/// `<config_dir>/secret-sweep/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("secret-sweep").join("config.toml"))
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid config file")
    }

    /// Load from `explicit` if given (it must exist), else from the default
    /// location (a missing file there means "no config").
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub context: Option<String>,
    pub namespace: String,
    pub kubeconfig: Option<PathBuf>,
    pub page_size: u32,
    pub output: OutputFormat,
}

impl Settings {
    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self> {
        let page_size = args
            .page_size
            .or(file.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            bail!("page size must be at least 1");
        }

        let namespace = args
            .namespace
            .clone()
            .or(file.namespace)
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        if namespace.trim().is_empty() {
            bail!("namespace must not be empty");
        }

        Ok(Self {
            context: args.context.clone().or(file.context),
            namespace,
            kubeconfig: args.kubeconfig.clone().or(file.kubeconfig),
            page_size,
            output: args.output.or(file.output).unwrap_or_default(),
        })
    }
}
