use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::report::OutputFormat;

#[derive(Parser, Debug, Default)]
#[command(
    name = "secret-sweep",
    about = "Report Kubernetes Secrets that no Pod in a namespace references",
    version
)]
pub struct Args {
    /// Use a specific kubeconfig context instead of the current one.
    #[arg(long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Namespace to audit. Default: `default`.
    #[arg(short = 'n', long, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Path to kubeconfig file. Defaults to $KUBECONFIG or ~/.kube/config,
    /// then the in-cluster service account.
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Number of objects requested per list call. Default: 500.
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// Output format.
    #[arg(short = 'o', long, value_enum, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Config file. Defaults to <config dir>/secret-sweep/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors. RUST_LOG takes precedence.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Print shell completions for SHELL to stdout and exit.
    /// Example: `secret-sweep --completions bash >> ~/.bash_completion`
    #[arg(long, value_name = "SHELL", hide = true)]
    pub completions: Option<Shell>,

    /// Print the man page to stdout and exit.
    #[arg(long, hide = true)]
    pub mangen: bool,
}

impl Args {
    /// Default log filter when RUST_LOG is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
