use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use secret_sweep::{
    cli::Args,
    config::{FileConfig, Settings},
    inventory::{audit, ClusterInventory},
    k8s::client::{build_client, current_context},
    report::render,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    if args.mangen {
        let man = clap_mangen::Man::new(Args::command());
        man.render(&mut std::io::stdout())?;
        return Ok(());
    }

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let file = FileConfig::load(args.config.as_deref())?;
    let settings = Settings::resolve(&args, file)?;

    let kubeconfig = settings.kubeconfig.as_deref();
    let context = settings
        .context
        .clone()
        .unwrap_or_else(|| current_context(kubeconfig));
    tracing::info!(%context, namespace = %settings.namespace, "connecting");

    let client = build_client(settings.context.as_deref(), kubeconfig).await?;
    let inventory = ClusterInventory::new(client, settings.page_size);

    let result = audit(&inventory, &settings.namespace).await?;
    tracing::info!(
        namespace = %result.namespace,
        pods = result.pods_scanned,
        secrets = result.secrets_scanned,
        unused = result.unused.len(),
        "audit complete"
    );

    render(&result, settings.output, std::io::stdout().lock())
}
