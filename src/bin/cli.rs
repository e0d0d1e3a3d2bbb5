use anyhow::Result;
use clap::Parser;
use sheet_sync::cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli_args = cli::Cli::parse();
    let payload = cli::run_command(cli_args.command)?;
    cli::output::emit_value(&payload, cli_args.format, cli_args.compact, cli_args.quiet)?;
    Ok(())
}
