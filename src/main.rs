//! dnshole - hosts file based domain blocking
//!
//! Merges remote and local block lists into a hosts file.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use dnshole::update::{run_with_config_file, UpdateOptions};
use dnshole::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    // stdout may carry the hosts file itself
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = UpdateOptions {
        hosts_file: &cli.hosts_file,
        output: cli.output_target(),
        insecure_tls: cli.insecure_ssl,
    };

    run_with_config_file(&cli.config, &options).await
}
