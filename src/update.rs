//! The update run: fetch every list, reconcile, rewrite the hosts file.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::aggregator::DomainSets;
use crate::config::{Config, Role};
use crate::dispatcher::fetch_all;
use crate::fetcher::Fetcher;
use crate::hosts::{rewrite, OutputTarget};
use crate::utils::format_count;

/// Options for a single run, resolved from the command line
#[derive(Debug, Clone)]
pub struct UpdateOptions<'a> {
    pub hosts_file: &'a Path,
    pub output: OutputTarget,
    pub insecure_tls: bool,
}

/// Fetch every configured list and compute the domains to block.
///
/// The hosts file is read as an extra allow list so names it already maps
/// are never blocked.
pub async fn block_list(config: &Config, hosts_file: &Path, insecure_tls: bool) -> Result<Vec<String>> {
    let config = config.clone().with_hosts_file(hosts_file);
    let fetcher = Fetcher::new(insecure_tls)?;

    info!(
        "Fetching {} lists ({} allow, {} block, {} at a time)...",
        config.sources.len(),
        config.sources_with_role(Role::Allow).count(),
        config.sources_with_role(Role::Block).count(),
        config.concurrency
    );

    let results: Vec<_> = fetch_all(&fetcher, &config.sources, config.concurrency)
        .await?
        .into_iter()
        .flatten()
        .collect();

    let sets = DomainSets::collect(&results);
    let domains = sets.block_list();
    info!(
        "Allowed: {} domains, listed for blocking: {}, blocked: {}",
        format_count(sets.allowed.len()),
        format_count(sets.blocked.len()),
        format_count(domains.len())
    );

    Ok(domains)
}

/// Run a full update with an already loaded configuration
pub async fn run(config: &Config, options: &UpdateOptions<'_>) -> Result<()> {
    let domains = block_list(config, options.hosts_file, options.insecure_tls).await?;

    rewrite(options.hosts_file, &options.output, &domains)
        .with_context(|| format!("Failed to update {}", options.output))?;

    info!("Wrote {} blocked domains to {}", format_count(domains.len()), options.output);
    Ok(())
}

/// Load the configuration file and run an update
pub async fn run_with_config_file(config_path: &Path, options: &UpdateOptions<'_>) -> Result<()> {
    let config = Config::load(config_path)?;
    run(&config, options).await
}
