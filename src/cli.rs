//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::hosts::OutputTarget;

#[derive(Parser, Debug)]
#[command(name = "dnshole")]
#[command(author, version, about = "Block ad and tracker domains through the hosts file")]
pub struct Cli {
    /// Hosts file to rewrite (typically /etc/hosts)
    pub hosts_file: PathBuf,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output file name, "-" means stdout (default is <HOSTS_FILE>)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Ignore problems with host security certificates
    #[arg(long)]
    pub insecure_ssl: bool,

    /// Quiet mode (for cron/systemd timer)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn output_target(&self) -> OutputTarget {
        OutputTarget::from_arg(self.output.as_deref(), &self.hosts_file)
    }
}
