//! # dnshole - hosts file based domain blocking
//!
//! dnshole fetches lists of ad, tracker and malware domains, merges them,
//! removes anything an allow list names, and writes the result into a hosts
//! file so the blocked names resolve to `0.0.0.0`. Whatever the hosts file
//! held before the dnshole section is kept verbatim.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        dnshole                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap) + Config (line-oriented directives)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Dispatcher (futures buffer_unordered, bounded)             │
//! │    └── Fetcher (reqwest + rustls, local files)              │
//! │          └── Parser (field extraction per line)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Aggregator                                                 │
//! │    └── block union minus allow union, sorted                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Hosts rewriter                                             │
//! │    └── preserved prefix + generated section, atomic rename  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use dnshole::config::Config;
//! use dnshole::hosts::{rewrite, OutputTarget};
//! use dnshole::update::block_list;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("/etc/dnshole/dnshole.conf")?;
//!     let hosts = Path::new("/etc/hosts");
//!
//!     let domains = block_list(&config, hosts, false).await?;
//!     rewrite(hosts, &OutputTarget::Stdout, &domains)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`aggregator`] - Allow/block set reconciliation
//! - [`cli`] - Command-line interface definitions
//! - [`config`] - Configuration file parsing
//! - [`dispatcher`] - Bounded concurrent fetching
//! - [`error`] - Error types
//! - [`fetcher`] - Local file and HTTP list retrieval
//! - [`hosts`] - Hosts file rewriting
//! - [`parser`] - Domain extraction from list lines
//! - [`update`] - The end-to-end update run
//! - [`utils`] - Common utility functions

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fetcher;
pub mod hosts;
pub mod parser;
pub mod update;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
