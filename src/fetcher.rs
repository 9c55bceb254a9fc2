//! Retrieval of allow and block lists from local files and HTTP(S) URLs.

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{ListSource, Role};
use crate::error::FetchError;
use crate::hosts::is_marker_line;
use crate::parser::extract_domains;
use crate::utils::format_count;

/// Connection establishment, including the TLS handshake
const CONNECT_TIMEOUT_SECS: u64 = 30;
/// From the start of a request until its status line and headers arrive
const HEADER_TIMEOUT_SECS: u64 = 30;
/// Whole request, body included
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Domains extracted from one list source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub location: String,
    pub role: Role,
    pub domains: Vec<String>,
}

/// Reads list sources, local or remote
pub struct Fetcher {
    client: Client,
    /// Deadline for `send()` to yield a response. The clock starts before
    /// the connection is opened, so connect and TLS handshake time count
    /// against it too.
    header_timeout: Duration,
}

impl Fetcher {
    /// Create a fetcher. With `insecure_tls`, certificate validation is
    /// skipped for every request it makes.
    pub fn new(insecure_tls: bool) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(format!("dnshole/{}", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(insecure_tls)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            header_timeout: Duration::from_secs(HEADER_TIMEOUT_SECS),
        })
    }

    /// Fetch one source and extract its domains.
    ///
    /// A local file that cannot be read is fatal. Any failure to retrieve a
    /// URL is recoverable and reported as [`FetchError::Unavailable`].
    pub async fn fetch_list(&self, source: &ListSource) -> Result<FetchResult, FetchError> {
        debug!("Fetching {} {}", source.role, source.location);

        let content = if source.is_remote() {
            self.fetch_url(&source.location).await?
        } else {
            read_local(&source.location).await?
        };

        let domains = parse_list(&content, source);
        info!(
            "Fetched {} - {} domains",
            source.location,
            format_count(domains.len())
        );

        Ok(FetchResult {
            location: source.location.clone(),
            role: source.role,
            domains,
        })
    }

    async fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        let unavailable = |reason: String| FetchError::Unavailable {
            location: url.to_string(),
            reason,
        };

        let response = tokio::time::timeout(self.header_timeout, self.client.get(url).send())
            .await
            .map_err(|_| {
                unavailable(format!(
                    "no response headers within {:?}",
                    self.header_timeout
                ))
            })?
            .map_err(|e| unavailable(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(unavailable(format!(
                "returned status {}",
                response.status().as_u16()
            )));
        }

        response.text().await.map_err(|e| unavailable(e.to_string()))
    }
}

async fn read_local(location: &str) -> Result<String, FetchError> {
    let bytes = tokio::fs::read(location)
        .await
        .map_err(|source| FetchError::Fatal {
            path: PathBuf::from(location),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extract every domain from the text of a list.
///
/// Allow lists are read only up to a dnshole marker line, so a hosts file
/// contributes its hand-maintained entries and not the generated ones.
pub fn parse_list(content: &str, source: &ListSource) -> Vec<String> {
    let mut domains = Vec::new();

    for line in content.lines() {
        if source.role == Role::Allow && is_marker_line(line) {
            break;
        }
        domains.extend(
            extract_domains(line, source.field_index)
                .into_iter()
                .map(str::to_string),
        );
    }

    domains
}
