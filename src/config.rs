//! Configuration file parsing for dnshole.
//!
//! The configuration is a line-oriented text file, one directive per line:
//!
//! ```text
//! # fetch at most 4 lists at a time
//! concurrency 4
//! blocklist 2 https://raw.githubusercontent.com/StevenBlack/hosts/master/hosts
//! blocklist 1 /etc/dnshole/local-block.txt
//! allowlist 1 /etc/dnshole/local-allow.txt
//! ```
//!
//! Field indexes are 1-based in the file and stored 0-based.

use anyhow::{Context, Result};
use std::path::Path;

use crate::error::{ConfigError, ConfigErrorKind};
use crate::utils::is_blank;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/dnshole/dnshole.conf";

/// Number of lists fetched at once when the file has no `concurrency` directive
pub const DEFAULT_CONCURRENCY: usize = 6;

/// 0-based field holding the first host name on a hosts-file line
pub const HOSTS_DOMAIN_FIELD: usize = 1;

/// Whether a list exempts domains from blocking or nominates them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Allow,
    Block,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Allow => f.write_str("allowlist"),
            Role::Block => f.write_str("blocklist"),
        }
    }
}

/// One configured list of domains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSource {
    /// Local path or URL
    pub location: String,
    /// 0-based field index of the first domain on each line
    pub field_index: usize,
    pub role: Role,
}

impl ListSource {
    pub fn new(location: impl Into<String>, field_index: usize, role: Role) -> Self {
        Self {
            location: location.into(),
            field_index,
            role,
        }
    }

    /// The hosts file itself, allowing every name it already maps.
    pub fn hosts_file(path: &Path) -> Self {
        Self::new(path.to_string_lossy(), HOSTS_DOMAIN_FIELD, Role::Allow)
    }

    /// A location without a scheme separator is a local file.
    pub fn is_remote(&self) -> bool {
        self.location.contains("://")
    }
}

/// Parsed configuration, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub concurrency: usize,
    pub sources: Vec<ListSource>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            sources: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::parse(&content, &path.to_string_lossy())?;
        Ok(config)
    }

    /// Parse configuration text. `name` is used in error messages.
    pub fn parse(content: &str, name: &str) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        for (i, line) in content.lines().enumerate() {
            config.apply_line(line, name, i + 1)?;
        }

        Ok(config)
    }

    /// Sources with the given role, in configuration order
    pub fn sources_with_role(&self, role: Role) -> impl Iterator<Item = &ListSource> {
        self.sources.iter().filter(move |s| s.role == role)
    }

    /// Append the hosts file as an allow source
    pub fn with_hosts_file(mut self, hosts_path: &Path) -> Self {
        self.sources.push(ListSource::hosts_file(hosts_path));
        self
    }

    fn apply_line(&mut self, line: &str, name: &str, line_no: usize) -> Result<(), ConfigError> {
        if line.trim_start().starts_with('#') || is_blank(line) {
            return Ok(());
        }

        let err = |kind| ConfigError::new(name, line_no, kind);
        let fields: Vec<&str> = line.split_whitespace().collect();

        match fields[0].to_lowercase().as_str() {
            "allowlist" | "whitelist" => {
                self.sources.push(parse_list(&fields, Role::Allow).map_err(err)?);
            }
            "blocklist" | "blacklist" => {
                self.sources.push(parse_list(&fields, Role::Block).map_err(err)?);
            }
            "concurrency" => {
                if fields.len() != 2 {
                    return Err(err(ConfigErrorKind::WrongFieldCount));
                }
                let n: i64 = fields[1]
                    .parse()
                    .map_err(|_| err(ConfigErrorKind::NonNumericConcurrency))?;
                if n < 1 {
                    return Err(err(ConfigErrorKind::ConcurrencyTooSmall));
                }
                self.concurrency = n as usize;
            }
            _ => {
                return Err(err(ConfigErrorKind::UnknownDirective(fields[0].to_string())));
            }
        }

        Ok(())
    }
}

fn parse_list(fields: &[&str], role: Role) -> Result<ListSource, ConfigErrorKind> {
    if fields.len() != 3 {
        return Err(ConfigErrorKind::WrongFieldCount);
    }

    let index: i64 = fields[1]
        .parse()
        .map_err(|_| ConfigErrorKind::NonNumericFieldIndex)?;
    if index < 1 {
        return Err(ConfigErrorKind::FieldIndexTooSmall);
    }

    Ok(ListSource::new(fields[2], (index - 1) as usize, role))
}
