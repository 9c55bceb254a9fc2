//! Allow/block list reconciliation.
//!
//! Domains are compared as exact strings; no case folding or wildcard
//! matching is applied.

use std::collections::{BTreeSet, HashSet};

use crate::config::Role;
use crate::fetcher::FetchResult;

/// Host names a hosts file relies on. They are never blocked.
pub const RESERVED_HOST_NAMES: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "local",
    "broadcasthost",
    "ip6-localhost",
    "ip6-loopback",
    "ip6-localnet",
    "ip6-mcastprefix",
    "ip6-allnodes",
    "ip6-allrouters",
    "ip6-allhosts",
    "0.0.0.0",
];

/// Union of allowed domains and union of blocked domains across all sources
#[derive(Debug, Default)]
pub struct DomainSets<'a> {
    pub allowed: HashSet<&'a str>,
    pub blocked: HashSet<&'a str>,
}

impl<'a> DomainSets<'a> {
    /// Collect the domains of every result into the set matching its role.
    pub fn collect(results: &'a [FetchResult]) -> Self {
        let mut sets = DomainSets::default();
        sets.allowed.extend(RESERVED_HOST_NAMES.iter().copied());

        for result in results {
            let set = match result.role {
                Role::Allow => &mut sets.allowed,
                Role::Block => &mut sets.blocked,
            };
            set.extend(result.domains.iter().map(String::as_str));
        }

        sets
    }

    /// Blocked domains not allowed by any source, sorted ascending.
    pub fn block_list(&self) -> Vec<String> {
        self.blocked
            .iter()
            .filter(|d| !self.allowed.contains(*d))
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Reduce per-source results to the sorted, deduplicated list of domains
/// to block: every blocked domain that no allow source lists.
///
/// The names in [`RESERVED_HOST_NAMES`] count as allowed even when no
/// source lists them, so the result is the block union minus the allow
/// union and those reserved names.
pub fn reconcile(results: &[FetchResult]) -> Vec<String> {
    DomainSets::collect(results).block_list()
}
