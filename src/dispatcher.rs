//! Bounded concurrent fetching of all configured sources.

use anyhow::{ensure, Result};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::config::ListSource;
use crate::fetcher::{FetchResult, Fetcher};

/// Fetch every source, at most `concurrency` at a time.
///
/// The returned vector has one slot per source, in source order. A slot is
/// `None` when its source was unavailable; that failure is logged and the
/// other sources carry on. A fatal error (an unreadable local list) aborts
/// the fetches still in flight and is returned.
pub async fn fetch_all(
    fetcher: &Fetcher,
    sources: &[ListSource],
    concurrency: usize,
) -> Result<Vec<Option<FetchResult>>> {
    ensure!(concurrency > 0, "concurrency must be greater than 0");

    let mut slots: Vec<Option<FetchResult>> = vec![None; sources.len()];

    let mut tasks = stream::iter(sources.iter().enumerate())
        .map(|(i, source)| async move { (i, fetcher.fetch_list(source).await) })
        .buffer_unordered(concurrency);

    while let Some((i, outcome)) = tasks.next().await {
        match outcome {
            Ok(result) => {
                debug!("Source {} done ({})", i, result.location);
                slots[i] = Some(result);
            }
            Err(e) if e.is_recoverable() => warn!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(slots)
}
