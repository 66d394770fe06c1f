//! Background page fetcher
//!
//! Runs catalog queries off the UI thread. Each request is numbered and only
//! the response to the most recent request is delivered; answers to requests
//! that were superseded while in flight are dropped.

use super::catalog::{GalaxyCatalog, GalaxyPage};
use crate::model::TableState;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Message sent from a fetch worker
struct FetchResult {
    sequence: u64,
    page: GalaxyPage,
}

/// Fetches catalog pages in the background
pub struct PageFetcher {
    catalog: Arc<GalaxyCatalog>,
    sender: Sender<FetchResult>,
    receiver: Receiver<FetchResult>,
    /// Sequence number of the latest request
    latest: u64,
    /// Start time of the latest request while it is outstanding
    pending_since: Option<Instant>,
    /// Artificial latency applied by workers
    latency: Duration,
}

impl PageFetcher {
    pub fn new(catalog: Arc<GalaxyCatalog>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            catalog,
            sender,
            receiver,
            latest: 0,
            pending_since: None,
            latency: Duration::ZERO,
        }
    }

    /// Delay every response, e.g. to mimic a remote server
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Whether a request is still waiting for its response
    pub fn is_loading(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Request the page described by `state`, superseding earlier requests
    pub fn request(&mut self, state: TableState) {
        self.latest += 1;
        self.pending_since = Some(Instant::now());

        let sequence = self.latest;
        let catalog = Arc::clone(&self.catalog);
        let sender = self.sender.clone();
        let latency = self.latency;

        debug!(sequence, page = state.page, "requesting catalog page");

        thread::spawn(move || {
            if !latency.is_zero() {
                thread::sleep(latency);
            }
            let page = catalog.query(&state);
            // The fetcher may be gone by now
            let _ = sender.send(FetchResult { sequence, page });
        });
    }

    /// Take the response to the latest request, if it has arrived
    pub fn poll(&mut self) -> Option<GalaxyPage> {
        let mut delivered = None;

        loop {
            match self.receiver.try_recv() {
                Ok(result) if result.sequence == self.latest => {
                    if let Some(started) = self.pending_since.take() {
                        debug!(
                            sequence = result.sequence,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "catalog page arrived"
                        );
                    }
                    delivered = Some(result.page);
                }
                Ok(result) => {
                    trace!(sequence = result.sequence, latest = self.latest, "dropping stale page");
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Unreachable while `self.sender` is alive
                    warn!("page fetcher channel disconnected");
                    self.pending_since = None;
                    break;
                }
            }
        }

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GalaxyRecord, GALAXY_COLUMNS};

    fn catalog(count: usize) -> Arc<GalaxyCatalog> {
        let records = (0..count)
            .map(|i| GalaxyRecord {
                name: Some(format!("G{}", i)),
                ra: i as f64,
                dec: 0.0,
                ..Default::default()
            })
            .collect();
        Arc::new(GalaxyCatalog::from_records(records))
    }

    fn wait_for_page(fetcher: &mut PageFetcher) -> Option<GalaxyPage> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(page) = fetcher.poll() {
                return Some(page);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_request_delivers_page() {
        let mut fetcher = PageFetcher::new(catalog(15));
        assert!(!fetcher.is_loading());

        fetcher.request(TableState::new(GALAXY_COLUMNS.len(), 1, 10));
        assert!(fetcher.is_loading());

        let page = wait_for_page(&mut fetcher).expect("page arrives");
        assert_eq!(page.total_matches, 15);
        assert_eq!(page.galaxies.len(), 5);
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn test_only_latest_request_is_delivered() {
        let mut fetcher = PageFetcher::new(catalog(30)).with_latency(Duration::from_millis(20));

        fetcher.request(TableState::new(GALAXY_COLUMNS.len(), 0, 10));
        fetcher.request(TableState::new(GALAXY_COLUMNS.len(), 2, 10));

        let page = wait_for_page(&mut fetcher).expect("page arrives");
        assert_eq!(page.galaxies[0].name.as_deref(), Some("G20"));

        // The superseded response is never handed out
        thread::sleep(Duration::from_millis(50));
        assert!(fetcher.poll().is_none());
    }

    #[test]
    fn test_poll_without_request_is_empty() {
        let mut fetcher = PageFetcher::new(catalog(1));
        assert!(fetcher.poll().is_none());
    }
}
