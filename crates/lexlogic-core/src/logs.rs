//! Cursor-paged view over a fragment's agentic log.
//!
//! The backend pages by entry id. The first page is the newest `limit`
//! entries; afterwards newer entries are requested ascending from the last
//! seen id and older ones descending from the first.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::client::{AgenticLogApi, ApiError, LogPage};
use crate::config::DEFAULT_LOG_PAGE_LIMIT;
use crate::models::{AgenticLog, FragmentId, LogOrder};

pub struct AgenticLogFeed<A> {
    api: A,
    fragment: FragmentId,
    limit: u32,
    /// Chronological.
    entries: Vec<AgenticLog>,
    reached_start: bool,
}

impl<A: AgenticLogApi> AgenticLogFeed<A> {
    pub fn new(api: A, fragment: FragmentId) -> Self {
        Self {
            api,
            fragment,
            limit: DEFAULT_LOG_PAGE_LIMIT,
            entries: Vec::new(),
            reached_start: false,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn fragment(&self) -> FragmentId {
        self.fragment
    }

    /// Entries loaded so far, oldest first.
    pub fn entries(&self) -> &[AgenticLog] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once an older page came back empty.
    pub fn reached_start(&self) -> bool {
        self.reached_start
    }

    /// Replace the feed with the newest page. Returns the entries loaded.
    pub async fn load_initial(&mut self) -> Result<Vec<AgenticLog>, ApiError> {
        let mut page = self.fetch(None, LogOrder::Desc).await?;
        page.reverse();
        self.entries = page.clone();
        self.reached_start = false;
        Ok(page)
    }

    /// Append entries newer than the last one seen. An empty page leaves the
    /// cursor where it was.
    pub async fn fetch_newer(&mut self) -> Result<Vec<AgenticLog>, ApiError> {
        let Some(last) = self.entries.last().map(|e| e.id) else {
            return self.load_initial().await;
        };

        let page: Vec<AgenticLog> = self
            .fetch(Some(last), LogOrder::Asc)
            .await?
            .into_iter()
            .filter(|e| e.id > last)
            .collect();
        self.entries.extend(page.iter().cloned());
        Ok(page)
    }

    /// Prepend entries older than the first one seen.
    pub async fn fetch_older(&mut self) -> Result<Vec<AgenticLog>, ApiError> {
        let Some(first) = self.entries.first().map(|e| e.id) else {
            return Ok(Vec::new());
        };

        let mut page: Vec<AgenticLog> = self
            .fetch(Some(first), LogOrder::Desc)
            .await?
            .into_iter()
            .filter(|e| e.id < first)
            .collect();
        if page.is_empty() {
            self.reached_start = true;
            return Ok(page);
        }

        page.reverse();
        self.entries.splice(0..0, page.iter().cloned());
        Ok(page)
    }

    async fn fetch(
        &self,
        cursor: Option<i64>,
        order: LogOrder,
    ) -> Result<Vec<AgenticLog>, ApiError> {
        let page = LogPage {
            cursor,
            limit: Some(self.limit),
            order,
        };
        let entries = self.api.agentic_logs(self.fragment, page).await?;
        debug!(
            fragment = self.fragment,
            ?cursor,
            order = order.as_str(),
            count = entries.len(),
            "Fetched agentic log page"
        );
        Ok(entries)
    }
}

/// Poll `feed` every `interval`, forwarding each new entry to `sender`.
///
/// The first tick fires immediately. Fetch errors are logged and retried on
/// the next tick. Stops when `shutdown` flips to `true` (or its sender is
/// dropped), even mid-fetch, or when the receiver goes away, and hands the
/// feed back.
pub async fn poll<A: AgenticLogApi>(
    mut feed: AgenticLogFeed<A>,
    interval: Duration,
    sender: mpsc::Sender<AgenticLog>,
    mut shutdown: watch::Receiver<bool>,
) -> AgenticLogFeed<A> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *shutdown.borrow() {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
        }

        // A fetch in flight is dropped on shutdown. The feed is only
        // updated after a page arrives.
        let fetch = async {
            if feed.is_empty() {
                feed.load_initial().await
            } else {
                feed.fetch_newer().await
            }
        };
        let result = tokio::select! {
            result = fetch => result,
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
        };

        match result {
            Ok(entries) => {
                for entry in entries {
                    if sender.send(entry).await.is_err() {
                        debug!("Agentic log receiver dropped, stopping poll");
                        return feed;
                    }
                }
            }
            Err(e) => {
                warn!(fragment = feed.fragment(), error = %e, "Failed to poll agentic logs");
            }
        }
    }

    feed
}
