use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use lexlogic_core::client::{AgenticLogApi, LogPage};
use lexlogic_core::logs::{poll, AgenticLogFeed};
use lexlogic_core::models::{AgenticLog, FragmentId, LogOrder, MessageSource};
use lexlogic_core::ApiError;
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;

/// In-memory log store paging the way the backend does.
#[derive(Clone, Default)]
struct FakeLogs {
    entries: Arc<Mutex<Vec<AgenticLog>>>,
    requests: Arc<Mutex<Vec<LogPage>>>,
    failing: Arc<AtomicBool>,
}

impl FakeLogs {
    fn with_entries(ids: std::ops::RangeInclusive<i64>) -> Self {
        let fake = Self::default();
        fake.push(ids);
        fake
    }

    fn push(&self, ids: std::ops::RangeInclusive<i64>) {
        let mut entries = self.entries.lock().unwrap();
        entries.extend(ids.map(entry));
    }

    fn last_request(&self) -> Option<LogPage> {
        self.requests.lock().unwrap().last().copied()
    }
}

fn entry(id: i64) -> AgenticLog {
    AgenticLog {
        id,
        user_prompt: format!("prompt {}", id),
        system_prompt: None,
        message_source: MessageSource::ModelResponse,
        regulation_fragment_id: 1,
        created_at: Utc::now(),
        is_error: false,
    }
}

fn ids(entries: &[AgenticLog]) -> Vec<i64> {
    entries.iter().map(|e| e.id).collect()
}

#[async_trait]
impl AgenticLogApi for FakeLogs {
    async fn agentic_logs(
        &self,
        _fragment: FragmentId,
        page: LogPage,
    ) -> Result<Vec<AgenticLog>, ApiError> {
        self.requests.lock().unwrap().push(page);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".into()));
        }

        let all = self.entries.lock().unwrap().clone();
        let limit = page.limit.unwrap_or(u32::MAX) as usize;
        let page = match page.order {
            LogOrder::Asc => all
                .into_iter()
                .filter(|e| page.cursor.map_or(true, |c| e.id > c))
                .take(limit)
                .collect(),
            LogOrder::Desc => all
                .into_iter()
                .rev()
                .filter(|e| page.cursor.map_or(true, |c| e.id < c))
                .take(limit)
                .collect(),
        };
        Ok(page)
    }
}

#[tokio::test]
async fn test_initial_page_is_newest_in_order() {
    let fake = FakeLogs::with_entries(1..=25);
    let mut feed = AgenticLogFeed::new(fake.clone(), 1).with_limit(10);

    let loaded = feed.load_initial().await.unwrap();
    assert_eq!(ids(&loaded), (16..=25).collect::<Vec<_>>());
    assert_eq!(ids(feed.entries()), (16..=25).collect::<Vec<_>>());
    assert_eq!(
        fake.last_request(),
        Some(LogPage {
            cursor: None,
            limit: Some(10),
            order: LogOrder::Desc
        })
    );
}

#[tokio::test]
async fn test_fetch_newer_keeps_cursor_on_empty_page() {
    let fake = FakeLogs::with_entries(1..=5);
    let mut feed = AgenticLogFeed::new(fake.clone(), 1);
    feed.load_initial().await.unwrap();

    assert!(feed.fetch_newer().await.unwrap().is_empty());
    assert!(feed.fetch_newer().await.unwrap().is_empty());
    assert_eq!(fake.last_request().and_then(|p| p.cursor), Some(5));

    fake.push(6..=7);
    let newer = feed.fetch_newer().await.unwrap();
    assert_eq!(ids(&newer), vec![6, 7]);
    assert_eq!(fake.last_request().map(|p| p.order), Some(LogOrder::Asc));
    assert_eq!(ids(feed.entries()), (1..=7).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_fetch_older_until_start() {
    let fake = FakeLogs::with_entries(1..=25);
    let mut feed = AgenticLogFeed::new(fake.clone(), 1).with_limit(10);
    feed.load_initial().await.unwrap();

    assert_eq!(ids(&feed.fetch_older().await.unwrap()), (6..=15).collect::<Vec<_>>());
    assert_eq!(ids(&feed.fetch_older().await.unwrap()), (1..=5).collect::<Vec<_>>());
    assert!(!feed.reached_start());
    assert!(feed.fetch_older().await.unwrap().is_empty());
    assert!(feed.reached_start());
    assert_eq!(ids(feed.entries()), (1..=25).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_fetch_newer_on_empty_feed_loads_initial() {
    let fake = FakeLogs::with_entries(1..=3);
    let mut feed = AgenticLogFeed::new(fake, 1);
    assert_eq!(ids(&feed.fetch_newer().await.unwrap()), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_poll_forwards_new_entries_and_stops() {
    let fake = FakeLogs::with_entries(1..=2);
    let feed = AgenticLogFeed::new(fake.clone(), 1);
    let (tx, mut rx) = mpsc::channel(16);
    let (stop_tx, stop_rx) = watch::channel(false);

    let handle = tokio::spawn(poll(feed, Duration::from_millis(10), tx, stop_rx));

    let first = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    let second = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert_eq!((first.id, second.id), (1, 2));

    fake.push(3..=3);
    let third = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert_eq!(third.id, 3);

    stop_tx.send(true).unwrap();
    let feed = timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
    assert_eq!(ids(feed.entries()), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_poll_survives_errors() {
    let fake = FakeLogs::with_entries(1..=1);
    fake.failing.store(true, Ordering::SeqCst);
    let feed = AgenticLogFeed::new(fake.clone(), 1);
    let (tx, mut rx) = mpsc::channel(16);
    let (stop_tx, stop_rx) = watch::channel(false);

    let handle = tokio::spawn(poll(feed, Duration::from_millis(10), tx, stop_rx));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err());
    fake.failing.store(false, Ordering::SeqCst);

    let first = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert_eq!(first.id, 1);

    stop_tx.send(true).unwrap();
    timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_poll_stops_when_receiver_dropped() {
    let fake = FakeLogs::with_entries(1..=1);
    let feed = AgenticLogFeed::new(fake.clone(), 1);
    let (tx, rx) = mpsc::channel(1);
    let (_stop_tx, stop_rx) = watch::channel(false);
    drop(rx);

    let handle = tokio::spawn(poll(feed, Duration::from_millis(10), tx, stop_rx));
    timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
}

/// Never answers within the test's lifetime.
#[derive(Clone, Default)]
struct StalledLogs {
    started: Arc<AtomicBool>,
}

#[async_trait]
impl AgenticLogApi for StalledLogs {
    async fn agentic_logs(
        &self,
        _fragment: FragmentId,
        _page: LogPage,
    ) -> Result<Vec<AgenticLog>, ApiError> {
        self.started.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(300)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_poll_stops_on_shutdown_during_fetch() {
    let fake = StalledLogs::default();
    let feed = AgenticLogFeed::new(fake.clone(), 1);
    let (tx, _rx) = mpsc::channel(16);
    let (stop_tx, stop_rx) = watch::channel(false);

    let handle = tokio::spawn(poll(feed, Duration::from_millis(10), tx, stop_rx));

    timeout(Duration::from_secs(2), async {
        while !fake.started.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    stop_tx.send(true).unwrap();
    let feed = timeout(Duration::from_secs(2), handle)
        .await
        .expect("poll should stop while a fetch is pending")
        .unwrap();
    assert!(feed.is_empty());
}
