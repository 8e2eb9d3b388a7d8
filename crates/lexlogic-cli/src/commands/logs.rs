//! Agentic log display and following.

use color_eyre::Result;
use lexlogic_core::client::AgenticLogApi;
use lexlogic_core::config::LogsConfig;
use lexlogic_core::logs::poll;
use lexlogic_core::models::{AgenticLog, FragmentId};
use lexlogic_core::AgenticLogFeed;
use std::future::Future;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::output::{dimmed, heading, print_info};

pub async fn execute<A: AgenticLogApi + 'static>(
    api: A,
    config: &LogsConfig,
    fragment: FragmentId,
    follow: bool,
) -> Result<()> {
    let mut feed = AgenticLogFeed::new(api, fragment).with_limit(config.page_limit);
    let initial = feed.load_initial().await?;
    if initial.is_empty() && !follow {
        print_info("No agentic log entries");
        return Ok(());
    }
    for entry in &initial {
        print_entry(entry);
    }
    if !follow {
        return Ok(());
    }

    print_info("Following agentic log (Ctrl+C to stop)");
    let (tx, rx) = mpsc::channel(64);
    let (stop_tx, stop_rx) = watch::channel(false);
    let poller = tokio::spawn(poll(feed, config.poll_interval(), tx, stop_rx));

    follow_until(rx, stop_tx, poller, tokio::signal::ctrl_c()).await?;
    Ok(())
}

/// Print entries from `rx` until it closes or `stop` resolves, then shut the
/// poller down and wait for it.
async fn follow_until<A, F>(
    mut rx: mpsc::Receiver<AgenticLog>,
    stop_tx: watch::Sender<bool>,
    poller: JoinHandle<AgenticLogFeed<A>>,
    stop: F,
) -> Result<AgenticLogFeed<A>>
where
    F: Future,
{
    tokio::pin!(stop);
    loop {
        tokio::select! {
            entry = rx.recv() => match entry {
                Some(entry) => print_entry(&entry),
                None => break,
            },
            _ = &mut stop => break,
        }
    }

    // The poller may already be gone if the receiver closed first.
    let _ = stop_tx.send(true);
    drop(rx);
    Ok(poller.await?)
}

fn print_entry(entry: &AgenticLog) {
    let source = heading(entry.message_source.display_name());
    let error = if entry.is_error { " error" } else { "" };
    println!(
        "{} {}{}",
        source,
        dimmed(&format!("#{} {}", entry.id, entry.created_at.format("%H:%M:%S"))),
        error
    );
    if let Some(system) = &entry.system_prompt {
        println!("{}", dimmed(system));
    }
    println!("{}", entry.user_prompt);
    println!();
}
