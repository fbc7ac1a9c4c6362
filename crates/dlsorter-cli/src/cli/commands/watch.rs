//! `dlsorter watch` – intercept a stream of download-created events.
//!
//! Events arrive as JSON lines (one `Download` per line) from stdin or a
//! file. Each event runs through the interceptor with the journal-backed
//! download service, so every decision is persisted as a journal entry.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dlsorter_core::config::DlsorterConfig;
use dlsorter_core::download::Download;
use dlsorter_core::interceptor::{InterceptOutcome, Interceptor};
use dlsorter_core::rules::RuleStore;
use dlsorter_core::services::{JournalDownloadService, LogNotifier};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

pub async fn run_watch(
    store: Arc<RuleStore>,
    cfg: &DlsorterConfig,
    input: &str,
    journal: Option<PathBuf>,
) -> Result<()> {
    let journal_path = match journal {
        Some(path) => path,
        None => default_journal_path()?,
    };
    let downloads = Arc::new(JournalDownloadService::new(&journal_path));
    let notifier = Arc::new(LogNotifier::new());
    let interceptor = Interceptor::new(store, downloads, notifier, cfg.interceptor_options());

    if input == "-" {
        let reader = BufReader::new(tokio::io::stdin());
        process_events(&interceptor, reader).await
    } else {
        let file = tokio::fs::File::open(input)
            .await
            .with_context(|| format!("failed to open event source: {input}"))?;
        process_events(&interceptor, BufReader::new(file)).await
    }
}

async fn process_events<R>(interceptor: &Interceptor, reader: BufReader<R>) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let download: Download = match serde_json::from_str(line) {
            Ok(d) => d,
            Err(err) => {
                tracing::warn!(%err, "skipping malformed event line");
                continue;
            }
        };
        match interceptor.handle(&download).await {
            InterceptOutcome::Redirected { target, new_id } => {
                println!("{} -> {} (new download {})", download.url, target, new_id);
            }
            InterceptOutcome::RedirectFailed { target } => {
                println!("{} -> {} FAILED", download.url, target);
            }
            InterceptOutcome::NoMatch => println!("{} (no rule matched)", download.url),
            InterceptOutcome::Ignored => {}
        }
    }
    Ok(())
}

/// Journal default: next to the rules file in the XDG state dir.
fn default_journal_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("dlsorter")?;
    Ok(dirs.place_state_file("journal.jsonl")?)
}
