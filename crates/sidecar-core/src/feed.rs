//! Live payload feeds
//!
//! A [`PayloadSource`] yields raw JSON documents; [`run_feed`] pushes each
//! one through the dashboard ingest pipeline in arrival order until the
//! source ends or shutdown is signalled.

use crate::dashboard::{DashboardHandle, IngestOutcome};
use crate::error::SidecarError;
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Producer of raw payload documents
#[async_trait]
pub trait PayloadSource: Send {
    /// Next document, or `None` once the source is exhausted
    async fn next_document(&mut self) -> Option<Result<String, SidecarError>>;
}

/// Re-reads a file on an interval, yielding only changed contents
#[derive(Debug)]
pub struct PollingSource {
    path: PathBuf,
    interval: Duration,
    last: Option<String>,
    primed: bool,
}

impl PollingSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
            last: None,
            primed: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PayloadSource for PollingSource {
    async fn next_document(&mut self) -> Option<Result<String, SidecarError>> {
        loop {
            if self.primed {
                tokio::time::sleep(self.interval).await;
            }
            self.primed = true;

            let text = match tokio::fs::read_to_string(&self.path).await {
                Ok(text) => text,
                Err(e) => return Some(Err(SidecarError::io(&self.path, e))),
            };
            if self.last.as_deref() != Some(text.as_str()) {
                self.last = Some(text.clone());
                return Some(Ok(text));
            }
        }
    }
}

/// One document per non-blank line
///
/// The source ends at EOF or after the first read error.
#[derive(Debug)]
pub struct LineStreamSource<R> {
    lines: Lines<R>,
    finished: bool,
}

impl<R: AsyncBufRead + Unpin + Send> LineStreamSource<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            finished: false,
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> PayloadSource for LineStreamSource<R> {
    async fn next_document(&mut self) -> Option<Result<String, SidecarError>> {
        while !self.finished {
            match self.lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => self.finished = true,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(SidecarError::Stream(e)));
                }
            }
        }
        None
    }
}

/// Counters reported when a feed stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedSummary {
    pub received: usize,
    pub adopted: usize,
    pub rejected: usize,
}

/// Drive `source` into `handle` until it ends or `shutdown` turns true
///
/// Source errors count as rejections and do not stop the feed.
pub async fn run_feed<S: PayloadSource>(
    mut source: S,
    handle: &DashboardHandle,
    mut shutdown: watch::Receiver<bool>,
) -> FeedSummary {
    let mut summary = FeedSummary::default();
    debug!("feed started");

    loop {
        let next = tokio::select! {
            biased;
            () = shutdown_requested(&mut shutdown) => {
                debug!("feed shutdown requested");
                break;
            }
            next = source.next_document() => next,
        };

        let Some(next) = next else {
            debug!("feed source exhausted");
            break;
        };
        summary.received += 1;

        match next {
            Ok(text) => match handle.ingest_text(&text) {
                IngestOutcome::Adopted { .. } => summary.adopted += 1,
                IngestOutcome::Rejected { .. } => summary.rejected += 1,
            },
            Err(e) => {
                warn!(error = %e, "feed source error");
                summary.rejected += 1;
            }
        }
    }

    debug!(
        received = summary.received,
        adopted = summary.adopted,
        rejected = summary.rejected,
        "feed stopped"
    );
    summary
}

/// Resolves once the flag is true; pends forever if the sender is gone
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SidecarConfig;
    use crate::dashboard::Dashboard;
    use pretty_assertions::assert_eq;
    use sidecar_test_utils::{item, single_item_payload};
    use tokio::io::BufReader;

    fn doc(status: &str) -> String {
        serde_json::to_string(&single_item_payload(item("a", status))).unwrap()
    }

    #[tokio::test]
    async fn line_stream_skips_blank_lines() {
        let text = format!("\n{}\n   \n{}\n", doc("done"), doc("blocked"));
        let mut source = LineStreamSource::new(BufReader::new(text.as_bytes()));
        let mut seen = Vec::new();
        while let Some(next) = source.next_document().await {
            seen.push(next.unwrap());
        }
        assert_eq!(seen, [doc("done"), doc("blocked")]);
        assert!(source.next_document().await.is_none());
    }

    #[tokio::test]
    async fn polling_yields_only_changes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "first").unwrap();
        let mut source = PollingSource::new(file.path(), Duration::from_millis(5));

        assert_eq!(source.next_document().await.unwrap().unwrap(), "first");
        std::fs::write(file.path(), "second").unwrap();
        assert_eq!(source.next_document().await.unwrap().unwrap(), "second");
    }

    #[tokio::test]
    async fn polling_reports_missing_file() {
        let mut source = PollingSource::new("/nonexistent/payload.json", Duration::from_millis(5));
        let next = source.next_document().await.unwrap();
        assert!(matches!(next, Err(SidecarError::Io { .. })));
    }

    #[tokio::test]
    async fn feed_counts_adoptions_and_rejections() {
        let handle = DashboardHandle::new(Dashboard::new(SidecarConfig::default()).unwrap());
        let text = format!("{}\n{{oops\n{}\n", doc("in_progress"), doc("done"));
        let source = LineStreamSource::new(BufReader::new(text.as_bytes()));
        let (_tx, rx) = watch::channel(false);

        let summary = run_feed(source, &handle, rx).await;
        assert_eq!(
            summary,
            FeedSummary {
                received: 3,
                adopted: 2,
                rejected: 1
            }
        );
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.projects[0].roadmaps[0].phases[0].items[0].status.as_str(), "done");
    }

    #[tokio::test]
    async fn feed_stops_on_shutdown() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), doc("done")).unwrap();
        let handle = DashboardHandle::new(Dashboard::new(SidecarConfig::default()).unwrap());
        let (tx, rx) = watch::channel(false);

        let source = PollingSource::new(file.path(), Duration::from_millis(5));
        let task = {
            let handle = handle.clone();
            tokio::spawn(async move { run_feed(source, &handle, rx).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        let summary = task.await.unwrap();
        assert_eq!(summary.adopted, 1);
        assert_eq!(handle.snapshot().projects[0].project_id, "p0");
    }
}
