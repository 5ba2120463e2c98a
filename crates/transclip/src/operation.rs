use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CopierConfig;
use crate::control::{ControlState, StatusIndicator};
use crate::errors::CopierError;
use crate::page::{Clipboard, NodeHandle, PageDom};
use crate::watcher::ElementWatcher;

/// One extracted transcript segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub timestamp: String,
    pub text: String,
}

impl TranscriptLine {
    pub fn render(&self) -> String {
        format!("{} {}", self.timestamp, self.text)
    }
}

/// The user-triggered copy sequence.
///
/// Single-flight: an activation arriving while another is in flight is
/// dropped, never queued. The scroll offset and the lock are restored on
/// every exit path, including a hard-step timeout mid-pipeline.
pub struct CopyOperation {
    dom: Arc<dyn PageDom>,
    clipboard: Arc<dyn Clipboard>,
    watcher: ElementWatcher,
    indicator: StatusIndicator,
    config: Arc<CopierConfig>,
    lock: Arc<AtomicBool>,
}

/// Runs on every exit path of [`CopyOperation::activate`]: releases the
/// lock and restores the page scroll one event-loop turn later, so the
/// host's own layout settlement wins first.
struct CleanupGuard {
    dom: Arc<dyn PageDom>,
    lock: Arc<AtomicBool>,
    scroll: f64,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let dom = self.dom.clone();
        let scroll = self.scroll;
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            dom.scroll_to(scroll);
        });
        self.lock.store(false, Ordering::SeqCst);
    }
}

impl CopyOperation {
    pub fn new(
        dom: Arc<dyn PageDom>,
        clipboard: Arc<dyn Clipboard>,
        config: Arc<CopierConfig>,
        control: NodeHandle,
    ) -> Self {
        let lock = Arc::new(AtomicBool::new(false));
        let watcher =
            ElementWatcher::new(dom.clone()).with_default_timeout(config.timeouts.default);
        let indicator =
            StatusIndicator::new(dom.clone(), control, lock.clone(), config.reset_delay);
        Self {
            dom,
            clipboard,
            watcher,
            indicator,
            config,
            lock,
        }
    }

    /// Whether a copy sequence is currently in flight.
    pub fn in_flight(&self) -> bool {
        self.lock.load(Ordering::SeqCst)
    }

    /// Drive the whole copy sequence once.
    pub async fn activate(&self) {
        if self.lock.swap(true, Ordering::SeqCst) {
            debug!("copy already in progress, activation dropped");
            return;
        }

        let _guard = CleanupGuard {
            dom: self.dom.clone(),
            lock: self.lock.clone(),
            scroll: self.dom.scroll_offset(),
        };

        self.indicator.set(ControlState::Running);

        let state = match self.run_pipeline().await {
            Ok(lines) => {
                info!(lines, "transcript copied");
                ControlState::Succeeded
            }
            Err(err) => {
                warn!(error = %err, "copy pipeline failed");
                match err {
                    CopierError::ClipboardRejected(_) => ControlState::Failed,
                    CopierError::ElementTimeout { .. } | CopierError::EmptyExtraction => {
                        ControlState::NotFound
                    }
                    _ => ControlState::Failed,
                }
            }
        };
        self.indicator.finish(state);
    }

    async fn run_pipeline(&self) -> Result<usize, CopierError> {
        let sel = &self.config.selectors;
        let timeouts = &self.config.timeouts;

        // Revealing the full description is optional; the expander is
        // absent once the description is already open.
        if let Some(expander) = self.dom.query(None, &sel.description_expander) {
            self.dom.click(&expander);
        }

        let trigger = self
            .watcher
            .wait(&sel.transcript_trigger, None, Some(timeouts.trigger))
            .await?;
        self.dom.click(&trigger);

        // Collapsing the description again is cosmetic; never fail the
        // extraction over it.
        match self
            .watcher
            .wait(&sel.description_collapser, None, Some(timeouts.collapse))
            .await
        {
            Ok(collapser) => self.dom.click(&collapser),
            Err(err) => debug!(error = %err, "description collapse unavailable"),
        }

        let container = self
            .watcher
            .wait(&sel.segment_container, None, None)
            .await?;

        let lines = self.extract_lines(&container);
        if lines.is_empty() {
            return Err(CopierError::EmptyExtraction);
        }

        let text = lines
            .iter()
            .map(TranscriptLine::render)
            .collect::<Vec<_>>()
            .join("\n");

        self.clipboard
            .write_text(&text)
            .await
            .map_err(CopierError::ClipboardRejected)?;

        Ok(lines.len())
    }

    /// Segments missing either sub-part are skipped rather than rendered
    /// half-empty.
    fn extract_lines(&self, container: &NodeHandle) -> Vec<TranscriptLine> {
        let sel = &self.config.selectors;
        self.dom
            .query_all(Some(container), &sel.segment)
            .into_iter()
            .filter_map(|segment| {
                let timestamp = self.dom.query(Some(&segment), &sel.segment_timestamp)?;
                let text = self.dom.query(Some(&segment), &sel.segment_text)?;
                Some(TranscriptLine {
                    timestamp: self.dom.inner_text(&timestamp)?.trim().to_string(),
                    text: self.dom.inner_text(&text)?.trim().to_string(),
                })
            })
            .collect()
    }
}
