use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::page::{NodeHandle, PageDom};

const COLOR_BLUE: &str = "var(--yt-spec-badge-chip-background, #065fd4)";
const COLOR_GREEN: &str = "var(--yt-spec-icon-active-other, #28a745)";
const COLOR_RED: &str = "var(--yt-spec-text-link, #dc3545)";

/// Visible status of the injected control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlState {
    Idle,
    Running,
    Succeeded,
    NotFound,
    Failed,
}

impl ControlState {
    pub fn label(&self) -> &'static str {
        match self {
            ControlState::Idle => "Copy Transcript",
            ControlState::Running => "Copying...",
            ControlState::Succeeded => "Copied!",
            ControlState::NotFound => "Transcript Not Found",
            ControlState::Failed => "Copy Failed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ControlState::Idle | ControlState::Running => COLOR_BLUE,
            ControlState::Succeeded => COLOR_GREEN,
            ControlState::NotFound | ControlState::Failed => COLOR_RED,
        }
    }

    /// Terminal states fall back to [`ControlState::Idle`] after a delay.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ControlState::Succeeded | ControlState::NotFound | ControlState::Failed
        )
    }
}

/// Writes operation status through to the injected control.
///
/// Shares the operation lock so the scheduled fall back to idle can tell
/// whether a newer operation has started in the meantime. All writes go
/// through [`PageDom::set_control`], which ignores detached controls, so an
/// indicator outliving its epoch goes quiet instead of resurrecting a
/// removed node.
#[derive(Clone)]
pub struct StatusIndicator {
    dom: Arc<dyn PageDom>,
    control: NodeHandle,
    lock: Arc<AtomicBool>,
    reset_delay: Duration,
}

impl StatusIndicator {
    pub fn new(
        dom: Arc<dyn PageDom>,
        control: NodeHandle,
        lock: Arc<AtomicBool>,
        reset_delay: Duration,
    ) -> Self {
        Self {
            dom,
            control,
            lock,
            reset_delay,
        }
    }

    pub fn set(&self, state: ControlState) {
        self.dom
            .set_control(&self.control, state.label(), state.color());
    }

    /// Show a terminal state and schedule the fall back to idle.
    ///
    /// The reset reads the lock when it fires, not when it is scheduled: a
    /// newer operation already in flight suppresses it.
    pub fn finish(&self, state: ControlState) {
        debug_assert!(state.is_terminal());
        self.set(state);

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.reset_delay).await;
            if this.lock.load(Ordering::SeqCst) {
                trace!("idle reset suppressed, newer operation in flight");
                return;
            }
            this.set(ControlState::Idle);
        });
    }
}
