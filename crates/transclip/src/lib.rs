//! Watch-page automation that lifts a video transcript onto the clipboard.
//!
//! This crate drives a single-page application's own UI through a
//! [`PageDom`] collaborator: it injects a visible control, and on
//! activation expands the description, opens the transcript panel, extracts
//! every segment, and hands the joined text to a [`Clipboard`]. It survives
//! the host's client-side navigation by tearing down and re-creating its
//! control and state per route.
//!
//! Three pieces carry the real invariants: [`ElementWatcher`] (mutation-
//! driven waits, no duplicate observers), [`CopyOperation`] (single-flight
//! sequencing with guaranteed scroll/lock restoration), and
//! [`PageLifecycleController`] (one live control per route epoch). Selector
//! strings and styling live in [`CopierConfig`] as data.

use std::sync::Arc;

pub mod config;
pub mod control;
pub mod errors;
pub mod lifecycle;
pub mod operation;
pub mod page;
#[cfg(test)]
mod tests;
pub mod watcher;

pub use config::{CopierConfig, SiteSelectors, StepTimeouts};
pub use control::{ControlState, StatusIndicator};
pub use errors::CopierError;
pub use lifecycle::{NavigationWatch, PageLifecycleController};
pub use operation::{CopyOperation, TranscriptLine};
pub use page::{
    ActivationReceiver, Clipboard, ControlSpec, MutationBatch, MutationReceiver, NodeHandle,
    PageDom,
};
pub use tokio_util::sync::CancellationToken;
pub use watcher::ElementWatcher;

/// Top-level entry point wiring the lifecycle controller to a host page
/// and clipboard.
pub struct TranscriptCopier {
    controller: PageLifecycleController,
}

impl TranscriptCopier {
    pub fn new(
        dom: Arc<dyn PageDom>,
        clipboard: Arc<dyn Clipboard>,
        config: CopierConfig,
    ) -> Self {
        Self {
            controller: PageLifecycleController::new(dom, clipboard, config),
        }
    }

    /// Install the control on the current page and keep it alive across
    /// client-side navigations until the navigation stream ends.
    pub async fn run(self, navigation: NavigationWatch) {
        self.controller.run(navigation).await;
    }
}
