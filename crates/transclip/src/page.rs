//! Collaborator seams between the copier and the host page.
//!
//! The copier itself never touches a real DOM; it drives whatever implements
//! [`PageDom`] and hands the finished text to a [`Clipboard`]. Selector
//! strings are opaque configuration data interpreted by the host side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Opaque handle to a node owned by the host page.
///
/// A handle stays valid as an identifier after its node is detached;
/// commands against a detached node are no-ops on the host side, never
/// errors. That contract is what makes late writes from a stale operation
/// harmless after a navigation teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(pub u64);

/// One batch of subtree mutations under an observed scope.
///
/// Watchers only care that something changed, not what.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationBatch;

/// Everything the host needs to materialize the injected control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlSpec {
    /// Id attribute; the control's identity across epochs.
    pub id: String,
    /// Class the injected stylesheet targets.
    pub class: String,
    pub label: String,
    pub color: String,
}

pub type MutationReceiver = mpsc::UnboundedReceiver<MutationBatch>;
pub type ActivationReceiver = mpsc::UnboundedReceiver<()>;

/// The host page surface the copier drives.
///
/// Queries and commands are synchronous; anything that takes time on a real
/// page (elements appearing, user gestures) arrives through the two stream
/// methods instead.
pub trait PageDom: Send + Sync {
    /// First element matching `selector` under `scope` (the whole document
    /// when `None`), in document order.
    fn query(&self, scope: Option<&NodeHandle>, selector: &str) -> Option<NodeHandle>;

    /// Every element matching `selector` under `scope`, in document order.
    fn query_all(&self, scope: Option<&NodeHandle>, selector: &str) -> Vec<NodeHandle>;

    /// Attached element carrying the given id attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeHandle>;

    /// Visible text content of a node, `None` once the node is gone.
    fn inner_text(&self, node: &NodeHandle) -> Option<String>;

    /// Dispatch a click gesture. No-op when the node is detached.
    fn click(&self, node: &NodeHandle);

    /// Subscribe to mutation batches under `scope`. Dropping the receiver
    /// disconnects the observation; the host closes the channel if the
    /// scope itself vanishes.
    fn observe(&self, scope: Option<&NodeHandle>) -> MutationReceiver;

    /// Current navigation address of the page.
    fn current_address(&self) -> String;

    /// Vertical scroll offset of the page.
    fn scroll_offset(&self) -> f64;

    /// Scroll the page to the given vertical offset.
    fn scroll_to(&self, offset: f64);

    /// Append a stylesheet node carrying the given id attribute.
    fn append_style(&self, id: &str, css: &str);

    /// Create the control and insert it immediately before `anchor`.
    fn insert_control_before(&self, anchor: &NodeHandle, spec: &ControlSpec) -> NodeHandle;

    /// Update the control's label and color. No-op when detached.
    fn set_control(&self, control: &NodeHandle, label: &str, color: &str);

    /// User gestures on the control. The host closes the channel when the
    /// control is removed from the document.
    fn activations(&self, control: &NodeHandle) -> ActivationReceiver;

    /// Remove a node (and its subtree) from the document.
    fn remove(&self, node: &NodeHandle);
}

/// System clipboard collaborator.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Write `text` to the clipboard; `Err` carries the host's reason.
    async fn write_text(&self, text: &str) -> Result<(), String>;
}
