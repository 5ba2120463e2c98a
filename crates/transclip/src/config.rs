//! Configuration data: selector strings, wait budgets, control identity.
//!
//! Everything here tracks one host site's present-day markup and is expected
//! to need updates as that markup evolves. The defaults target YouTube's
//! watch page.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Selector strings for the affordances the copier drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSelectors {
    /// Reveals the full description row. Optional; absent once expanded.
    pub description_expander: String,
    /// Opens the transcript panel. Hard dependency.
    pub transcript_trigger: String,
    /// Collapses the description again. Best effort.
    pub description_collapser: String,
    /// Container holding the transcript segments. Hard dependency.
    pub segment_container: String,
    /// One transcript segment within the container.
    pub segment: String,
    /// Timestamp sub-element within a segment.
    pub segment_timestamp: String,
    /// Text sub-element within a segment.
    pub segment_text: String,
    /// Landmark the control is inserted immediately before.
    pub comments_landmark: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            description_expander: "#description-inline-expander #expand.ytd-text-inline-expander"
                .to_string(),
            transcript_trigger: "ytd-video-description-transcript-section-renderer button"
                .to_string(),
            description_collapser: "#description-inline-expander #collapse.ytd-text-inline-expander"
                .to_string(),
            segment_container: "ytd-transcript-renderer #segments-container".to_string(),
            segment: "ytd-transcript-segment-renderer".to_string(),
            segment_timestamp: ".segment-timestamp".to_string(),
            segment_text: ".segment-text".to_string(),
            comments_landmark: "ytd-comments#comments".to_string(),
        }
    }
}

/// Per-step wait budgets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StepTimeouts {
    /// Fallback for waits without a step-specific budget.
    pub default: Duration,
    /// Show-transcript trigger (hard dependency).
    pub trigger: Duration,
    /// Description collapse (best effort, never fatal).
    pub collapse: Duration,
}

impl Default for StepTimeouts {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(10),
            trigger: Duration::from_secs(5),
            collapse: Duration::from_secs(2),
        }
    }
}

/// Full copier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopierConfig {
    pub selectors: SiteSelectors,
    pub timeouts: StepTimeouts,
    /// Address fragment marking an eligible watch page.
    pub watch_route: String,
    /// Id attribute of the injected control.
    pub control_id: String,
    /// Class the injected stylesheet targets.
    pub control_class: String,
    /// Id attribute guarding one-shot stylesheet injection.
    pub style_id: String,
    /// Stylesheet injected alongside the control.
    pub control_css: String,
    /// Delay before a terminal control state falls back to idle.
    pub reset_delay: Duration,
}

const DEFAULT_CONTROL_CSS: &str = "\
.transclip-control {
    background-color: var(--yt-spec-badge-chip-background, #065fd4);
    color: var(--yt-spec-text-primary-inverse, white);
    border: none; padding: 10px 18px; margin: 0 8px 16px;
    font-family: \"Roboto\", \"Arial\", sans-serif; font-size: 1.4rem; font-weight: 500;
    border-radius: var(--yt-spec-border-radius-2x, 20px); cursor: pointer;
    transition: background-color 0.3s ease, transform 0.1s ease, box-shadow 0.2s ease;
    box-shadow: var(--yt-spec-elevation-1, 0 2px 4px rgba(0,0,0,0.2));
}
.transclip-control:hover {
    box-shadow: var(--yt-spec-elevation-2, 0 4px 8px rgba(0,0,0,0.3));
    transform: translateY(-1px);
}
.transclip-control:active { transform: translateY(0); }
";

impl Default for CopierConfig {
    fn default() -> Self {
        Self {
            selectors: SiteSelectors::default(),
            timeouts: StepTimeouts::default(),
            watch_route: "/watch".to_string(),
            control_id: "transclip-control".to_string(),
            control_class: "transclip-control".to_string(),
            style_id: "transclip-control-styles".to_string(),
            control_css: DEFAULT_CONTROL_CSS.to_string(),
            reset_delay: Duration::from_secs(3),
        }
    }
}

impl CopierConfig {
    /// Whether `address` is a page the control belongs on.
    pub fn is_watch_route(&self, address: &str) -> bool {
        address.contains(&self.watch_route)
    }
}
