//! Unit and scenario tests against an instrumented in-memory page host.

use std::time::Duration;

use crate::config::{CopierConfig, SiteSelectors, StepTimeouts};

mod status_tests;

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Config with short selectors and wait budgets sized for tests.
pub fn test_config() -> CopierConfig {
    CopierConfig {
        selectors: SiteSelectors {
            description_expander: "#expand".to_string(),
            transcript_trigger: "#show-transcript".to_string(),
            description_collapser: "#collapse".to_string(),
            segment_container: "#segments".to_string(),
            segment: "segment".to_string(),
            segment_timestamp: ".timestamp".to_string(),
            segment_text: ".text".to_string(),
            comments_landmark: "#comments".to_string(),
        },
        timeouts: StepTimeouts {
            default: ms(100),
            trigger: ms(60),
            collapse: ms(20),
        },
        reset_delay: ms(40),
        ..CopierConfig::default()
    }
}
