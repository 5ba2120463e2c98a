use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, instrument, trace};

use crate::errors::CopierError;
use crate::page::{NodeHandle, PageDom};

/// Default timeout when a wait does not specify one.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves selectors against the live page, waiting for elements that do
/// not exist yet.
///
/// Waiting is driven by the host's mutation stream, not by polling: the
/// selector is re-checked once per mutation batch and the subscription is
/// dropped before the wait settles, whichever way it settles.
#[derive(Clone)]
pub struct ElementWatcher {
    dom: Arc<dyn PageDom>,
    default_timeout: Duration,
}

impl ElementWatcher {
    pub fn new(dom: Arc<dyn PageDom>) -> Self {
        Self {
            dom,
            default_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Set the timeout used by waits that do not pass their own.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Wait for the first element matching `selector` under `scope`.
    ///
    /// Resolves immediately, without installing any observation, when a
    /// match already exists. Otherwise the match and the timeout race;
    /// whichever settles first cancels the other, and the observation is
    /// gone either way. A vanished scope never resolves the wait by itself;
    /// absence is only ever reported through the timeout path.
    #[instrument(level = "debug", skip(self, scope, timeout))]
    pub async fn wait(
        &self,
        selector: &str,
        scope: Option<&NodeHandle>,
        timeout: Option<Duration>,
    ) -> Result<NodeHandle, CopierError> {
        if let Some(el) = self.dom.query(scope, selector) {
            trace!("already present, no observation installed");
            return Ok(el);
        }

        let wait_timeout = timeout.unwrap_or(self.default_timeout);
        let started = Instant::now();
        let mut batches = self.dom.observe(scope);

        let matched = tokio::time::timeout(wait_timeout, async {
            // The element may have appeared between the initial check and
            // the subscription above.
            if let Some(el) = self.dom.query(scope, selector) {
                return el;
            }
            loop {
                match batches.recv().await {
                    Some(_) => {
                        if let Some(el) = self.dom.query(scope, selector) {
                            return el;
                        }
                    }
                    // The observed scope vanished. Park until the timeout
                    // fires; absence must not look like a match.
                    None => std::future::pending::<()>().await,
                }
            }
        })
        .await;

        drop(batches);

        match matched {
            Ok(el) => {
                debug!(elapsed = ?started.elapsed(), "element appeared");
                Ok(el)
            }
            Err(_) => Err(CopierError::ElementTimeout {
                selector: selector.to_string(),
                elapsed: started.elapsed(),
            }),
        }
    }
}
