use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::CopierConfig;
use crate::control::ControlState;
use crate::errors::CopierError;
use crate::operation::CopyOperation;
use crate::page::{Clipboard, ControlSpec, PageDom};
use crate::watcher::ElementWatcher;

/// How route changes are detected.
pub enum NavigationWatch {
    /// The host fires an event per completed client-side navigation,
    /// carrying the new address. Preferred when available.
    Dedicated(mpsc::UnboundedReceiver<String>),
    /// Fallback: observe the whole page and compare the address on every
    /// mutation batch.
    MutationScan,
}

/// One lifetime of the injected control, from creation to the next
/// navigation teardown.
struct Epoch {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns the injected control across client-side navigations.
///
/// Inactive (no epoch) or Active (one epoch); `start` collapses first load
/// and re-navigation into the same teardown-then-rebuild path, so exactly
/// one live control exists for the current route.
pub struct PageLifecycleController {
    dom: Arc<dyn PageDom>,
    clipboard: Arc<dyn Clipboard>,
    config: Arc<CopierConfig>,
    route: String,
    epoch: Option<Epoch>,
}

impl PageLifecycleController {
    pub fn new(
        dom: Arc<dyn PageDom>,
        clipboard: Arc<dyn Clipboard>,
        config: CopierConfig,
    ) -> Self {
        let route = dom.current_address();
        Self {
            dom,
            clipboard,
            config: Arc::new(config),
            route,
            epoch: None,
        }
    }

    /// Tear down whatever epoch is live and, when the current route is a
    /// watch page, bring up a fresh control. Safe to call with no prior
    /// state and safe to call repeatedly.
    pub fn start(&mut self) {
        self.teardown();

        let address = self.dom.current_address();
        if !self.config.is_watch_route(&address) {
            debug!(%address, "not a watch page, staying inactive");
            return;
        }

        self.inject_styles_once();

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_epoch(
            self.dom.clone(),
            self.clipboard.clone(),
            self.config.clone(),
            cancel.clone(),
        ));
        self.epoch = Some(Epoch { cancel, task });
        info!(%address, "lifecycle epoch started");
    }

    /// Install the control and keep it alive across navigations until the
    /// navigation stream ends.
    pub async fn run(mut self, navigation: NavigationWatch) {
        self.start();

        match navigation {
            NavigationWatch::Dedicated(mut addresses) => {
                while let Some(address) = addresses.recv().await {
                    self.on_address(address);
                }
            }
            NavigationWatch::MutationScan => {
                let mut batches = self.dom.observe(None);
                while batches.recv().await.is_some() {
                    let address = self.dom.current_address();
                    self.on_address(address);
                }
            }
        }
    }

    fn on_address(&mut self, address: String) {
        if address == self.route {
            return;
        }
        debug!(from = %self.route, to = %address, "navigation detected");
        self.route = address;
        self.start();
    }

    /// Release the previous epoch: cancel its task and sweep its control by
    /// identity. An in-flight copy operation is left to settle on its own;
    /// its late status writes hit a detached control and vanish.
    fn teardown(&mut self) {
        if let Some(epoch) = self.epoch.take() {
            epoch.cancel.cancel();
            epoch.task.abort();
        }
        if let Some(stale) = self.dom.element_by_id(&self.config.control_id) {
            self.dom.remove(&stale);
        }
    }

    fn inject_styles_once(&self) {
        if self.dom.element_by_id(&self.config.style_id).is_none() {
            self.dom
                .append_style(&self.config.style_id, &self.config.control_css);
        }
    }
}

async fn run_epoch(
    dom: Arc<dyn PageDom>,
    clipboard: Arc<dyn Clipboard>,
    config: Arc<CopierConfig>,
    cancel: CancellationToken,
) {
    tokio::select! {
        _ = cancel.cancelled() => debug!("epoch cancelled"),
        _ = epoch_body(dom, clipboard, config, cancel.clone()) => {}
    }
}

/// Wait for the landmark, insert the control, then pump user gestures into
/// copy operations until the control goes away.
async fn epoch_body(
    dom: Arc<dyn PageDom>,
    clipboard: Arc<dyn Clipboard>,
    config: Arc<CopierConfig>,
    cancel: CancellationToken,
) {
    let watcher = ElementWatcher::new(dom.clone()).with_default_timeout(config.timeouts.default);

    let landmark = match watcher
        .wait(&config.selectors.comments_landmark, None, None)
        .await
    {
        Ok(el) => el,
        Err(err) => {
            // The page stays usable, just without the control.
            let err = CopierError::ControlInsertion(format!("landmark never appeared: {err}"));
            error!(error = %err, "control not inserted");
            return;
        }
    };

    // Abort only lands at await points; a teardown that raced the landmark
    // wait must not get a control inserted after its sweep.
    if cancel.is_cancelled() {
        return;
    }

    let spec = ControlSpec {
        id: config.control_id.clone(),
        class: config.control_class.clone(),
        label: ControlState::Idle.label().to_string(),
        color: ControlState::Idle.color().to_string(),
    };
    let control = dom.insert_control_before(&landmark, &spec);
    let mut activations = dom.activations(&control);

    let operation = Arc::new(CopyOperation::new(dom, clipboard, config, control));
    while activations.recv().await.is_some() {
        let operation = operation.clone();
        // Detached, so a mid-copy teardown never kills a running operation.
        tokio::spawn(async move { operation.activate().await });
    }
    debug!("activation stream closed");
}
