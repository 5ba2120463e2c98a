use std::time::Duration;

/// Errors produced while driving the host page.
///
/// Hard-dependency waits and empty extractions surface on the control as
/// "not found"; clipboard rejection is the one failure that happens after a
/// successful extraction and gets its own label.
#[derive(Debug, thiserror::Error)]
pub enum CopierError {
    #[error("timed out after {elapsed:?} waiting for `{selector}`")]
    ElementTimeout { selector: String, elapsed: Duration },

    #[error("transcript container present but no usable segments")]
    EmptyExtraction,

    #[error("clipboard write rejected: {0}")]
    ClipboardRejected(String),

    #[error("could not insert control: {0}")]
    ControlInsertion(String),
}
