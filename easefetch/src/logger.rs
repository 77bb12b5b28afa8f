use tracing::{debug, error, info};

/// Sink for diagnostics. The fetch pipeline only ever calls [`Logger::error`],
/// once per rejected cycle, with the rejection reason.
pub trait Logger: Send + Sync {
    fn error(&self, message: &str);
    fn info(&self, message: &str);
    fn log(&self, message: &str);
}

/// Forwards to `tracing`; `log` maps to the debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &str) {
        error!(target: "easefetch", "{message}");
    }

    fn info(&self, message: &str) {
        info!(target: "easefetch", "{message}");
    }

    fn log(&self, message: &str) {
        debug!(target: "easefetch", "{message}");
    }
}
