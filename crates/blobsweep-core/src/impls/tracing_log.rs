//! TracingActivityLog - ActivityLog を tracing に流す

use std::error::Error;

use tracing::{error, info};

use crate::ports::ActivityLog;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingActivityLog;

impl ActivityLog for TracingActivityLog {
    fn info(&self, source: &str, message: &str) {
        info!(source = %source, "{message}");
    }

    fn error(&self, source: &str, container: &str, message: &str, err: &(dyn Error + 'static)) {
        error!(source = %source, container = %container, error = %err, "{message}");
    }
}
