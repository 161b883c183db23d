//! Chart display
//!
//! Rendered charts are handed to the platform's default image viewer. The
//! viewer process is detached, so the menu never waits on it.

use std::path::Path;

pub trait ChartViewer {
    /// Show a rendered chart. Failures are logged, never raised.
    fn show(&self, path: &Path);
}

/// Opens charts with the system's default application
pub struct SystemViewer;

impl ChartViewer for SystemViewer {
    fn show(&self, path: &Path) {
        log::debug!("Opening chart viewer for {:?}", path);
        if let Err(e) = open::that_detached(path) {
            log::warn!("Could not open chart viewer for {:?}: {}", path, e);
        }
    }
}

/// Display disabled (`--no-display`, headless sessions, tests)
pub struct NoViewer;

impl ChartViewer for NoViewer {
    fn show(&self, path: &Path) {
        log::trace!("Display disabled, not opening {:?}", path);
    }
}
