//! Mode routing
//!
//! - Once: resolve, draw, exit (default)
//! - Watch: redraw whenever the external IP changes

pub mod once;
pub mod watch;

pub use once::run_once;
pub use watch::{TickOutcome, Watcher, run_watch};

use crate::config::AppConfig;

/// Execution mode
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Once,
    Watch,
}

pub fn detect_mode(config: &AppConfig) -> Mode {
    if config.watch.enabled {
        Mode::Watch
    } else {
        Mode::Once
    }
}
