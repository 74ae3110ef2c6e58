//! Application runtime
//!
//! This module wires configuration into the pipeline and runs the selected
//! mode against stdout.

pub mod modes;
pub mod pipeline;

pub use modes::{Mode, detect_mode};
pub use pipeline::{Pipeline, Snapshot};

use std::io::IsTerminal;

use tracing::debug;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::render::resolve_color;

/// Run the configured mode until it finishes (once) or fails (watch)
pub fn run(config: &AppConfig) -> Result<()> {
    let styled = resolve_color(config.display.color);
    let pipeline = Pipeline::from_config(config, styled)?;

    let stdout = std::io::stdout();
    let clear_screen = stdout.is_terminal();
    let mut out = stdout.lock();

    let mode = detect_mode(config);
    debug!("Running in {:?} mode", mode);
    match mode {
        Mode::Once => modes::run_once(&pipeline, &mut out).map(|_| ()),
        Mode::Watch => modes::run_watch(
            &pipeline,
            &mut out,
            config.watch.interval(),
            clear_screen,
        ),
    }
}
