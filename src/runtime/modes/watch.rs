//! Watch mode
//!
//! Checks the external IP every interval and redraws only when it changed.
//! The first cycle must succeed; later failures keep the last frame on screen.

use std::io::Write;
use std::time::Duration;

use tracing::{info, warn};

use crate::errors::Result;
use crate::runtime::pipeline::{Pipeline, Snapshot};
use crate::system::terminal::write_frame;

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Redrawn(Snapshot),
    Unchanged,
    /// A later tick failed; the previous frame is still shown
    Skipped,
}

pub struct Watcher<'a> {
    pipeline: &'a Pipeline,
    current: Option<Snapshot>,
    /// 仅当 stdout 是终端时清屏
    clear_screen: bool,
}

impl<'a> Watcher<'a> {
    pub fn new(pipeline: &'a Pipeline, clear_screen: bool) -> Self {
        Self {
            pipeline,
            current: None,
            clear_screen,
        }
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn tick<W: Write>(&mut self, out: &mut W) -> Result<TickOutcome> {
        let Some(previous) = self.current.as_ref() else {
            let snapshot = self.pipeline.locate()?;
            return self.draw(out, snapshot);
        };

        let ip = match self.pipeline.fetch_ip() {
            Ok(ip) => ip,
            Err(e) => {
                warn!("IP check failed, keeping previous location: {}", e);
                return Ok(TickOutcome::Skipped);
            }
        };
        if ip == previous.ip {
            return Ok(TickOutcome::Unchanged);
        }

        info!("External IP changed: {} -> {}", previous.ip, ip);
        match self.pipeline.locate_ip(ip) {
            Ok(snapshot) => self.draw(out, snapshot),
            Err(e) => {
                warn!("Lookup for new IP failed, keeping previous location: {}", e);
                Ok(TickOutcome::Skipped)
            }
        }
    }

    fn draw<W: Write>(&mut self, out: &mut W, snapshot: Snapshot) -> Result<TickOutcome> {
        let frame = self.pipeline.render(&snapshot);
        write_frame(out, &frame, self.clear_screen)?;
        self.current = Some(snapshot.clone());
        Ok(TickOutcome::Redrawn(snapshot))
    }
}

/// Poll forever. Returns only on the first-cycle failure or an output error.
pub fn run_watch<W: Write>(
    pipeline: &Pipeline,
    out: &mut W,
    interval: Duration,
    clear_screen: bool,
) -> Result<()> {
    let mut watcher = Watcher::new(pipeline, clear_screen);
    loop {
        watcher.tick(out)?;
        std::thread::sleep(interval);
    }
}
