//! One-shot mode
//!
//! The frame is built completely before anything is written, so a failed
//! fetch or lookup leaves stdout empty.

use std::io::Write;

use crate::errors::Result;
use crate::runtime::pipeline::{Pipeline, Snapshot};
use crate::system::terminal::write_frame;

pub fn run_once<W: Write>(pipeline: &Pipeline, out: &mut W) -> Result<Snapshot> {
    let snapshot = pipeline.locate()?;
    let frame = pipeline.render(&snapshot);
    write_frame(out, &frame, false)?;
    Ok(snapshot)
}
