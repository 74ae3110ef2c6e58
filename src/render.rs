//! Map rendering
//!
//! `render` is the plain text form: a copy of the template with the marker
//! placed, one line per row. `Renderer` builds the full frame shown in the
//! terminal, including the header line and optional ANSI colours.

use std::fmt::Write as _;
use std::io::IsTerminal;

use colored::Colorize;

use crate::config::{ColorMode, DisplayConfig};
use crate::map::{MapGrid, MarkerCell};
use crate::services::GeoLocation;

const OCEAN_GLYPH: char = '.';

/// Place `glyph` at `cell` on a copy of `grid` and join the rows.
///
/// The template is left untouched. The result ends with a newline.
pub fn render(grid: &MapGrid, cell: MarkerCell, glyph: char) -> String {
    let mut frame = grid.clone();
    frame.set(cell.row, cell.column, glyph);
    frame.to_string()
}

/// Decide whether ANSI styling should be emitted for `mode`
pub fn resolve_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => {
            colored::control::set_override(true);
            true
        }
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Marker,
    Land,
    Ocean,
}

/// Builds terminal frames from a located IP
#[derive(Debug, Clone)]
pub struct Renderer {
    marker: char,
    mark_ocean: bool,
    show_header: bool,
    styled: bool,
    /// Shown in the header in watch mode
    interval_secs: Option<u64>,
}

impl Renderer {
    pub fn new(display: &DisplayConfig, styled: bool) -> Self {
        Self {
            marker: display.marker,
            mark_ocean: display.mark_ocean,
            show_header: display.show_header,
            styled,
            interval_secs: None,
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = Some(interval_secs);
        self
    }

    /// Header line plus map, ready to be written in one go
    pub fn frame(
        &self,
        grid: &MapGrid,
        cell: MarkerCell,
        ip: &str,
        location: &GeoLocation,
    ) -> String {
        let mut out = String::with_capacity((grid.width() + 1) * (grid.height() + 2));
        if self.show_header {
            out.push_str(&self.header(ip, location));
            out.push('\n');
        }
        out.push_str(&self.map(grid, cell));
        out
    }

    pub fn header(&self, ip: &str, location: &GeoLocation) -> String {
        let place = location.place_label();
        let mut line = if self.styled {
            format!(
                "{} {} -- {} {}",
                "External IP:".bold().cyan(),
                ip.yellow(),
                "Location:".bold().cyan(),
                place.yellow()
            )
        } else {
            format!("External IP: {} -- Location: {}", ip, place)
        };

        if let Some(secs) = self.interval_secs {
            let note = format!("(Updates every {} seconds)", secs);
            if self.styled {
                let _ = write!(line, " -- {}", note.dimmed());
            } else {
                let _ = write!(line, " -- {}", note);
            }
        }
        line
    }

    /// The map with the marker placed, styled when enabled
    pub fn map(&self, grid: &MapGrid, cell: MarkerCell) -> String {
        if !self.styled && !self.mark_ocean {
            return render(grid, cell, self.marker);
        }

        let mut out = String::new();
        for (r, row) in grid.rows().enumerate() {
            let mut run = String::new();
            let mut run_kind = None;

            for (c, &ch) in row.iter().enumerate() {
                let (kind, glyph) = if r == cell.row && c == cell.column {
                    (CellKind::Marker, self.marker)
                } else if ch == ' ' {
                    let glyph = if self.mark_ocean { OCEAN_GLYPH } else { ' ' };
                    (CellKind::Ocean, glyph)
                } else {
                    (CellKind::Land, ch)
                };

                if run_kind.is_some_and(|k| k != kind) {
                    self.flush_run(&mut out, &mut run, run_kind);
                }
                run_kind = Some(kind);
                run.push(glyph);
            }
            self.flush_run(&mut out, &mut run, run_kind);
            out.push('\n');
        }
        out
    }

    fn flush_run(&self, out: &mut String, run: &mut String, kind: Option<CellKind>) {
        if run.is_empty() {
            return;
        }
        match (self.styled, kind) {
            (true, Some(CellKind::Marker)) => {
                let _ = write!(out, "{}", run.as_str().red().bold());
            }
            (true, Some(CellKind::Land)) => {
                let _ = write!(out, "{}", run.as_str().green());
            }
            (true, Some(CellKind::Ocean)) if self.mark_ocean => {
                let _ = write!(out, "{}", run.as_str().dimmed());
            }
            _ => out.push_str(run),
        }
        run.clear();
    }
}
