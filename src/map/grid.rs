//! Rectangular character grid holding an ASCII map template

use std::fmt;

use unicode_width::UnicodeWidthChar;

use crate::errors::{MapIpError, Result};

/// A rectangular grid of map characters, addressed as `(row, column)`.
///
/// Every row has exactly `width` cells and every cell is one terminal column
/// wide, so a row's char count equals its display width. Lines shorter than
/// the widest line are padded with spaces when the grid is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapGrid {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl MapGrid {
    /// Parse a grid from text, one row per line.
    ///
    /// Trailing `\r` is dropped. Only the final line terminator is ignored:
    /// rows made of spaces are ocean and count towards the height. The width
    /// is taken from the longest line.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();

        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        if lines.is_empty() || width == 0 {
            return Err(MapIpError::map_asset("map template is empty"));
        }

        for (row, line) in lines.iter().enumerate() {
            check_cell_widths(row, line)?;
        }

        let rows = lines.iter().map(|line| fit_line(line, width)).collect();
        Ok(Self { rows, width })
    }

    /// Build a grid from explicit rows, padding or truncating each to `width`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], width: usize) -> Result<Self> {
        if rows.is_empty() || width == 0 {
            return Err(MapIpError::map_asset("map template is empty"));
        }
        for (row, line) in rows.iter().enumerate() {
            check_cell_widths(row, line.as_ref())?;
        }
        let rows = rows.iter().map(|row| fit_line(row.as_ref(), width)).collect();
        Ok(Self { rows, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Overwrite one cell. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, column: usize, glyph: char) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = glyph;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Count how many cells hold `glyph`.
    pub fn count(&self, glyph: char) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.iter())
            .filter(|&&c| c == glyph)
            .count()
    }
}

impl fmt::Display for MapGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for c in row {
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Wide (CJK, emoji) or zero-width glyphs would shift the rest of the row
fn check_cell_widths(row: usize, line: &str) -> Result<()> {
    match line
        .chars()
        .enumerate()
        .find(|(_, ch)| ch.width() != Some(1))
    {
        Some((column, ch)) => Err(MapIpError::map_asset(format!(
            "map row {} column {}: {:?} does not occupy exactly one terminal column",
            row + 1,
            column + 1,
            ch
        ))),
        None => Ok(()),
    }
}

/// Pad with spaces or truncate a line to exactly `width` characters.
fn fit_line(line: &str, width: usize) -> Vec<char> {
    let mut cells: Vec<char> = line.chars().take(width).collect();
    cells.resize(width, ' ');
    cells
}
