//! Terminal output

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};

/// Write a complete frame in one call, optionally clearing the screen first.
pub fn write_frame<W: Write>(out: &mut W, frame: &str, clear: bool) -> io::Result<()> {
    if clear {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    out.write_all(frame.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_frame_plain() {
        let mut buf = Vec::new();
        write_frame(&mut buf, "ab\ncd\n", false).unwrap();
        assert_eq!(buf, b"ab\ncd\n");
    }

    #[test]
    fn test_write_frame_clears_first() {
        let mut buf = Vec::new();
        write_frame(&mut buf, "map\n", true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("\x1b["));
        assert!(text.ends_with("map\n"));
    }
}
