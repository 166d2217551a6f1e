use std::io::{self, Write};

use crate::window::Slot;

/// Text stand-in for the picture wall: prints the window every time it
/// changes, one reference per line, holes skipped.
#[derive(Debug, Default)]
pub struct WindowPrinter {
    last: Option<Vec<Slot>>,
}

impl WindowPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether anything was printed.
    pub fn update(&mut self, out: &mut impl Write, window: Vec<Slot>) -> io::Result<bool> {
        if self.last.as_ref() == Some(&window) {
            return Ok(false);
        }

        writeln!(out, "--- slideshow ({} on screen) ---", window.iter().flatten().count())?;
        for (position, reference) in window.iter().flatten().enumerate() {
            writeln!(out, "{:>2}. {}", position + 1, reference)?;
        }
        out.flush()?;

        self.last = Some(window);
        Ok(true)
    }
}
