//! Terminal rendering of markdown output
//!
//! Headers are printed in color with their hash marks kept, other lines go
//! through termimad's inline styling. Plain mode prints the markdown as is.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{
    crossterm::style::{Color, Stylize},
    MadSkin,
};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.write_to(&mut stdout, markdown)?;
        stdout.flush()?;
        Ok(())
    }

    fn write_to<W: Write>(&self, out: &mut W, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            write!(out, "{markdown}")?;
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                writeln!(out, "{}", line.with(Color::Cyan).bold())?;
            } else {
                writeln!(out, "{}", self.skin.inline(line))?;
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
