//! Styles for the markz CLI.
//!
//! Code asks for styles by semantic name (what the text *is*), never by color,
//! so the palette can change in one place. `console` drops the escape codes
//! on its own when output is not a terminal.

use console::Style;

/// Style identifiers used by the renderer.
pub mod names {
    pub const FILE: &str = "file";
    pub const FILE_OUTSIDE: &str = "file-outside";
    pub const LINE_NUMBER: &str = "line-number";
    pub const LABEL: &str = "label";
    pub const MUTED: &str = "muted";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

pub fn style(name: &str) -> Style {
    match name {
        names::FILE => Style::new().bold(),
        names::FILE_OUTSIDE => Style::new().bold().yellow(),
        names::LINE_NUMBER => Style::new().yellow(),
        names::LABEL => Style::new(),
        names::MUTED | names::INFO => Style::new().dim(),
        names::ERROR => Style::new().red().bold(),
        names::WARNING => Style::new().yellow().bold(),
        names::SUCCESS => Style::new().green(),
        _ => Style::new(),
    }
}
