//! Styles for the folio CLI.
//!
//! Renderers ask for styles by meaning (a title, a timestamp, a trashed entry)
//! rather than by color, so the palette can change in one place. `console`
//! drops the escape codes on its own when stdout is not a terminal.

use console::Style;
use folioapp::api::MessageLevel;

pub fn title() -> Style {
    Style::new().bold()
}

pub fn muted() -> Style {
    Style::new().color256(245)
}

pub fn faint() -> Style {
    Style::new().color256(240)
}

pub fn star() -> Style {
    Style::new().yellow().bold()
}

pub fn id() -> Style {
    Style::new().color256(136)
}

pub fn time() -> Style {
    muted().italic()
}

pub fn trashed() -> Style {
    Style::new().red()
}

/// Marks the open document in the tree.
pub fn active() -> Style {
    Style::new().black().on_yellow()
}

pub fn message(level: &MessageLevel) -> Style {
    match level {
        MessageLevel::Info => muted(),
        MessageLevel::Success => Style::new().green(),
        MessageLevel::Warning => Style::new().yellow().bold(),
        MessageLevel::Error => Style::new().red().bold(),
    }
}

