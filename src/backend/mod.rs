//! Hosts which put dialogs on a real display.

#[cfg(feature = "cli_crossterm")]
pub mod crossterm;
