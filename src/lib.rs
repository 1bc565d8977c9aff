//! Retained-mode widgets for character-cell displays: bordered boxes, progress bars, and dialogs that take keyboard
//! input.
//!
//! There are three central parts to familiarize yourself with.
//!
//! The first is [`Buffer`], a grid of formatted characters (see [`fmt`]) owned by whatever drives the display.
//! [`Widget`]s draw themselves into it at a position you choose, and nothing else.
//!
//! The second is [`StyleConfig`]. Every widget is built with an `Arc` of one, which decides its glyphs and colors and
//! carries the [`Surface`] the widget sends [`Request`]s to, e.g. "redraw me" after a progress bar moves. Widgets
//! precompute what they draw from it, so rendering is just copying cells.
//!
//! The third is [`Host`], the context an interactive dialog is [shown](dialogs::Interactive::show) in. It supplies
//! keys and redraws on demand. The `cli_crossterm` feature provides one for real terminals in [`backend`]; in tests,
//! anything that plays back a list of keys will do.
//!
//! # Features
//!
//! - `cli_crossterm`: the [`backend::crossterm`] host, and the `cellframe-demo` binary.

mod error;
mod util;

mod buffer;
pub mod config;
pub mod fmt;
mod key;
mod surface;
// before `dialogs`, whose enum dispatches to `Widget`
pub mod widgets;
pub mod dialogs;
pub mod backend;

#[cfg(test)]
mod testing;

pub use crate::{
    buffer::{Buffer, BufferRows},
    config::{Style, StyleConfig},
    dialogs::{Dialog, Dialogs, Interactive},
    error::{Error, Result},
    key::{Filter, Key},
    surface::{Host, Request, RequestQueue, Surface},
    widgets::Widget,
};
