//! Helpers shared by the unit tests.

use std::{collections::VecDeque, sync::Arc, time::Duration};

use crate::{
    buffer::Buffer,
    config::{Style, StyleConfig},
    fmt::Cell,
    key::Key,
    surface::{Host, RequestQueue},
    widgets::Widget,
    Result,
};

/// A config with the default style, plus the queue its widgets send requests to.
pub fn surface_config() -> (Arc<RequestQueue>, Arc<StyleConfig>) {
    let q = Arc::new(RequestQueue::new());
    let cfg = Arc::new(StyleConfig::new(q.clone(), Style::default()));
    (q, cfg)
}

pub fn config() -> Arc<StyleConfig> {
    surface_config().1
}

pub fn config_with(style: Style) -> Arc<StyleConfig> {
    Arc::new(StyleConfig::new(Arc::new(RequestQueue::new()), style))
}

/// A default style that draws dialog borders.
pub fn bordered() -> Style {
    Style {
        borderless_dialog: false,
        ..Style::default()
    }
}

/// A buffer with every cell set to `ch`, to see what a widget leaves alone.
pub fn filled(height: usize, width: usize, ch: char) -> Buffer {
    let mut b = Buffer::new(height, width);
    for row in 0..height {
        b[row].fill(Cell::of(ch));
    }
    b
}

/// How many cells in `row` hold `ch`.
pub fn count(buffer: &Buffer, row: usize, ch: char) -> usize {
    buffer[row].iter().filter(|c| c.ch == ch).count()
}

/// A [`Host`] which plays back a fixed script of polls and renders every update into its own buffer.
///
/// A `None` in the script is a poll that timed out. Running off the end of the script is an error, so a dialog that
/// doesn't stop when it should fails its test instead of hanging.
pub struct ScriptedHost {
    keys: VecDeque<Option<Key>>,
    pub buffer: Buffer,
    pub polls: usize,
    pub updates: usize,
    /// Buffer contents as of each update
    pub frames: Vec<Vec<String>>,
}

impl ScriptedHost {
    pub fn new(height: usize, width: usize, keys: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            buffer: Buffer::new(height, width),
            polls: 0,
            updates: 0,
            frames: vec![],
        }
    }

    /// A script with no timeouts in it.
    pub fn typing(height: usize, width: usize, keys: impl IntoIterator<Item = Key>) -> Self {
        Self::new(height, width, keys.into_iter().map(Some))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Host for ScriptedHost {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>> {
        assert_eq!(timeout, Duration::from_millis(100));
        self.polls += 1;
        self.keys.pop_front().ok_or_else(|| "key script ran out".into())
    }

    fn update(&mut self, widget: &mut dyn Widget) -> Result<()> {
        self.buffer.clear();
        widget.render(&mut self.buffer, 0, 0);
        self.updates += 1;
        self.frames
            .push((0..self.buffer.height()).map(|r| self.buffer.row_text(r)).collect());
        Ok(())
    }
}

/// Type `s` one character at a time.
pub fn chars(s: &str) -> impl Iterator<Item = Key> + '_ {
    s.chars().map(Key::Char)
}
