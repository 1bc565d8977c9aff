//! The non-interactive widgets, and the [`Widget`] trait every widget and dialog implements.

use crate::buffer::Buffer;

mod border_box;
pub use border_box::BorderBox;
mod progress;
pub use progress::{fill_length, Marker, ProgressBar, VerticalProgressBar};

/// Something which can draw itself into a [`Buffer`].
///
/// Widgets are retained: they're built once, keep a cache of everything they'll draw, and can be rendered any number
/// of times. Rendering only writes, and only inside the area [`Self::size`] reports, starting at `(row, column)`.
///
/// # Preconditions
///
/// The whole area must fit in the buffer: `row + height <= buffer.height()` and `column + width <= buffer.width()`.
/// Debug builds assert it; release builds don't check or clip, and a widget hanging off the buffer's edge panics.
#[enum_dispatch::enum_dispatch]
pub trait Widget {
    /// How much space [`Self::render`] covers, as `(height, width)`.
    fn size(&self) -> (usize, usize);

    /// Draw into `buffer`, with the widget's top left corner at `(row, column)`.
    fn render(&mut self, buffer: &mut Buffer, row: usize, column: usize);
}

/// Debug-only check of the render precondition.
pub(crate) fn debug_check_fits(buffer: &Buffer, row: usize, column: usize, size: (usize, usize)) {
    debug_assert!(
        row + size.0 <= buffer.height() && column + size.1 <= buffer.width(),
        "{}x{} widget at ({}, {}) doesn't fit in a {}x{} buffer",
        size.0,
        size.1,
        row,
        column,
        buffer.height(),
        buffer.width(),
    );
}
