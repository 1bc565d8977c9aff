//! The cell grid widgets render into.

use core::{iter::FusedIterator, ops::{self, Range}};

use crate::fmt::{Cell, Text};

/// An iterator over the rows of cells in a [`Buffer`].
pub struct BufferRows<'b> {
    buffer: &'b Buffer,
    rem: Range<usize>,
}

impl<'b> Iterator for BufferRows<'b> {
    type Item = &'b [Cell];
    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rem.next()?;
        Some(&self.buffer[row])
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rem.size_hint()
    }
}

impl<'b> DoubleEndedIterator for BufferRows<'b> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let row = self.rem.next_back()?;
        Some(&self.buffer[row])
    }
}

impl<'b> ExactSizeIterator for BufferRows<'b> {}
impl<'b> FusedIterator for BufferRows<'b> {}

/// A text framebuffer, addressed as `buffer[row][column]`, both 0-based.
///
/// The buffer belongs to whatever is driving the display. Widgets only ever write into it, at the position they're
/// told to render at, and never resize it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
    height: usize,
    width: usize,
}

impl Buffer {
    /// Create a new `Buffer`, `height` rows of `width` blank cells.
    pub fn new(height: usize, width: usize) -> Self {
        let mut res = Self {
            cells: vec![],
            height: 0,
            width: 0,
        };
        res.resize(height, width);
        res
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// All of the cells, row after row.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> BufferRows {
        BufferRows {
            buffer: self,
            rem: 0..self.height,
        }
    }

    /// Reset every cell to [`Cell::BLANK`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    /// Resize the buffer, clearing its contents at the same time. Does not reallocate unless the buffer is growing.
    pub fn resize(&mut self, height: usize, width: usize) {
        self.cells.truncate(0);
        self.cells.resize(height * width, Cell::BLANK);
        self.height = height;
        self.width = width;
    }

    /// Write a run of formatted text, starting at `(row, column)`.
    ///
    /// This **does not** handle newlines or wrapping. The run must fit in the row.
    pub fn write(&mut self, row: usize, column: usize, text: &Text) {
        debug_assert!(
            column + text.len() <= self.width,
            "text run {:?} at column {} overflows a {}-wide buffer",
            text.text,
            column,
            self.width,
        );
        for (i, cell) in text.cells().enumerate() {
            self[row][column + i] = cell;
        }
    }

    /// The characters of one row, without formatting. Mostly useful for tests and debugging.
    pub fn row_text(&self, row: usize) -> String {
        self[row].iter().map(|c| c.ch).collect()
    }
}

impl ops::Index<usize> for Buffer {
    type Output = [Cell];
    fn index(&self, row: usize) -> &Self::Output {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }
}

impl ops::IndexMut<usize> for Buffer {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        let start = row * self.width;
        &mut self.cells[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fmt::{Formatted, Color}, text1};

    #[test]
    fn new_buffer_is_blank() {
        let b = Buffer::new(3, 4);
        assert_eq!((b.height(), b.width()), (3, 4));
        assert!(b.cells().iter().all(|c| c == &Cell::BLANK));
        assert_eq!(b.rows().len(), 3);
    }

    #[test]
    fn write_places_formatted_cells() {
        let mut b = Buffer::new(2, 6);
        b.write(1, 2, &text1!(red "abc"));
        assert_eq!(b.row_text(0), "      ");
        assert_eq!(b.row_text(1), "  abc ");
        assert_eq!(b[1][3].get_fmt().fg, Color::Red);
        assert_eq!(b[1][5], Cell::BLANK);
    }

    #[test]
    fn rows_iterate_both_ways() {
        let mut b = Buffer::new(3, 1);
        b[0][0] = Cell::of('a');
        b[2][0] = Cell::of('c');
        let fwd: String = b.rows().map(|r| r[0].ch).collect();
        let back: String = b.rows().rev().map(|r| r[0].ch).collect();
        assert_eq!(fwd, "a c");
        assert_eq!(back, "c a");
    }

    #[test]
    fn clear_keeps_size() {
        let mut b = Buffer::new(2, 2);
        b[1][1] = Cell::of('x');
        b.clear();
        assert_eq!(b.width(), 2);
        assert!(b.cells().iter().all(|c| c == &Cell::BLANK));
    }
}
