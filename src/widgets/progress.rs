use std::sync::Arc;

use crate::{
    buffer::Buffer,
    config::StyleConfig,
    fmt::{Cell, Format, FormattedExt},
    Error, Result,
};

use super::{debug_check_fits, Widget};

/// How many of `length` cells are filled for `value` out of `maximum`: `floor(value * length / maximum)`, clamped to
/// `0..=length`.
///
/// `value` itself is never clamped; anything past `maximum` just fills the whole bar. A `maximum` of zero or less has
/// no meaningful fill and is an [`Error::Domain`].
pub fn fill_length(value: i64, maximum: i64, length: usize) -> Result<usize> {
    if maximum <= 0 {
        return Err(Error::domain(format!(
            "progress maximum must be greater than 0, got {}",
            maximum
        )));
    }
    Ok(clamped_fill(value, maximum, length))
}

fn clamped_fill(value: i64, maximum: i64, length: usize) -> usize {
    // i128 so value * length can't overflow
    let fill = (i128::from(value) * length as i128).div_euclid(i128::from(maximum));
    fill.clamp(0, length as i128) as usize
}

/// The glyph a progress bar draws its filled or empty part with.
///
/// A bare `Glyph` is colored from the bar's config; a `Cell` keeps its own formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Marker {
    Glyph(char),
    Cell(Cell),
}

impl Marker {
    fn resolve(&self, fmt: Format) -> Cell {
        match self {
            Marker::Glyph(ch) => Cell::of(*ch).fmt(fmt),
            Marker::Cell(c) => c.clone(),
        }
    }
}

impl From<char> for Marker {
    fn from(value: char) -> Self {
        Marker::Glyph(value)
    }
}

impl From<Cell> for Marker {
    fn from(value: Cell) -> Self {
        Marker::Cell(value)
    }
}

#[derive(Clone, Debug)]
struct BarCache {
    progress: Cell,
    empty: Cell,
}

/// The state both bar orientations share. `length` is the bar's width or height.
#[derive(Clone, Debug)]
struct Bar {
    value: i64,
    maximum: i64,
    length: usize,
    progress_marker: Marker,
    empty_marker: Marker,
    config: Arc<StyleConfig>,
    cache: BarCache,
}

impl Bar {
    fn new(
        value: i64,
        maximum: i64,
        length: usize,
        progress_marker: Marker,
        empty_marker: Marker,
        config: Arc<StyleConfig>,
    ) -> Result<Self> {
        fill_length(value, maximum, length)?;
        let cache = Self::build_cache(&progress_marker, &empty_marker, &config);
        Ok(Self {
            value,
            maximum,
            length,
            progress_marker,
            empty_marker,
            config,
            cache,
        })
    }

    fn build_cache(progress: &Marker, empty: &Marker, config: &StyleConfig) -> BarCache {
        let fmt = config.style().text_format();
        BarCache {
            progress: progress.resolve(fmt),
            empty: empty.resolve(fmt),
        }
    }

    /// Rebuild the cached cells and ask the surface for a redraw.
    fn changed(&mut self) {
        tracing::trace!(value = self.value, maximum = self.maximum, "rebuilding progress cache");
        self.cache = Self::build_cache(&self.progress_marker, &self.empty_marker, &self.config);
        self.config.surface().request_redraw();
    }

    fn fill(&self) -> usize {
        clamped_fill(self.value, self.maximum, self.length)
    }

    fn set_maximum(&mut self, maximum: i64) -> Result<()> {
        fill_length(self.value, maximum, self.length)?;
        self.maximum = maximum;
        self.changed();
        Ok(())
    }
}

macro_rules! bar_accessors {
    ( $length:ident, $set_length:ident ) => {
        pub fn value(&self) -> i64 {
            self.0.value
        }

        /// Set the progress. Values outside `0..=maximum` are kept as-is; they only clamp the drawn fill.
        pub fn set_value(&mut self, value: i64) {
            self.0.value = value;
            self.0.changed();
        }

        pub fn maximum(&self) -> i64 {
            self.0.maximum
        }

        /// Set the maximum, which must be greater than 0.
        pub fn set_maximum(&mut self, maximum: i64) -> Result<()> {
            self.0.set_maximum(maximum)
        }

        pub fn $length(&self) -> usize {
            self.0.length
        }

        pub fn $set_length(&mut self, length: usize) {
            self.0.length = length;
            self.0.changed();
        }

        pub fn progress_marker(&self) -> &Marker {
            &self.0.progress_marker
        }

        pub fn set_progress_marker(&mut self, marker: impl Into<Marker>) {
            self.0.progress_marker = marker.into();
            self.0.changed();
        }

        pub fn empty_marker(&self) -> &Marker {
            &self.0.empty_marker
        }

        pub fn set_empty_marker(&mut self, marker: impl Into<Marker>) {
            self.0.empty_marker = marker.into();
            self.0.changed();
        }

        pub fn config(&self) -> &Arc<StyleConfig> {
            &self.0.config
        }

        pub fn set_config(&mut self, config: Arc<StyleConfig>) {
            self.0.config = config;
            self.0.changed();
        }

        /// How many cells are currently drawn with the progress marker.
        pub fn fill(&self) -> usize {
            self.0.fill()
        }
    };
}

/// A horizontal progress bar, one row tall.
///
/// Every mutator asks the config's surface to redraw, so a loop that just sets the value keeps the display current.
#[derive(Clone, Debug)]
pub struct ProgressBar(Bar);

impl ProgressBar {
    /// The default filled-cell glyph, a black rectangle.
    pub const DEFAULT_PROGRESS_MARKER: char = '\u{25ac}';

    /// A bar going from `value` out of `maximum`, `width` cells wide, with the default markers.
    pub fn new(value: i64, maximum: i64, width: usize, config: Arc<StyleConfig>) -> Result<Self> {
        Self::with_markers(
            value,
            maximum,
            width,
            Self::DEFAULT_PROGRESS_MARKER,
            ' ',
            config,
        )
    }

    pub fn with_markers(
        value: i64,
        maximum: i64,
        width: usize,
        progress_marker: impl Into<Marker>,
        empty_marker: impl Into<Marker>,
        config: Arc<StyleConfig>,
    ) -> Result<Self> {
        Bar::new(
            value,
            maximum,
            width,
            progress_marker.into(),
            empty_marker.into(),
            config,
        )
        .map(Self)
    }

    bar_accessors!(width, set_width);
}

impl Widget for ProgressBar {
    fn size(&self) -> (usize, usize) {
        (1, self.0.length)
    }

    fn render(&mut self, buffer: &mut Buffer, row: usize, column: usize) {
        debug_check_fits(buffer, row, column, self.size());
        let fill = self.0.fill();
        let line = &mut buffer[row];
        line[column..column + fill].fill(self.0.cache.progress.clone());
        line[column + fill..column + self.0.length].fill(self.0.cache.empty.clone());
    }
}

/// A vertical progress bar, one column wide, filling from the bottom up.
#[derive(Clone, Debug)]
pub struct VerticalProgressBar(Bar);

impl VerticalProgressBar {
    pub fn new(value: i64, maximum: i64, height: usize, config: Arc<StyleConfig>) -> Result<Self> {
        Self::with_markers(value, maximum, height, '#', ' ', config)
    }

    pub fn with_markers(
        value: i64,
        maximum: i64,
        height: usize,
        progress_marker: impl Into<Marker>,
        empty_marker: impl Into<Marker>,
        config: Arc<StyleConfig>,
    ) -> Result<Self> {
        Bar::new(
            value,
            maximum,
            height,
            progress_marker.into(),
            empty_marker.into(),
            config,
        )
        .map(Self)
    }

    bar_accessors!(height, set_height);
}

impl Widget for VerticalProgressBar {
    fn size(&self) -> (usize, usize) {
        (self.0.length, 1)
    }

    fn render(&mut self, buffer: &mut Buffer, row: usize, column: usize) {
        debug_check_fits(buffer, row, column, self.size());
        let empty = self.0.length - self.0.fill();
        for r in 0..self.0.length {
            let cell = if r < empty {
                &self.0.cache.empty
            } else {
                &self.0.cache.progress
            };
            buffer[row + r][column] = cell.clone();
        }
    }
}
