use std::sync::Arc;

use crate::{
    buffer::Buffer,
    config::StyleConfig,
    fmt::{Caption, Cell, FormattedExt},
    Error, Result,
};

use super::{debug_check_fits, Widget};

/// Where the title goes on the top border: `left` border cells, the title, then `right` border cells.
///
/// The left run is `round(width / 2 - title / 2)` with ties going to the even number, which puts odd-length titles
/// slightly off center. It's capped so the right run can't go negative when the title nearly fills the border.
fn title_split(width: usize, title_len: usize) -> (usize, usize) {
    let interior = width - 2;
    // width / 2 - title / 2, doubled so it stays an integer
    let twice = width - title_len;
    let half = twice / 2;
    let rounded = if twice % 2 == 0 || half % 2 == 0 {
        half
    } else {
        half + 1
    };
    let left = rounded.min(interior - title_len);
    (left, interior - title_len - left)
}

/// Everything a [`BorderBox`] draws, precomputed from its properties and config.
#[derive(Clone, Debug)]
struct BorderCache {
    vertical: Cell,
    horizontal: Cell,
    top_left: Cell,
    top_right: Cell,
    bottom_left: Cell,
    bottom_right: Cell,
    title: Vec<Cell>,
    left: usize,
    right: usize,
}

impl BorderCache {
    fn build(width: usize, title: &Caption, config: &StyleConfig) -> Self {
        let fmt = config.style().border_format();
        let glyphs = &config.style().borders;
        let cell = |ch| Cell::of(ch).fmt(fmt);
        let mut title: Vec<Cell> = title.resolve(fmt).cells().collect();
        title.truncate(width - 2);
        let (left, right) = title_split(width, title.len());
        Self {
            vertical: cell(glyphs.vertical),
            horizontal: cell(glyphs.horizontal),
            top_left: cell(glyphs.top_left),
            top_right: cell(glyphs.top_right),
            bottom_left: cell(glyphs.bottom_left),
            bottom_right: cell(glyphs.bottom_right),
            title,
            left,
            right,
        }
    }
}

/// A rectangular frame, optionally with a title centered in its top border.
///
/// Only the border is drawn. The interior is left exactly as it was, so clear it first if you need a background.
#[derive(Clone, Debug)]
pub struct BorderBox {
    width: usize,
    height: usize,
    title: Caption,
    config: Arc<StyleConfig>,
    cache: BorderCache,
}

impl BorderBox {
    /// Create a box. Both dimensions include the border, so each must be at least 2.
    pub fn new(
        width: usize,
        height: usize,
        title: impl Into<Caption>,
        config: Arc<StyleConfig>,
    ) -> Result<Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        let title = title.into();
        let cache = BorderCache::build(width, &title, &config);
        Ok(Self {
            width,
            height,
            title,
            config,
            cache,
        })
    }

    fn recompute(&mut self) {
        tracing::trace!(width = self.width, height = self.height, "rebuilding border cache");
        self.cache = BorderCache::build(self.width, &self.title, &self.config);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn set_width(&mut self, width: usize) -> Result<()> {
        check_dimension("width", width)?;
        self.width = width;
        self.recompute();
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set_height(&mut self, height: usize) -> Result<()> {
        check_dimension("height", height)?;
        self.height = height;
        self.recompute();
        Ok(())
    }

    pub fn title(&self) -> &Caption {
        &self.title
    }

    /// Set the title. Titles longer than the top border's interior are cut short.
    pub fn set_title(&mut self, title: impl Into<Caption>) {
        self.title = title.into();
        self.recompute();
    }

    pub fn config(&self) -> &Arc<StyleConfig> {
        &self.config
    }

    pub fn set_config(&mut self, config: Arc<StyleConfig>) {
        self.config = config;
        self.recompute();
    }
}

fn check_dimension(name: &'static str, value: usize) -> Result<()> {
    if value < 2 {
        return Err(Error::invalid(format!(
            "BorderBox: {} must be at least 2 to fit the border, got {}",
            name, value
        )));
    }
    Ok(())
}

impl Widget for BorderBox {
    fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn render(&mut self, buffer: &mut Buffer, row: usize, column: usize) {
        debug_check_fits(buffer, row, column, self.size());
        let c = &self.cache;
        let last_col = column + self.width - 1;

        let top = &mut buffer[row];
        top[column] = c.top_left.clone();
        if c.title.is_empty() {
            top[column + 1..last_col].fill(c.horizontal.clone());
        } else {
            let title_start = column + 1 + c.left;
            let title_end = title_start + c.title.len();
            top[column + 1..title_start].fill(c.horizontal.clone());
            top[title_start..title_end].clone_from_slice(&c.title);
            top[title_end..title_end + c.right].fill(c.horizontal.clone());
        }
        top[last_col] = c.top_right.clone();

        for r in row + 1..row + self.height - 1 {
            buffer[r][column] = c.vertical.clone();
            buffer[r][last_col] = c.vertical.clone();
        }

        let bottom = &mut buffer[row + self.height - 1];
        bottom[column] = c.bottom_left.clone();
        bottom[column + 1..last_col].fill(c.horizontal.clone());
        bottom[last_col] = c.bottom_right.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Style,
        fmt::{Color, Formatted},
        testing::{config, config_with, count, filled},
        text1,
    };

    #[test]
    fn untitled_box_draws_only_the_border() {
        let mut b = BorderBox::new(10, 3, "", config()).unwrap();
        let mut buf = filled(3, 10, 'x');
        b.render(&mut buf, 0, 0);
        assert_eq!(buf.row_text(0), "╭────────╮");
        assert_eq!(buf.row_text(1), "│xxxxxxxx│");
        assert_eq!(buf.row_text(2), "╰────────╯");
        assert_eq!(count(&buf, 0, '─'), 8);
        assert_eq!(count(&buf, 2, '─'), 8);
        assert_eq!(count(&buf, 1, '│'), 2);
    }

    #[test]
    fn even_title_splits_nine_and_seven() {
        let mut b = BorderBox::new(20, 3, "Hi", config()).unwrap();
        let mut buf = Buffer::new(3, 20);
        b.render(&mut buf, 0, 0);
        assert_eq!(buf.row_text(0), format!("╭{}Hi{}╮", "─".repeat(9), "─".repeat(7)));
        assert_eq!(buf.row_text(2), format!("╰{}╯", "─".repeat(18)));
    }

    #[test]
    fn odd_title_rounds_half_to_even() {
        // 20 / 2 - 3 / 2 = 8.5, which rounds to 8
        let mut b = BorderBox::new(20, 2, "abc", config()).unwrap();
        let mut buf = Buffer::new(2, 20);
        b.render(&mut buf, 0, 0);
        assert_eq!(buf.row_text(0), format!("╭{}abc{}╮", "─".repeat(8), "─".repeat(7)));

        // 21 / 2 - 2 / 2 = 9.5, which rounds to 10
        let mut b = BorderBox::new(21, 2, "ab", config()).unwrap();
        let mut buf = Buffer::new(2, 21);
        b.render(&mut buf, 0, 0);
        assert_eq!(buf.row_text(0), format!("╭{}ab{}╮", "─".repeat(10), "─".repeat(7)));
    }

    #[test]
    fn long_titles_are_cut_to_the_interior() {
        let mut b = BorderBox::new(6, 2, "abcdefgh", config()).unwrap();
        let mut buf = Buffer::new(2, 6);
        b.render(&mut buf, 0, 0);
        assert_eq!(buf.row_text(0), "╭abcd╮");

        // rounding would put 2 on the left, but that leaves no room on the right
        let mut b = BorderBox::new(10, 2, "abcdefg", config()).unwrap();
        let mut buf = Buffer::new(2, 10);
        b.render(&mut buf, 0, 0);
        assert_eq!(buf.row_text(0), "╭─abcdefg╮");
    }

    #[test]
    fn corners_land_on_their_own_sides() {
        let mut style = Style::default();
        style.borders.top_left = '1';
        style.borders.top_right = '2';
        style.borders.bottom_left = '3';
        style.borders.bottom_right = '4';
        let mut b = BorderBox::new(4, 3, "", config_with(style)).unwrap();
        let mut buf = Buffer::new(3, 4);
        b.render(&mut buf, 0, 0);
        assert_eq!(buf[0][0].ch, '1');
        assert_eq!(buf[0][3].ch, '2');
        assert_eq!(buf[2][0].ch, '3');
        assert_eq!(buf[2][3].ch, '4');
    }

    #[test]
    fn renders_at_an_offset() {
        let mut b = BorderBox::new(4, 2, "", config()).unwrap();
        let mut buf = Buffer::new(4, 8);
        b.render(&mut buf, 1, 3);
        assert_eq!(buf.row_text(0), "        ");
        assert_eq!(buf.row_text(1), "   ╭──╮ ");
        assert_eq!(buf.row_text(2), "   ╰──╯ ");
        assert_eq!(buf.row_text(3), "        ");
    }

    #[test]
    fn border_cells_use_border_colors() {
        let mut style = Style::default();
        style.border_fg = Color::Red;
        style.border_bg = Some(Color::Blue);
        let mut b = BorderBox::new(8, 2, "t", config_with(style)).unwrap();
        let mut buf = Buffer::new(2, 8);
        b.render(&mut buf, 0, 0);
        for cell in buf[0].iter().chain(buf[1].iter()) {
            assert_eq!(cell.get_fmt().fg, Color::Red);
            assert_eq!(cell.get_fmt().bg, Some(Color::Blue));
        }
    }

    #[test]
    fn styled_title_keeps_its_format() {
        let mut b = BorderBox::new(8, 2, text1!(green "ok"), config()).unwrap();
        let mut buf = Buffer::new(2, 8);
        b.render(&mut buf, 0, 0);
        // round(8 / 2 - 2 / 2) = 3 on the left, leaving 1 on the right
        assert_eq!(buf.row_text(0), "╭───ok─╮");
        assert_eq!(buf[0][4].get_fmt().fg, Color::Green);
        assert_eq!(buf[0][3].get_fmt().fg, Style::default().border_fg);
    }

    #[test]
    fn setters_rebuild_the_cache() {
        let mut b = BorderBox::new(6, 2, "", config()).unwrap();
        b.set_width(8).unwrap();
        b.set_title("xy");
        let mut buf = Buffer::new(3, 8);
        b.render(&mut buf, 0, 0);
        assert_eq!(buf.row_text(0), "╭───xy─╮");

        let mut style = Style::default();
        style.borders.horizontal = '=';
        b.set_config(config_with(style));
        b.set_height(3).unwrap();
        b.render(&mut buf, 0, 0);
        assert_eq!(buf.row_text(0), "╭===xy=╮");
        assert_eq!(buf.row_text(2), "╰======╯");
    }

    #[test]
    fn too_small_is_invalid() {
        assert!(matches!(
            BorderBox::new(1, 3, "", config()),
            Err(Error::InvalidArgument(_))
        ));
        let mut b = BorderBox::new(2, 2, "", config()).unwrap();
        assert!(b.set_height(0).is_err());
        assert_eq!(b.height(), 2);
    }
}
