//! Formatted characters and text runs: the things widgets stamp into a [`Buffer`][crate::Buffer].
//!
//! - 16 basic [`Color`]s plus arbitrary [`Color::Rgb`]
//! - Foreground, optional background, bold and underline, through [`Format`]
//! - [`Cell`] is one formatted glyph, [`Text`] a formatted run of them
//! - [`Caption`] is what labels and titles accept: plain text styled by the widget, or a pre-styled [`Text`]

use serde::{Deserialize, Serialize};

use crate::buffer::Buffer;

/// The color of a cell or text run. The named values are the usual ANSI colors; `Rgb` is passed through to backends
/// which can show it and approximated by the rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

/// The format of a single formatted item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Format {
    /// The foreground color of the item
    pub fg: Color,
    /// The background color of the item, or `None` to leave whatever the display has there
    pub bg: Option<Color>,
    /// Whether it's bolded or not
    pub bold: bool,
    /// Whether it's underlined or not
    pub underline: bool,
}

impl Format {
    pub const NONE: Self = Format {
        fg: Color::White,
        bg: None,
        bold: false,
        underline: false,
    };

    /// A plain format with the given colors.
    pub const fn colors(fg: Color, bg: Option<Color>) -> Self {
        Format {
            fg,
            bg,
            bold: false,
            underline: false,
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::NONE
    }
}

/// Trait implemented by all formattable items (`Text` and `Cell`).
pub trait Formatted {
    fn get_fmt(&self) -> &Format;
    fn get_fmt_mut(&mut self) -> &mut Format;
}

macro_rules! color_fns {
    ( $( $name:ident => $color:ident ),* $(,)? ) => { paste::paste! { $(
        #[must_use]
        fn $name(self) -> Self {
            self.fg(Color::$color)
        }
        #[must_use]
        fn [< on_ $name >](self) -> Self {
            self.bg(Color::$color)
        }
    )* } };
}

/// Provides common formatting operations on anything implementing [`Formatted`].
pub trait FormattedExt: Formatted + Sized {
    /// Directly set the formatting of this item to some [`Format`]
    #[must_use]
    fn fmt(mut self, fmt: Format) -> Self {
        *self.get_fmt_mut() = fmt;
        self
    }

    /// Copy another item's formatting into this one, e.g. a [`Text`]'s formatting onto each of its [`Cell`]s.
    #[must_use]
    fn fmt_of(mut self, rhs: &dyn Formatted) -> Self {
        *self.get_fmt_mut() = *rhs.get_fmt();
        self
    }

    #[must_use]
    fn fg(mut self, c: Color) -> Self {
        self.get_fmt_mut().fg = c;
        self
    }

    #[must_use]
    fn bg(mut self, c: Color) -> Self {
        self.get_fmt_mut().bg = Some(c);
        self
    }

    /// Clear the background, so the item inherits whatever is behind it.
    #[must_use]
    fn no_bg(mut self) -> Self {
        self.get_fmt_mut().bg = None;
        self
    }

    #[must_use]
    fn bold(mut self) -> Self {
        self.get_fmt_mut().bold = true;
        self
    }

    #[must_use]
    fn underline(mut self) -> Self {
        self.get_fmt_mut().underline = true;
        self
    }

    color_fns! {
        black => Black,                     bright_black => BrightBlack,
        red => Red,                         bright_red => BrightRed,
        green => Green,                     bright_green => BrightGreen,
        yellow => Yellow,                   bright_yellow => BrightYellow,
        blue => Blue,                       bright_blue => BrightBlue,
        magenta => Magenta,                 bright_magenta => BrightMagenta,
        cyan => Cyan,                       bright_cyan => BrightCyan,
        white => White,                     bright_white => BrightWhite,
    }
}

impl<F: Formatted> FormattedExt for F {}

macro_rules! fmt_type {
    (
        $( #[$($attr:meta),* $(,)?] )*
        $svis:vis struct $name:ident { $fvis:vis $field:ident: $type:ty $(,)? }
    ) => {
        $( #[$($attr),*] )*
        $svis struct $name {
            $fvis $field: $type,
            _fmt: Format,
        }
        impl Formatted for $name {
            fn get_fmt(&self) -> &Format {
                &self._fmt
            }
            fn get_fmt_mut(&mut self) -> &mut Format {
                &mut self._fmt
            }
        }
        impl $name {
            pub const fn of($field: $type) -> Self {
                Self {
                    $field,
                    _fmt: Format::NONE,
                }
            }
        }
    };
}

fmt_type! {
    /// A single character that's been formatted; the unit a [`Buffer`] is made of.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Cell { pub ch: char }
}

/// Create a formatted [`Cell`].
#[macro_export]
macro_rules! cell {
    [ $( $name:ident )* $( $char:literal )? ] => {
        {
            #[allow(unused_imports)]
            use $crate::fmt::{FormattedExt as _};
            $crate::fmt::Cell::of($($char)?) $( .$name() )*
        }
    };
}

impl Cell {
    /// A blank cell with default formatting.
    pub const BLANK: Cell = Cell::of(' ');
}

fmt_type! {
    /// A formatted run of characters, all sharing one [`Format`].
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Text { pub text: String }
}

/// Create a single formatted [`Text`], e.g. `text1!(red bold "{} items"(n))`.
#[macro_export]
macro_rules! text1 {
    [
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ] => {
        {
            #[allow(unused_imports)]
            use $crate::fmt::{FormattedExt as _};
            $crate::fmt::Text::of(
                ::std::format!( $text $(, $( $arg ),* )? )
            ) $( . $name () )*
        }
    };
}

impl Text {
    pub fn plain(s: &str) -> Text {
        Text::of(s.into())
    }

    /// Length in character cells.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The formatted cells this run occupies, left to right.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.text.chars().map(move |ch| Cell::of(ch).fmt_of(self))
    }

    /// Stamp this run into the buffer, starting at `(row, column)` and going right.
    ///
    /// This **does not** handle newlines or wrapping, and doesn't clip: the whole run must fit in the row.
    pub fn render(&self, buffer: &mut Buffer, row: usize, column: usize) {
        buffer.write(row, column, self);
    }
}

/// The text of a label or title.
///
/// A `Plain` caption takes its colors from the widget's config every time the widget's cache is rebuilt; a `Styled`
/// one keeps its own formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Caption {
    Plain(String),
    Styled(Text),
}

impl Caption {
    /// The raw characters, without formatting.
    pub fn as_str(&self) -> &str {
        match self {
            Caption::Plain(s) => s,
            Caption::Styled(t) => &t.text,
        }
    }

    /// Length in character cells.
    pub fn len(&self) -> usize {
        self.as_str().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Turn this into a [`Text`], using `fmt` if it doesn't carry its own formatting.
    pub fn resolve(&self, fmt: Format) -> Text {
        match self {
            Caption::Plain(s) => Text::of(s.clone()).fmt(fmt),
            Caption::Styled(t) => t.clone(),
        }
    }
}

impl Default for Caption {
    fn default() -> Self {
        Caption::Plain(String::new())
    }
}

impl From<&str> for Caption {
    fn from(value: &str) -> Self {
        Caption::Plain(value.into())
    }
}

impl From<String> for Caption {
    fn from(value: String) -> Self {
        Caption::Plain(value)
    }
}

impl From<Text> for Caption {
    fn from(value: Text) -> Self {
        Caption::Styled(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_shortcuts_set_fg_and_bg() {
        let c = cell!(red on_bright_blue 'x');
        assert_eq!(c.get_fmt().fg, Color::Red);
        assert_eq!(c.get_fmt().bg, Some(Color::BrightBlue));
        assert_eq!(cell!('x').on_red().no_bg().get_fmt().bg, None);
    }

    #[test]
    fn text_length_counts_chars_not_bytes() {
        assert_eq!(Text::plain("╭─╮").len(), 3);
        assert_eq!(Caption::from("héllo").len(), 5);
    }

    #[test]
    fn plain_caption_takes_the_given_format() {
        let fmt = Format::colors(Color::Rgb(1, 2, 3), Some(Color::Black));
        let t = Caption::from("hi").resolve(fmt);
        assert_eq!(t.get_fmt(), &fmt);
        assert!(t.cells().all(|c| c.get_fmt() == &fmt));
    }

    #[test]
    fn styled_caption_keeps_its_format() {
        let styled = text1!(green bold "hi");
        let t = Caption::from(styled.clone()).resolve(Format::NONE);
        assert_eq!(t, styled);
    }
}
