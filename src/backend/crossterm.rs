//! A [`Host`] drawing into the terminal through crossterm.

use std::{
    io::{self, Write},
    sync::Arc,
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveDown, MoveTo, MoveToColumn, Show},
    event::{self as ct, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{
        Attribute, Color as CtColor, ResetColor, SetAttribute, SetAttributes, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::{
    buffer::Buffer,
    config::{Style, StyleConfig},
    fmt::{Cell, Color, Formatted},
    key::Key,
    surface::{Host, RequestQueue},
    widgets::Widget,
    Error, Result,
};

/// Owns the terminal for as long as it lives: raw mode, alternate screen, hidden cursor. All of that is undone on drop,
/// and by a panic hook so a crash doesn't leave the terminal unusable.
///
/// Widgets are drawn at [`Self::anchor`] in a buffer the size of the terminal.
pub struct CrosstermHost {
    buffer: Buffer,
    anchor: (usize, usize),
    requests: Arc<RequestQueue>,
}

impl CrosstermHost {
    fn init_term() -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
        )?;
        Ok(())
    }

    fn clean_term() -> Result<()> {
        execute!(
            io::stdout(),
            Clear(ClearType::All),
            Show,
            EnableLineWrap,
            LeaveAlternateScreen,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn new() -> Result<Self> {
        Self::init_term()?;
        std::panic::set_hook(Box::new(|i| {
            let _ = Self::clean_term();
            println!("{}", i);
            // set back up in preparation for drop
            #[cfg(panic = "unwind")]
            let _ = Self::init_term();
        }));
        let (cols, rows) = terminal::size()?;
        tracing::debug!(rows, cols, "terminal ready");
        Ok(Self {
            buffer: Buffer::new(rows as usize, cols as usize),
            anchor: (0, 0),
            requests: Arc::new(RequestQueue::new()),
        })
    }

    /// Where widgets are drawn, as `(row, column)`.
    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    pub fn set_anchor(&mut self, row: usize, column: usize) {
        self.anchor = (row, column);
    }

    /// Center a widget of `size` in the terminal.
    pub fn center(&mut self, size: (usize, usize)) {
        self.anchor = (
            self.buffer.height().saturating_sub(size.0) / 2,
            self.buffer.width().saturating_sub(size.1) / 2,
        );
    }

    /// A config whose widgets send their requests to this host.
    pub fn config(&self, style: Style) -> Arc<StyleConfig> {
        Arc::new(StyleConfig::new(self.requests.clone(), style))
    }

    fn draw(&mut self) -> Result<()> {
        let mut out = vec![];
        queue!(&mut out, MoveTo(0, 0), Clear(ClearType::All))?;
        for row in self.buffer.rows() {
            render_row(row, &mut out)?;
        }
        let stdout = io::stdout();
        let mut stdout = stdout.lock();
        stdout.write_all(&out)?;
        stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermHost {
    fn drop(&mut self) {
        let _ = Self::clean_term();
    }
}

impl Host for CrosstermHost {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>> {
        if !ct::poll(timeout)? {
            return Ok(None);
        }
        match ct::read()? {
            ct::Event::Key(ev) if ev.kind != KeyEventKind::Release => Ok(key4ct(ev)),
            ct::Event::Resize(cols, rows) => {
                tracing::debug!(rows, cols, "terminal resized");
                self.buffer.resize(rows as usize, cols as usize);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, widget: &mut dyn Widget) -> Result<()> {
        self.buffer.clear();
        let (row, column) = place(
            (self.buffer.height(), self.buffer.width()),
            self.anchor,
            widget.size(),
        )?;
        widget.render(&mut self.buffer, row, column);
        for req in self.requests.drain() {
            // the buffer was cleared above, so a deleted widget is already gone
            tracing::debug!(?req, "handled surface request");
        }
        self.draw()
    }
}

/// Where to draw a widget of `size` anchored at `anchor` in a terminal of `screen` cells, both `(rows, columns)`.
///
/// The anchor is pulled up and left as far as needed to keep the widget on screen, e.g. after the terminal shrinks or
/// an input dialog grows. A widget bigger than the whole terminal can't be placed at all.
fn place(screen: (usize, usize), anchor: (usize, usize), size: (usize, usize)) -> Result<(usize, usize)> {
    if size.0 > screen.0 || size.1 > screen.1 {
        return Err(Error::invalid(format!(
            "a {}x{} widget doesn't fit in a {}x{} terminal",
            size.0, size.1, screen.0, screen.1
        )));
    }
    Ok((anchor.0.min(screen.0 - size.0), anchor.1.min(screen.1 - size.1)))
}

/// Our key for a crossterm key event, if it's one dialogs care about
fn key4ct(ev: ct::KeyEvent) -> Option<Key> {
    let key = match ev.code {
        // raw mode swallows the interrupt, so treat it like the user backing out
        ct::KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Key::Escape,
        ct::KeyCode::Char(c) => Key::Char(c),
        ct::KeyCode::F(n) => Key::F(n as usize),
        ct::KeyCode::Esc => Key::Escape,
        ct::KeyCode::Backspace => Key::Backspace,
        ct::KeyCode::Delete => Key::Delete,
        ct::KeyCode::Tab => Key::Tab,
        ct::KeyCode::Enter => Key::Enter,
        ct::KeyCode::Up => Key::Up,
        ct::KeyCode::Down => Key::Down,
        ct::KeyCode::Left => Key::Left,
        ct::KeyCode::Right => Key::Right,
        ct::KeyCode::Home => Key::Home,
        ct::KeyCode::End => Key::End,
        ct::KeyCode::PageUp => Key::PageUp,
        ct::KeyCode::PageDown => Key::PageDown,
        ct::KeyCode::Insert => Key::Insert,
        other => {
            tracing::trace!(?other, "ignoring key");
            return None;
        }
    };
    Some(key)
}

/// Crossterm color for our colors
fn ct4cf_color(c: Color) -> CtColor {
    match c {
        Color::BrightBlack => CtColor::DarkGrey,
        Color::Black => CtColor::Black,
        Color::BrightRed => CtColor::Red,
        Color::Red => CtColor::DarkRed,
        Color::BrightGreen => CtColor::Green,
        Color::Green => CtColor::DarkGreen,
        Color::BrightYellow => CtColor::Yellow,
        Color::Yellow => CtColor::DarkYellow,
        Color::BrightBlue => CtColor::Blue,
        Color::Blue => CtColor::DarkBlue,
        Color::BrightMagenta => CtColor::Magenta,
        Color::Magenta => CtColor::DarkMagenta,
        Color::BrightCyan => CtColor::Cyan,
        Color::Cyan => CtColor::DarkCyan,
        Color::BrightWhite => CtColor::White,
        Color::White => CtColor::Grey,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

/// No background means the terminal's own.
fn ct4cf_bg(c: Option<Color>) -> CtColor {
    c.map_or(CtColor::Reset, ct4cf_color)
}

/// Render a single row of cells into a `Vec<u8>` that can be printed
fn render_row(row: &[Cell], out: &mut Vec<u8>) -> io::Result<()> {
    let first = match row.first() {
        Some(c) => c,
        None => return Ok(()),
    };
    let mut ch_b = [0u8; 4];

    let mut fmt = first.get_fmt();
    let mut attrs = [Attribute::NormalIntensity, Attribute::NoUnderline];
    if fmt.bold {
        attrs[0] = Attribute::Bold;
    }
    if fmt.underline {
        attrs[1] = Attribute::Underlined;
    }
    queue!(
        out,
        ResetColor,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(ct4cf_color(fmt.fg)),
        SetBackgroundColor(ct4cf_bg(fmt.bg)),
        SetAttributes(attrs.as_ref().into()),
    )?;
    out.extend_from_slice(first.ch.encode_utf8(&mut ch_b).as_bytes());

    for cell in &row[1..] {
        let next = cell.get_fmt();
        if next.fg != fmt.fg {
            queue!(out, SetForegroundColor(ct4cf_color(next.fg)))?;
        }
        if next.bg != fmt.bg {
            queue!(out, SetBackgroundColor(ct4cf_bg(next.bg)))?;
        }
        if next.bold != fmt.bold {
            let attr = if next.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            queue!(out, SetAttribute(attr))?;
        }
        if next.underline != fmt.underline {
            let attr = if next.underline {
                Attribute::Underlined
            } else {
                Attribute::NoUnderline
            };
            queue!(out, SetAttribute(attr))?;
        }
        fmt = next;
        out.extend_from_slice(cell.ch.encode_utf8(&mut ch_b).as_bytes());
    }
    queue!(out, MoveDown(1), MoveToColumn(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cell, fmt::FormattedExt};

    fn press(code: ct::KeyCode) -> ct::KeyEvent {
        ct::KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_ours() {
        assert_eq!(key4ct(press(ct::KeyCode::Char('a'))), Some(Key::Char('a')));
        assert_eq!(key4ct(press(ct::KeyCode::Esc)), Some(Key::Escape));
        assert_eq!(key4ct(press(ct::KeyCode::F(3))), Some(Key::F(3)));
        assert_eq!(key4ct(press(ct::KeyCode::Null)), None);
        let ctrl_c = ct::KeyEvent::new(ct::KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key4ct(ctrl_c), Some(Key::Escape));
    }

    #[test]
    fn placement_keeps_widgets_on_screen() {
        assert_eq!(place((24, 80), (1, 2), (4, 20)).unwrap(), (1, 2));
        // an input dialog that grew past the right edge
        assert_eq!(place((24, 80), (1, 2), (4, 80)).unwrap(), (1, 0));
        // the terminal shrank under a centered dialog
        assert_eq!(place((5, 10), (10, 30), (3, 7)).unwrap(), (2, 3));
        assert!(matches!(place((5, 80), (0, 0), (4, 83)), Err(Error::InvalidArgument(_))));
        assert!(matches!(place((3, 80), (0, 0), (4, 10)), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn placed_widgets_render_inside_a_small_buffer() {
        let cfg = Arc::new(StyleConfig::new(
            Arc::new(RequestQueue::new()),
            Style {
                borderless_dialog: false,
                ..Style::default()
            },
        ));
        let mut d = crate::dialogs::LineInputDialog::new("name", "", crate::Filter::Printable, cfg).unwrap();
        for c in "abcdefgh".chars() {
            crate::Interactive::handle_key(&mut d, Key::Char(c));
        }
        let mut buf = Buffer::new(4, 12);
        let (row, column) = place((buf.height(), buf.width()), (2, 5), d.size()).unwrap();
        assert_eq!((row, column), (0, 0));
        d.render(&mut buf, row, column);
        assert_eq!(buf.row_text(2), "│> abcdefgh│");
    }

    #[test]
    fn rows_only_restyle_on_change() {
        let row = [cell!(red 'a'), cell!(red 'b'), Cell::of('c').fg(Color::Rgb(1, 2, 3))];
        let mut out = vec![];
        render_row(&row, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ab"));
        assert!(text.contains("38;2;1;2;3"));
        assert!(render_row(&[], &mut vec![]).is_ok());
    }
}
