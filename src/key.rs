//! Keys, as delivered by a [`Host`][crate::Host], and the filters dialogs use to accept them.

use serde::{Deserialize, Serialize};

/// A key the user pressed.
///
/// "No key" (the poll timed out) isn't a `Key`; [`Host::poll_key`][crate::Host::poll_key] returns `None` for it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Char(char),
    F(usize),
    Escape,
    Backspace,
    Delete,
    Tab,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
}

impl Key {
    /// The character this key types, if it types one.
    pub fn char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Whether this key types a visible character (or a space).
    pub fn is_printable(&self) -> bool {
        matches!(self, Self::Char(c) if !c.is_control())
    }

    /// Whether this key types a decimal digit.
    pub fn is_digit(&self) -> bool {
        matches!(self, Self::Char(c) if c.is_ascii_digit())
    }

    /// Whether this key removes the last character of an input.
    pub fn is_erase(&self) -> bool {
        matches!(self, Self::Backspace | Self::Delete)
    }
}

/// Which typed characters an input field accepts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Anything printable.
    #[default]
    Printable,
    /// Decimal digits only.
    Digit,
}

impl Filter {
    /// The character to append for `key`, or `None` if this filter rejects it.
    pub fn accept(&self, key: Key) -> Option<char> {
        let ok = match self {
            Filter::Printable => key.is_printable(),
            Filter::Digit => key.is_digit(),
        };
        if ok {
            key.char()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_excludes_controls_and_named_keys() {
        assert!(Key::Char('a').is_printable());
        assert!(Key::Char(' ').is_printable());
        assert!(!Key::Char('\u{7}').is_printable());
        assert!(!Key::Enter.is_printable());
    }

    #[test]
    fn digit_filter_rejects_letters() {
        assert_eq!(Filter::Digit.accept(Key::Char('7')), Some('7'));
        assert_eq!(Filter::Digit.accept(Key::Char('x')), None);
        assert_eq!(Filter::Printable.accept(Key::Char('x')), Some('x'));
        assert_eq!(Filter::Printable.accept(Key::Tab), None);
    }
}
