//! Border glyphs and colors shared by every widget.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use serde::{Deserialize, Serialize};

use crate::{
    fmt::{Color, Format},
    surface::Surface,
    Error, Result,
};

/// The glyphs a [`BorderBox`][crate::widgets::BorderBox] is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderGlyphs {
    pub vertical: char,
    pub horizontal: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl Default for BorderGlyphs {
    /// Light lines with rounded corners.
    fn default() -> Self {
        Self {
            vertical: '│',
            horizontal: '─',
            top_left: '╭',
            top_right: '╮',
            bottom_left: '╰',
            bottom_right: '╯',
        }
    }
}

/// The look of every widget built from one [`StyleConfig`].
///
/// Every field has a default, so a partial description (e.g. from an application's config file) is enough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub borders: BorderGlyphs,
    /// Color of labels, input text and progress markers
    pub fg: Color,
    pub bg: Color,
    pub border_fg: Color,
    /// Border background, or `None` to leave whatever is behind the border
    pub border_bg: Option<Color>,
    /// Color of the input line of the active field in a multi-field dialog
    pub highlight_fg: Color,
    /// Skip drawing a frame around dialogs
    pub borderless_dialog: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            borders: BorderGlyphs::default(),
            fg: Color::Rgb(255, 255, 255),
            bg: Color::Rgb(0, 128, 128),
            border_fg: Color::Rgb(255, 255, 255),
            border_bg: None,
            highlight_fg: Color::Rgb(0, 255, 0),
            borderless_dialog: true,
        }
    }
}

impl Style {
    /// Format for labels and input text.
    pub fn text_format(&self) -> Format {
        Format::colors(self.fg, Some(self.bg))
    }

    /// Format for border glyphs and box titles.
    pub fn border_format(&self) -> Format {
        Format::colors(self.border_fg, self.border_bg)
    }

    /// Format for the active field's input.
    pub fn highlight_format(&self) -> Format {
        Format::colors(self.highlight_fg, Some(self.bg))
    }
}

lazy_static::lazy_static! {
    static ref INSTANCE: Mutex<Option<Arc<StyleConfig>>> = Mutex::new(None);
}

/// A [`Style`] bound to the display [`Surface`] its widgets send requests to.
///
/// Widgets hold an `Arc<StyleConfig>` rather than a copy. A `StyleConfig` never changes; to restyle a widget, give it
/// a new one with its `set_config`, which rebuilds everything derived from the old one.
#[derive(Clone)]
pub struct StyleConfig {
    style: Style,
    surface: Arc<dyn Surface>,
}

impl StyleConfig {
    pub fn new(surface: Arc<dyn Surface>, style: Style) -> Self {
        Self { style, surface }
    }

    /// Start building a config from the default [`Style`]. A surface must be set before [`StyleConfigBuilder::build`].
    pub fn builder() -> StyleConfigBuilder {
        StyleConfigBuilder {
            surface: None,
            style: Style::default(),
        }
    }

    /// A process-wide shared config with the default style.
    ///
    /// The first call creates it around `surface`; later calls return that same instance and ignore their argument.
    /// Nothing in this crate uses it, it's only a convenience for small programs.
    pub fn instance(surface: Arc<dyn Surface>) -> Arc<StyleConfig> {
        let mut slot = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert_with(|| Arc::new(StyleConfig::new(surface, Style::default())))
            .clone()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn surface(&self) -> &dyn Surface {
        &*self.surface
    }

    /// A config with a different style, sending requests to the same surface.
    pub fn restyled(&self, style: Style) -> StyleConfig {
        Self::new(self.surface.clone(), style)
    }
}

impl fmt::Debug for StyleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleConfig")
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Builder for [`StyleConfig`]; see [`StyleConfig::builder`].
pub struct StyleConfigBuilder {
    surface: Option<Arc<dyn Surface>>,
    style: Style,
}

impl StyleConfigBuilder {
    crate::util::setters! {
        /// The surface widgets built from this config send requests to. Required.
        surface(s: Arc<dyn Surface>) => surface = Some(s),
        /// Replace the whole style at once.
        style(s: Style) => style = s,
        vertical_border(c: char) => style.borders.vertical = c,
        horizontal_border(c: char) => style.borders.horizontal = c,
        top_left_corner(c: char) => style.borders.top_left = c,
        top_right_corner(c: char) => style.borders.top_right = c,
        bottom_left_corner(c: char) => style.borders.bottom_left = c,
        bottom_right_corner(c: char) => style.borders.bottom_right = c,
        fg(c: Color) => style.fg = c,
        bg(c: Color) => style.bg = c,
        border_fg(c: Color) => style.border_fg = c,
        border_bg(c: Option<Color>) => style.border_bg = c,
        highlight_fg(c: Color) => style.highlight_fg = c,
        borderless_dialog(v: bool) => style.borderless_dialog = v,
    }

    /// Finish the config. Fails if no surface was given, since widgets need one to request redraws.
    pub fn build(self) -> Result<StyleConfig> {
        let surface = self
            .surface
            .ok_or_else(|| Error::invalid("StyleConfig: a display surface is required"))?;
        Ok(StyleConfig::new(surface, self.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RequestQueue;

    #[test]
    fn builder_without_surface_is_invalid() {
        let res = StyleConfig::builder().fg(Color::Red).build();
        assert!(matches!(res, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn builder_sets_nested_fields() {
        let cfg = StyleConfig::builder()
            .surface(Arc::new(RequestQueue::new()))
            .top_left_corner('+')
            .border_bg(Some(Color::Blue))
            .borderless_dialog(false)
            .build()
            .unwrap();
        assert_eq!(cfg.style().borders.top_left, '+');
        assert_eq!(cfg.style().borders.top_right, '╮');
        assert_eq!(cfg.style().border_format().bg, Some(Color::Blue));
        assert!(!cfg.style().borderless_dialog);
    }

    #[test]
    fn instance_is_shared() {
        let a = StyleConfig::instance(Arc::new(RequestQueue::new()));
        let b = StyleConfig::instance(Arc::new(RequestQueue::new()));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn partial_style_document_fills_defaults() {
        let style: Style = serde_yaml::from_str(
            "borders:\n  horizontal: '='\nborder_bg: black\nfg: !rgb [10, 20, 30]\nborderless_dialog: false\n",
        )
        .unwrap();
        assert_eq!(style.borders.horizontal, '=');
        assert_eq!(style.borders.vertical, '│');
        assert_eq!(style.border_bg, Some(Color::Black));
        assert_eq!(style.fg, Color::Rgb(10, 20, 30));
        assert_eq!(style.bg, Style::default().bg);
        assert!(!style.borderless_dialog);
    }
}
