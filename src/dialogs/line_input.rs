use std::sync::Arc;

use crate::{
    buffer::Buffer,
    config::StyleConfig,
    fmt::{Caption, FormattedExt, Text},
    key::{Filter, Key},
    widgets::{debug_check_fits, BorderBox, Widget},
    Result,
};

use super::{frame, render_frame, Dialog, DialogCore, InputState, Interactive, Step};

/// What goes in front of the text being typed.
pub(super) const PROMPT: &str = "> ";

/// Width of the widest of `label` and the prompt line for `input`.
pub(super) fn content_width(label: &Text, input: &str) -> usize {
    label.len().max(PROMPT.len() + input.chars().count())
}

/// Resize a dialog frame to fit `content` columns inside it.
pub(super) fn fit_frame(border: &mut Option<BorderBox>, content: usize) {
    if let Some(border) = border {
        if border.width() != content + 2 {
            if let Err(err) = border.set_width(content + 2) {
                tracing::warn!(%err, "couldn't resize dialog frame");
            }
        }
    }
}

#[derive(Clone, Debug)]
struct LineInputCache {
    label: Text,
    border: Option<BorderBox>,
}

/// A label and a single line of text input.
///
/// Keys are accepted according to the dialog's [`Filter`]. Backspace and Delete both drop the last character. Enter
/// commits the input, Escape clears it and cancels.
#[derive(Clone, Debug)]
pub struct LineInputDialog {
    core: DialogCore,
    label: Caption,
    default: String,
    filter: Filter,
    state: InputState,
    cache: LineInputCache,
}

impl LineInputDialog {
    pub const DEFAULT_LABEL: &'static str = "Input a value:";

    /// Create a dialog whose input starts out as `default`.
    pub fn new(
        label: impl Into<Caption>,
        default: impl Into<String>,
        filter: Filter,
        config: Arc<StyleConfig>,
    ) -> Result<Self> {
        let default = default.into();
        let label = label.into();
        let cache = Self::build_cache(&label, &default, &config)?;
        Ok(Self {
            core: DialogCore::new(config, default.clone()),
            label,
            default,
            filter,
            state: InputState::Idle,
            cache,
        })
    }

    fn build_cache(label: &Caption, input: &str, config: &Arc<StyleConfig>) -> Result<LineInputCache> {
        let label = label.resolve(config.style().text_format());
        let border = frame(config, content_width(&label, input) + 2, 4)?;
        Ok(LineInputCache { label, border })
    }

    fn changed(&mut self) -> Result<()> {
        self.cache = Self::build_cache(&self.label, &self.core.user_input, &self.core.config)?;
        self.core.config.surface().request_redraw();
        Ok(())
    }

    pub fn label(&self) -> &Caption {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<Caption>) -> Result<()> {
        self.label = label.into();
        self.changed()
    }

    /// The input this dialog started with.
    pub fn default(&self) -> &str {
        &self.default
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }
}

impl Dialog for LineInputDialog {
    fn config(&self) -> &Arc<StyleConfig> {
        &self.core.config
    }

    fn set_config(&mut self, config: Arc<StyleConfig>) -> Result<()> {
        self.core.config = config;
        self.changed()
    }

    fn user_input(&self) -> &str {
        &self.core.user_input
    }

    fn set_user_input(&mut self, input: String) {
        self.core.user_input = input;
        fit_frame(&mut self.cache.border, content_width(&self.cache.label, &self.core.user_input));
    }
}

impl Interactive for LineInputDialog {
    type Output = String;

    fn handle_key(&mut self, key: Key) -> Step {
        let step = match key {
            Key::Enter => Step::Committed,
            Key::Escape => {
                self.core.user_input.clear();
                Step::Cancelled
            }
            k if k.is_erase() => match self.core.user_input.pop() {
                Some(_) => Step::Changed,
                None => Step::Ignored,
            },
            k => match self.filter.accept(k) {
                Some(ch) => {
                    self.core.user_input.push(ch);
                    Step::Changed
                }
                None => Step::Ignored,
            },
        };
        self.state = step.into();
        fit_frame(&mut self.cache.border, content_width(&self.cache.label, &self.core.user_input));
        step
    }

    fn output(&self) -> String {
        self.core.user_input.clone()
    }

    fn state(&self) -> InputState {
        self.state
    }

    fn begin(&mut self) {
        self.state = InputState::Editing;
    }
}

impl Widget for LineInputDialog {
    fn size(&self) -> (usize, usize) {
        let width = content_width(&self.cache.label, &self.core.user_input);
        match self.cache.border {
            Some(_) => (4, width + 2),
            None => (2, width),
        }
    }

    fn render(&mut self, buffer: &mut Buffer, row: usize, column: usize) {
        debug_check_fits(buffer, row, column, self.size());
        let offset = render_frame(&mut self.cache.border, buffer, row, column);
        self.cache.label.render(buffer, row + offset, column + offset);
        let input = Text::of(format!("{}{}", PROMPT, self.core.user_input)).fmt(self.core.config.style().text_format());
        input.render(buffer, row + offset + 1, column + offset);
    }
}
