use std::sync::Arc;

use crate::{
    buffer::Buffer,
    config::StyleConfig,
    fmt::{Caption, Text},
    key::Key,
    widgets::{debug_check_fits, BorderBox, Widget},
    Result,
};

use super::{frame, render_frame, Dialog, DialogCore, InputState, Interactive, Step};

/// A label the user dismisses: Enter acknowledges it, Escape cancels.
#[derive(Clone, Debug)]
pub struct MessageDialog {
    core: DialogCore,
    label: Caption,
    state: InputState,
    text: Text,
    border: Option<BorderBox>,
}

impl MessageDialog {
    pub fn new(label: impl Into<Caption>, config: Arc<StyleConfig>) -> Result<Self> {
        let label = label.into();
        let (text, border) = Self::build(&label, &config)?;
        Ok(Self {
            core: DialogCore::new(config, String::new()),
            label,
            state: InputState::Idle,
            text,
            border,
        })
    }

    fn build(label: &Caption, config: &Arc<StyleConfig>) -> Result<(Text, Option<BorderBox>)> {
        let text = label.resolve(config.style().text_format());
        let border = frame(config, text.len() + 2, 3)?;
        Ok((text, border))
    }

    pub fn label(&self) -> &Caption {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<Caption>) -> Result<()> {
        let label = label.into();
        (self.text, self.border) = Self::build(&label, &self.core.config)?;
        self.label = label;
        self.core.config.surface().request_redraw();
        Ok(())
    }
}

impl Dialog for MessageDialog {
    fn config(&self) -> &Arc<StyleConfig> {
        &self.core.config
    }

    fn set_config(&mut self, config: Arc<StyleConfig>) -> Result<()> {
        (self.text, self.border) = Self::build(&self.label, &config)?;
        self.core.config = config;
        self.core.config.surface().request_redraw();
        Ok(())
    }

    fn user_input(&self) -> &str {
        &self.core.user_input
    }

    fn set_user_input(&mut self, input: String) {
        self.core.user_input = input;
    }
}

impl Interactive for MessageDialog {
    /// Whether the message was acknowledged rather than cancelled.
    type Output = bool;

    fn handle_key(&mut self, key: Key) -> Step {
        let step = match key {
            Key::Enter => Step::Committed,
            Key::Escape => Step::Cancelled,
            _ => Step::Ignored,
        };
        self.state = step.into();
        step
    }

    fn output(&self) -> bool {
        self.state == InputState::Committed
    }

    fn state(&self) -> InputState {
        self.state
    }

    fn begin(&mut self) {
        self.state = InputState::Editing;
    }
}

impl Widget for MessageDialog {
    fn size(&self) -> (usize, usize) {
        match self.border {
            Some(_) => (3, self.text.len() + 2),
            None => (1, self.text.len()),
        }
    }

    fn render(&mut self, buffer: &mut Buffer, row: usize, column: usize) {
        debug_check_fits(buffer, row, column, self.size());
        let offset = render_frame(&mut self.border, buffer, row, column);
        self.text.render(buffer, row + offset, column + offset);
    }
}
