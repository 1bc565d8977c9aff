//! Dialogs: composite widgets, some of which take keyboard input.
//!
//! Every dialog is a [`Widget`] and a [`Dialog`]. The interactive ones ([`LineInputDialog`],
//! [`MultiLineInputDialog`] and [`MessageDialog`]) are also [`Interactive`]: a keystroke-driven state machine you can
//! either pump yourself with [`Interactive::handle_key`], or hand to a [`Host`] with [`Interactive::show`], which
//! blocks until the user commits or cancels.
//!
//! [`Dialogs`] is the closed set of all of them, for when you need to store them together.

use std::{sync::Arc, time::Duration};

use crate::{
    buffer::Buffer,
    config::StyleConfig,
    key::Key,
    surface::Host,
    widgets::{BorderBox, Widget},
    Error, Result,
};

mod line_input;
pub use line_input::LineInputDialog;
mod message;
pub use message::MessageDialog;
mod multi_line;
pub use multi_line::{DialogField, MultiLineInputDialog};
mod progress;
pub use progress::{Lifecycle, ProgressDialog, ProgressDialogBuilder};

/// How long [`Interactive::show`] waits for each key before polling again.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// What every dialog has: a config and a text accumulator.
#[enum_dispatch::enum_dispatch]
pub trait Dialog {
    fn config(&self) -> &Arc<StyleConfig>;
    /// Swap the config, rebuilding everything derived from it.
    fn set_config(&mut self, config: Arc<StyleConfig>) -> Result<()>;
    /// The text typed so far. For multi-field dialogs, the current field's.
    fn user_input(&self) -> &str;
    fn set_user_input(&mut self, input: String);
}

/// Where an interactive dialog is in its lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputState {
    /// Built, but no keys handled yet.
    #[default]
    Idle,
    /// Taking keys.
    Editing,
    /// The user pressed Enter.
    Committed,
    /// The user pressed Escape.
    Cancelled,
}

impl InputState {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled)
    }
}

/// The result of handing one key to an [`Interactive`] dialog.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    /// The key didn't do anything.
    Ignored,
    /// Visible state changed; the dialog needs redrawing before the next key.
    Changed,
    Committed,
    Cancelled,
}

impl From<Step> for InputState {
    /// The state a dialog is in after a key produced `step`.
    fn from(step: Step) -> Self {
        match step {
            Step::Committed => InputState::Committed,
            Step::Cancelled => InputState::Cancelled,
            Step::Ignored | Step::Changed => InputState::Editing,
        }
    }
}

/// A dialog driven by keys.
pub trait Interactive: Widget + Dialog {
    /// What [`Self::show`] returns.
    type Output;

    /// Apply one key. This is the whole state machine: no I/O, no waiting.
    fn handle_key(&mut self, key: Key) -> Step;

    /// The dialog's result as of now. After a cancel, inputs have already been cleared.
    fn output(&self) -> Self::Output;

    fn state(&self) -> InputState;

    /// Reset per-showing state before the first key.
    fn begin(&mut self);

    /// Show the dialog in `host` until the user presses Enter or Escape, then return [`Self::output`].
    ///
    /// The dialog is drawn once before the first poll, and again after every key that changes it, before the next
    /// poll, so the display always reflects every keystroke. Host errors are returned as-is.
    fn show(&mut self, host: &mut dyn Host) -> Result<Self::Output>
    where
        Self: Sized,
    {
        self.begin();
        host.update(self)?;
        loop {
            let key = match host.poll_key(POLL_TIMEOUT)? {
                Some(key) => key,
                None => continue,
            };
            match self.handle_key(key) {
                Step::Ignored => tracing::trace!(?key, "key ignored"),
                Step::Changed => {
                    self.config().surface().request_redraw();
                    host.update(self)?;
                }
                Step::Committed | Step::Cancelled => {
                    tracing::debug!(state = ?self.state(), "dialog finished");
                    return Ok(self.output());
                }
            }
        }
    }
}

/// Config and text accumulator, embedded in each dialog.
#[derive(Clone, Debug)]
pub(crate) struct DialogCore {
    config: Arc<StyleConfig>,
    user_input: String,
}

impl DialogCore {
    fn new(config: Arc<StyleConfig>, user_input: String) -> Self {
        Self { config, user_input }
    }
}

/// The frame around a dialog, unless the config says dialogs are borderless.
fn frame(config: &Arc<StyleConfig>, width: usize, height: usize) -> Result<Option<BorderBox>> {
    if config.style().borderless_dialog {
        return Ok(None);
    }
    BorderBox::new(width, height, "", config.clone()).map(Some)
}

/// Draw the frame if there is one, returning how far in the contents start.
fn render_frame(frame: &mut Option<BorderBox>, buffer: &mut Buffer, row: usize, column: usize) -> usize {
    match frame {
        Some(border) => {
            border.render(buffer, row, column);
            1
        }
        None => 0,
    }
}

/// The result of [`Dialogs::show`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// From a [`LineInputDialog`]; empty if cancelled.
    Line(String),
    /// From a [`MultiLineInputDialog`]; every input empty if cancelled.
    Fields(Vec<DialogField>),
    /// From a [`MessageDialog`]: `true` if dismissed with Enter.
    Acknowledged(bool),
}

/// Every kind of dialog.
#[enum_dispatch::enum_dispatch(Widget, Dialog)]
#[derive(Clone, Debug)]
pub enum Dialogs {
    ProgressDialog,
    LineInputDialog,
    MultiLineInputDialog,
    MessageDialog,
}

impl Dialogs {
    pub fn is_interactive(&self) -> bool {
        !matches!(self, Dialogs::ProgressDialog(_))
    }

    /// [`Interactive::show`] whichever dialog this is. Progress dialogs can't be shown this way, since they don't
    /// take input; that's an [`Error::InvalidArgument`].
    pub fn show(&mut self, host: &mut dyn Host) -> Result<Outcome> {
        match self {
            Dialogs::ProgressDialog(_) => Err(Error::invalid(
                "ProgressDialog doesn't take input, so it can't be shown",
            )),
            Dialogs::LineInputDialog(d) => d.show(host).map(Outcome::Line),
            Dialogs::MultiLineInputDialog(d) => d.show(host).map(Outcome::Fields),
            Dialogs::MessageDialog(d) => d.show(host).map(Outcome::Acknowledged),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        key::Filter,
        testing::{chars, config, ScriptedHost},
    };

    #[test]
    fn closed_set_dispatches_render_and_show() {
        let cfg = config();
        let mut dialogs: Vec<Dialogs> = vec![
            ProgressDialog::builder(cfg.clone()).build().unwrap().into(),
            LineInputDialog::new("name?", "", Filter::Printable, cfg.clone())
                .unwrap()
                .into(),
            MessageDialog::new("hello", cfg).unwrap().into(),
        ];
        assert!(!dialogs[0].is_interactive());
        assert!(dialogs[1].is_interactive());

        let mut buf = Buffer::new(5, 40);
        for d in dialogs.iter_mut() {
            let (h, w) = d.size();
            assert!(h <= 5 && w <= 40);
            d.render(&mut buf, 0, 0);
        }

        let mut host = ScriptedHost::typing(5, 40, chars("bob").chain([Key::Enter]));
        assert_eq!(dialogs[1].show(&mut host).unwrap(), Outcome::Line("bob".into()));
        assert_eq!(dialogs[1].user_input(), "bob");

        let mut host = ScriptedHost::typing(5, 40, [Key::Enter]);
        assert!(matches!(
            dialogs[0].show(&mut host),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(host.remaining(), 1);
        assert_eq!(
            dialogs[2].show(&mut host).unwrap(),
            Outcome::Acknowledged(true)
        );
    }
}
