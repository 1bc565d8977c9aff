use std::sync::Arc;

use crate::{
    buffer::Buffer,
    config::StyleConfig,
    fmt::{Caption, Text},
    widgets::{debug_check_fits, BorderBox, Marker, ProgressBar, Widget},
    Result,
};

use super::{frame, render_frame, Dialog, DialogCore};

/// Where a [`ProgressDialog`] is in its lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lifecycle {
    /// Drawing normally.
    Active,
    /// Complete, with destroy-on-complete set: the next render asks the surface to delete the dialog instead.
    PendingDestroy,
    /// The delete request has been sent; renders do nothing.
    Removed,
}

#[derive(Clone, Debug)]
struct ProgressCache {
    label: Text,
    bar: ProgressBar,
    border: Option<BorderBox>,
}

/// A label over a progress bar, optionally framed.
///
/// With adaptive width on, the bar is exactly as wide as the label. With destroy-on-complete on, the dialog removes
/// itself from the display once its value reaches the maximum (see [`Lifecycle`]).
#[derive(Clone, Debug)]
pub struct ProgressDialog {
    core: DialogCore,
    label: Caption,
    value: i64,
    maximum: i64,
    width: usize,
    progress_marker: Marker,
    empty_marker: Marker,
    adaptive_width: bool,
    destroy_on_complete: bool,
    lifecycle: Lifecycle,
    cache: ProgressCache,
}

/// Builder for [`ProgressDialog`]; see [`ProgressDialog::builder`].
pub struct ProgressDialogBuilder {
    config: Arc<StyleConfig>,
    label: Caption,
    value: i64,
    maximum: i64,
    width: usize,
    progress_marker: Marker,
    empty_marker: Marker,
    adaptive_width: bool,
    destroy_on_complete: bool,
}

impl ProgressDialogBuilder {
    crate::util::setters! {
        label(l: impl Into<Caption>) => label = l.into(),
        value(v: i64) => value = v,
        /// Must be greater than 0, or [`Self::build`] fails.
        maximum(m: i64) => maximum = m,
        /// Ignored while adaptive width is on.
        width(w: usize) => width = w,
        progress_marker(m: impl Into<Marker>) => progress_marker = m.into(),
        empty_marker(m: impl Into<Marker>) => empty_marker = m.into(),
        adaptive_width(v: bool) => adaptive_width = v,
        destroy_on_complete(v: bool) => destroy_on_complete = v,
    }

    pub fn build(self) -> Result<ProgressDialog> {
        let bar = ProgressBar::new(self.value, self.maximum, self.width, self.config.clone())?;
        let mut dialog = ProgressDialog {
            core: DialogCore::new(self.config, String::new()),
            label: self.label,
            value: self.value,
            maximum: self.maximum,
            width: self.width,
            progress_marker: self.progress_marker,
            empty_marker: self.empty_marker,
            adaptive_width: self.adaptive_width,
            destroy_on_complete: self.destroy_on_complete,
            lifecycle: Lifecycle::Active,
            cache: ProgressCache {
                label: Text::plain(""),
                bar,
                border: None,
            },
        };
        dialog.recompute()?;
        Ok(dialog)
    }
}

impl ProgressDialog {
    /// Start building a dialog labelled "Progress dialog", going from 0 to 100, with adaptive width and
    /// destroy-on-complete on.
    pub fn builder(config: Arc<StyleConfig>) -> ProgressDialogBuilder {
        ProgressDialogBuilder {
            config,
            label: "Progress dialog".into(),
            value: 0,
            maximum: 100,
            width: 20,
            progress_marker: ProgressBar::DEFAULT_PROGRESS_MARKER.into(),
            empty_marker: ' '.into(),
            adaptive_width: true,
            destroy_on_complete: true,
        }
    }

    /// Rebuild the label, bar and frame from the current properties, then re-check for completion. Until the dialog
    /// is removed, completion follows the current value and settings, so it can be undone.
    fn recompute(&mut self) -> Result<()> {
        let config = &self.core.config;
        let label = self.label.resolve(config.style().text_format());
        if self.adaptive_width {
            self.width = label.len();
        }
        let bar = ProgressBar::with_markers(
            self.value,
            self.maximum,
            self.width,
            self.progress_marker.clone(),
            self.empty_marker.clone(),
            config.clone(),
        )?;
        let border = frame(config, self.width.max(label.len()) + 2, 4)?;
        tracing::trace!(width = self.width, "rebuilding progress dialog cache");
        self.cache = ProgressCache { label, bar, border };
        if self.lifecycle != Lifecycle::Removed {
            self.lifecycle = if self.destroy_on_complete && self.value == self.maximum {
                Lifecycle::PendingDestroy
            } else {
                Lifecycle::Active
            };
        }
        Ok(())
    }

    /// Recompute, and only then ask for a redraw.
    fn changed(&mut self) -> Result<()> {
        self.recompute()?;
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

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn set_value(&mut self, value: i64) -> Result<()> {
        self.value = value;
        self.changed()
    }

    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    /// Set the maximum, which must be greater than 0. On error nothing changes.
    pub fn set_maximum(&mut self, maximum: i64) -> Result<()> {
        crate::widgets::fill_length(self.value, maximum, self.width)?;
        self.maximum = maximum;
        self.changed()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Set the bar width. While adaptive width is on, this snaps straight back to the label's length.
    pub fn set_width(&mut self, width: usize) -> Result<()> {
        self.width = width;
        self.changed()
    }

    pub fn adaptive_width(&self) -> bool {
        self.adaptive_width
    }

    pub fn set_adaptive_width(&mut self, adaptive: bool) -> Result<()> {
        self.adaptive_width = adaptive;
        self.changed()
    }

    pub fn destroy_on_complete(&self) -> bool {
        self.destroy_on_complete
    }

    pub fn set_destroy_on_complete(&mut self, destroy: bool) -> Result<()> {
        self.destroy_on_complete = destroy;
        self.changed()
    }

    pub fn set_progress_marker(&mut self, marker: impl Into<Marker>) -> Result<()> {
        self.progress_marker = marker.into();
        self.changed()
    }

    pub fn set_empty_marker(&mut self, marker: impl Into<Marker>) -> Result<()> {
        self.empty_marker = marker.into();
        self.changed()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

impl Dialog for ProgressDialog {
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
    }
}

impl Widget for ProgressDialog {
    fn size(&self) -> (usize, usize) {
        let width = self.width.max(self.cache.label.len());
        match self.cache.border {
            Some(_) => (4, width + 2),
            None => (2, width),
        }
    }

    fn render(&mut self, buffer: &mut Buffer, row: usize, column: usize) {
        match self.lifecycle {
            Lifecycle::Removed => return,
            Lifecycle::PendingDestroy => {
                tracing::debug!(row, column, "progress complete, removing dialog");
                self.core.config.surface().delete(row, column);
                self.lifecycle = Lifecycle::Removed;
                return;
            }
            Lifecycle::Active => (),
        }
        debug_check_fits(buffer, row, column, self.size());
        let offset = render_frame(&mut self.cache.border, buffer, row, column);
        self.cache.label.render(buffer, row + offset, column + offset);
        self.cache.bar.render(buffer, row + offset + 1, column + offset);
    }
}
