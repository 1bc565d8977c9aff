use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    buffer::Buffer,
    config::StyleConfig,
    fmt::{Caption, FormattedExt, Text},
    key::{Filter, Key},
    widgets::{debug_check_fits, BorderBox, Widget},
    Error, Result,
};

use super::{
    frame,
    line_input::{content_width, fit_frame, PROMPT},
    render_frame, Dialog, DialogCore, InputState, Interactive, Step,
};

/// One labelled input of a [`MultiLineInputDialog`].
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogField {
    #[serde(with = "plain_caption")]
    pub label: Caption,
    /// What `user_input` is reset to whenever the fields are (re)installed.
    pub default: String,
    pub filter: Filter,
    #[serde(skip)]
    pub user_input: String,
}

impl DialogField {
    pub fn new(label: impl Into<Caption>, default: impl Into<String>, filter: Filter) -> Self {
        let default = default.into();
        Self {
            label: label.into(),
            user_input: default.clone(),
            default,
            filter,
        }
    }
}

/// Field lists come from config files as plain strings; styled labels are a code-only thing.
mod plain_caption {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::fmt::Caption;

    pub fn serialize<S: Serializer>(caption: &Caption, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(caption.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Caption, D::Error> {
        String::deserialize(d).map(Caption::Plain)
    }
}

#[derive(Clone, Debug)]
struct MultiLineCache {
    labels: Vec<Text>,
    border: Option<BorderBox>,
}

/// Several labelled inputs, one above the other, edited one at a time.
///
/// Tab moves to the next field, wrapping around at the end. Editing keys only ever touch the current field, whose
/// input line is drawn in the highlight color. Enter commits every field at once; Escape clears all of them and
/// cancels.
#[derive(Clone, Debug)]
pub struct MultiLineInputDialog {
    core: DialogCore,
    fields: Vec<DialogField>,
    current: usize,
    state: InputState,
    cache: MultiLineCache,
}

impl MultiLineInputDialog {
    /// Create a dialog over `fields`, which must not be empty. Every field's input starts out as its default.
    pub fn new(fields: Vec<DialogField>, config: Arc<StyleConfig>) -> Result<Self> {
        let fields = Self::reset(fields)?;
        let cache = Self::build_cache(&fields, &config)?;
        Ok(Self {
            core: DialogCore::new(config, String::new()),
            fields,
            current: 0,
            state: InputState::Idle,
            cache,
        })
    }

    fn reset(mut fields: Vec<DialogField>) -> Result<Vec<DialogField>> {
        if fields.is_empty() {
            return Err(Error::invalid("MultiLineInputDialog needs at least one field"));
        }
        for field in fields.iter_mut() {
            field.user_input = field.default.clone();
        }
        Ok(fields)
    }

    fn build_cache(fields: &[DialogField], config: &Arc<StyleConfig>) -> Result<MultiLineCache> {
        let fmt = config.style().text_format();
        let labels: Vec<Text> = fields.iter().map(|f| f.label.resolve(fmt)).collect();
        let border = frame(config, Self::width_of(&labels, fields) + 2, 2 * fields.len() + 2)?;
        Ok(MultiLineCache { labels, border })
    }

    fn width_of(labels: &[Text], fields: &[DialogField]) -> usize {
        labels
            .iter()
            .zip(fields)
            .map(|(label, field)| content_width(label, &field.user_input))
            .max()
            .unwrap_or(0)
    }

    fn content_width(&self) -> usize {
        Self::width_of(&self.cache.labels, &self.fields)
    }

    pub fn fields(&self) -> &[DialogField] {
        &self.fields
    }

    /// Replace every field, resetting their inputs to their defaults and going back to the first one.
    pub fn set_fields(&mut self, fields: Vec<DialogField>) -> Result<()> {
        let fields = Self::reset(fields)?;
        self.cache = Self::build_cache(&fields, &self.core.config)?;
        self.fields = fields;
        self.current = 0;
        self.core.config.surface().request_redraw();
        Ok(())
    }

    /// Index of the field being edited.
    pub fn current_field(&self) -> usize {
        self.current
    }

    pub fn set_current_field(&mut self, index: usize) -> Result<()> {
        if index >= self.fields.len() {
            return Err(Error::invalid(format!(
                "field {} out of range for {} fields",
                index,
                self.fields.len()
            )));
        }
        self.current = index;
        self.core.config.surface().request_redraw();
        Ok(())
    }

    fn current_mut(&mut self) -> &mut DialogField {
        &mut self.fields[self.current]
    }
}

impl Dialog for MultiLineInputDialog {
    fn config(&self) -> &Arc<StyleConfig> {
        &self.core.config
    }

    fn set_config(&mut self, config: Arc<StyleConfig>) -> Result<()> {
        self.cache = Self::build_cache(&self.fields, &config)?;
        self.core.config = config;
        self.core.config.surface().request_redraw();
        Ok(())
    }

    fn user_input(&self) -> &str {
        &self.fields[self.current].user_input
    }

    fn set_user_input(&mut self, input: String) {
        self.current_mut().user_input = input;
        let width = self.content_width();
        fit_frame(&mut self.cache.border, width);
    }
}

impl Interactive for MultiLineInputDialog {
    type Output = Vec<DialogField>;

    fn handle_key(&mut self, key: Key) -> Step {
        let step = match key {
            Key::Enter => Step::Committed,
            Key::Escape => {
                for field in self.fields.iter_mut() {
                    field.user_input.clear();
                }
                Step::Cancelled
            }
            Key::Tab => {
                self.current = (self.current + 1) % self.fields.len();
                tracing::debug!(current = self.current, "moved to next field");
                Step::Changed
            }
            k if k.is_erase() => match self.current_mut().user_input.pop() {
                Some(_) => Step::Changed,
                None => Step::Ignored,
            },
            k => match self.fields[self.current].filter.accept(k) {
                Some(ch) => {
                    self.current_mut().user_input.push(ch);
                    Step::Changed
                }
                None => Step::Ignored,
            },
        };
        self.state = step.into();
        let width = self.content_width();
        fit_frame(&mut self.cache.border, width);
        step
    }

    fn output(&self) -> Vec<DialogField> {
        self.fields.clone()
    }

    fn state(&self) -> InputState {
        self.state
    }

    fn begin(&mut self) {
        self.current = 0;
        self.state = InputState::Editing;
    }
}

impl Widget for MultiLineInputDialog {
    fn size(&self) -> (usize, usize) {
        let (height, width) = (2 * self.fields.len(), self.content_width());
        match self.cache.border {
            Some(_) => (height + 2, width + 2),
            None => (height, width),
        }
    }

    fn render(&mut self, buffer: &mut Buffer, row: usize, column: usize) {
        debug_check_fits(buffer, row, column, self.size());
        let offset = render_frame(&mut self.cache.border, buffer, row, column);
        let style = self.core.config.style();
        let (row, column) = (row + offset, column + offset);
        for (i, (label, field)) in self.cache.labels.iter().zip(&self.fields).enumerate() {
            let fmt = if i == self.current {
                style.highlight_format()
            } else {
                style.text_format()
            };
            label.render(buffer, row + 2 * i, column);
            Text::of(format!("{}{}", PROMPT, field.user_input))
                .fmt(fmt)
                .render(buffer, row + 2 * i + 1, column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fmt::Formatted,
        testing::{bordered, chars, config, config_with, ScriptedHost},
    };

    fn three() -> Vec<DialogField> {
        vec![
            DialogField::new("Name", "", Filter::Printable),
            DialogField::new("Age", "30", Filter::Digit),
            DialogField::new("City", "", Filter::Printable),
        ]
    }

    #[test]
    fn tab_wraps_around() {
        let mut d = MultiLineInputDialog::new(three(), config()).unwrap();
        d.set_current_field(1).unwrap();
        for _ in 0..3 {
            assert_eq!(d.handle_key(Key::Tab), Step::Changed);
        }
        assert_eq!(d.current_field(), 1);
        assert!(d.set_current_field(3).is_err());
    }

    #[test]
    fn edits_only_touch_the_current_field() {
        let mut d = MultiLineInputDialog::new(three(), config()).unwrap();
        d.handle_key(Key::Char('a'));
        d.handle_key(Key::Tab);
        for key in chars("x5").chain([Key::Backspace, Key::Backspace, Key::Char('7')]) {
            d.handle_key(key);
        }
        let inputs: Vec<_> = d.fields().iter().map(|f| f.user_input.as_str()).collect();
        assert_eq!(inputs, ["a", "37", ""]);
        assert_eq!(d.user_input(), "37");
    }

    #[test]
    fn escape_clears_every_field() {
        let mut d = MultiLineInputDialog::new(three(), config()).unwrap();
        for key in chars("ann").chain([Key::Tab, Key::Tab]).chain(chars("rome")) {
            d.handle_key(key);
        }
        assert_eq!(d.handle_key(Key::Escape), Step::Cancelled);
        assert!(d.output().iter().all(|f| f.user_input.is_empty()));
        assert_eq!(d.fields()[1].default, "30");
    }

    #[test]
    fn empty_field_list_is_invalid() {
        assert!(matches!(
            MultiLineInputDialog::new(vec![], config()),
            Err(Error::InvalidArgument(_))
        ));
        let mut d = MultiLineInputDialog::new(three(), config()).unwrap();
        assert!(d.set_fields(vec![]).is_err());
        assert_eq!(d.fields().len(), 3);
    }

    #[test]
    fn fields_start_from_their_defaults() {
        let mut fields = three();
        fields[0].user_input = "stale".into();
        let mut d = MultiLineInputDialog::new(fields, config()).unwrap();
        assert_eq!(d.fields()[0].user_input, "");
        assert_eq!(d.fields()[1].user_input, "30");

        d.handle_key(Key::Tab);
        d.handle_key(Key::Char('1'));
        d.set_fields(three()).unwrap();
        assert_eq!(d.current_field(), 0);
        assert_eq!(d.fields()[1].user_input, "30");
    }

    #[test]
    fn show_starts_at_the_first_field_and_commits_all() {
        let mut d = MultiLineInputDialog::new(three(), config()).unwrap();
        d.set_current_field(2).unwrap();
        let keys = chars("bo").chain([Key::Tab, Key::Backspace, Key::Tab]).chain(chars("oslo")).chain([Key::Enter]);
        let mut host = ScriptedHost::typing(6, 10, keys);
        let out = d.show(&mut host).unwrap();
        let inputs: Vec<_> = out.iter().map(|f| f.user_input.as_str()).collect();
        assert_eq!(inputs, ["bo", "3", "oslo"]);
        assert_eq!(d.state(), InputState::Committed);
        let expected = ["Name", "> bo", "Age", "> 3", "City", "> oslo"].map(|s| format!("{:10}", s));
        assert_eq!(host.frames.last().unwrap(), &expected);
    }

    #[test]
    fn current_input_is_highlighted() {
        let cfg = config_with(bordered());
        let mut d = MultiLineInputDialog::new(three(), cfg.clone()).unwrap();
        d.handle_key(Key::Tab);
        assert_eq!(d.size(), (8, 6));
        let mut buf = Buffer::new(8, 6);
        d.render(&mut buf, 0, 0);
        assert_eq!(buf.row_text(0), "╭────╮");
        assert_eq!(buf.row_text(3), "│Age │");
        assert_eq!(buf.row_text(4), "│> 30│");
        assert_eq!(buf.row_text(7), "╰────╯");

        let highlight = cfg.style().highlight_fg;
        let text = cfg.style().fg;
        assert_eq!(buf[4][1].get_fmt().fg, highlight);
        assert_eq!(buf[2][1].get_fmt().fg, text);
        assert_eq!(buf[3][1].get_fmt().fg, text);
    }

    #[test]
    fn fields_load_from_yaml() {
        let fields: Vec<DialogField> = serde_yaml::from_str(
            "- label: Port\n  default: \"8080\"\n  filter: digit\n- label: Host\n",
        )
        .unwrap();
        assert_eq!(fields[0].label, Caption::Plain("Port".into()));
        assert_eq!(fields[0].filter, Filter::Digit);
        assert_eq!(fields[1].filter, Filter::Printable);
        let d = MultiLineInputDialog::new(fields, config()).unwrap();
        assert_eq!(d.user_input(), "8080");
    }
}
