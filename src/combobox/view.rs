//! Rendering for the combobox.

use super::Model;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthChar;

/// Marker drawn in front of the highlighted option.
pub const HIGHLIGHT_MARKER: &str = "› ";

/// Styles used by [`Model::view`].
#[derive(Debug, Clone)]
pub struct Styles {
    /// The prompt.
    pub prompt: Style,
    /// Typed text.
    pub text: Style,
    /// Placeholder text.
    pub placeholder: Style,
    /// The inline-completed suffix.
    pub completion: Style,
    /// A visible option.
    pub option: Style,
    /// The highlighted option.
    pub highlighted: Style,
}

/// The default combobox styles.
pub fn default_styles() -> Styles {
    Styles {
        prompt: Style::new(),
        text: Style::new(),
        placeholder: Style::new().foreground(Color::from("240")),
        completion: Style::new().reverse(true),
        option: Style::new().padding(0, 0, 0, 2),
        highlighted: Style::new().foreground(Color::from("212")),
    }
}

impl Default for Styles {
    fn default() -> Self {
        default_styles()
    }
}

/// Cuts `s` to at most `width` terminal cells. 0 means no limit.
fn truncate(s: &str, width: usize) -> String {
    if width == 0 {
        return s.to_string();
    }
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

impl<I: Clone + Send + 'static> Model<I> {
    /// Renders the input line and, while open, one line per visible option.
    pub fn view(&self) -> String {
        let mut lines = vec![self.input_view()];
        if self.listbox.is_open() {
            let highlight = self.listbox.highlighted();
            for option in self.listbox.visible_options() {
                let text = truncate(option.text(), self.width);
                if Some(option.id()) == highlight {
                    lines.push(
                        self.styles
                            .highlighted
                            .render(&format!("{HIGHLIGHT_MARKER}{text}")),
                    );
                } else {
                    lines.push(self.styles.option.render(&text));
                }
            }
        }
        lines.join("\n")
    }

    fn input_view(&self) -> String {
        let prompt = self.styles.prompt.render(&self.prompt);
        let value = self.input.value();
        if value.is_empty() {
            let placeholder = truncate(&self.placeholder, self.width);
            if placeholder.is_empty() {
                return prompt;
            }
            return format!("{prompt}{}", self.styles.placeholder.render(&placeholder));
        }

        let value = truncate(&value, self.width);
        let chars: Vec<char> = value.chars().collect();
        let split = self
            .input
            .selection()
            .map_or(chars.len(), |range| range.start.min(chars.len()));
        let typed: String = chars[..split].iter().collect();
        let completed: String = chars[split..].iter().collect();

        let mut v = prompt;
        v.push_str(&self.styles.text.render(&typed));
        if !completed.is_empty() {
            v.push_str(&self.styles.completion.render(&completed));
        }
        v
    }
}
