use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Single-line text input. The cursor is tracked in characters, not bytes, so
/// editing works on multibyte text.
#[derive(Debug, Clone)]
pub struct InputField {
    pub value: String,
    cursor: usize,
    placeholder: String,
    label: String,
    pub focused: bool,
}

impl InputField {
    pub fn new(label: &str, placeholder: &str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.to_string(),
            label: label.to_string(),
            focused: false,
        }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.value.len())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                let index = self.byte_index();
                self.value.insert(index, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let index = self.byte_index();
                    self.value.remove(index);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let index = self.byte_index();
                    self.value.remove(index);
                }
                true
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                true
            }
            KeyCode::Right => {
                if self.cursor < self.value.chars().count() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Drain the current value, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.label.as_str())
            .border_style(if self.focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            });

        let text = if self.value.is_empty() {
            Line::from(Span::styled(
                &self.placeholder,
                Style::default().fg(Color::DarkGray),
            ))
        } else if self.focused {
            let (mut before, after) = self.value.split_at(self.byte_index());

            // Keep the cursor in view when the value is wider than the field.
            let inner_width = area.width.saturating_sub(2).max(1) as usize;
            while before.width() + 1 > inner_width {
                let mut indices = before.char_indices();
                indices.next();
                match indices.next() {
                    Some((offset, _)) => before = &before[offset..],
                    None => break,
                }
            }

            Line::from(vec![
                Span::raw(before),
                Span::styled("│", Style::default().fg(Color::Yellow)),
                Span::raw(after),
            ])
        } else {
            Line::from(Span::raw(&self.value))
        };

        let paragraph = Paragraph::new(text).block(block);
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::InputField;
    use crossterm::event::{KeyCode, KeyEvent};

    fn press(field: &mut InputField, code: KeyCode) {
        field.handle_key(KeyEvent::from(code));
    }

    fn type_str(field: &mut InputField, text: &str) {
        for c in text.chars() {
            press(field, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_and_backspace() {
        let mut field = InputField::new("URL", "");
        type_str(&mut field, "abc");
        press(&mut field, KeyCode::Backspace);
        assert_eq!(field.value, "ab");
    }

    #[test]
    fn editing_multibyte_text_keeps_boundaries() {
        let mut field = InputField::new("Chat", "");
        type_str(&mut field, "héllo");
        press(&mut field, KeyCode::Home);
        press(&mut field, KeyCode::Right);
        press(&mut field, KeyCode::Delete);
        assert_eq!(field.value, "hllo");
        press(&mut field, KeyCode::Char('é'));
        assert_eq!(field.value, "héllo");
    }

    #[test]
    fn insert_in_the_middle() {
        let mut field = InputField::new("Chat", "");
        type_str(&mut field, "ac");
        press(&mut field, KeyCode::Left);
        press(&mut field, KeyCode::Char('b'));
        assert_eq!(field.value, "abc");
    }

    #[test]
    fn take_drains_the_field() {
        let mut field = InputField::new("Chat", "");
        type_str(&mut field, "a question");
        assert_eq!(field.take(), "a question");
        assert_eq!(field.value, "");
        assert!(!field.is_valid());
    }
}
