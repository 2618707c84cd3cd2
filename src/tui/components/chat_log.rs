use crate::session::{Message, Role};
use crate::tui::markdown::render_markdown;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Scrollable chat history. Follows the newest message until the user scrolls
/// away, then resumes following once they scroll back to the bottom.
pub struct ChatLog {
    scroll: usize,
    follow: bool,
    viewport: usize,
    total_rows: usize,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            follow: true,
            viewport: 1,
            total_rows: 0,
        }
    }

    pub fn follow_bottom(&mut self) {
        self.follow = true;
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
        self.follow = true;
        self.total_rows = 0;
    }

    fn max_scroll(&self) -> usize {
        self.total_rows.saturating_sub(self.viewport)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                self.follow = false;
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                self.follow = self.scroll == self.max_scroll();
                true
            }
            KeyCode::PageUp => {
                self.follow = false;
                self.scroll = self.scroll.saturating_sub(self.viewport);
                true
            }
            KeyCode::PageDown => {
                self.scroll = (self.scroll + self.viewport).min(self.max_scroll());
                self.follow = self.scroll == self.max_scroll();
                true
            }
            KeyCode::Home => {
                self.follow = false;
                self.scroll = 0;
                true
            }
            KeyCode::End => {
                self.scroll = self.max_scroll();
                self.follow = true;
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, messages: &[Message], thinking: bool) {
        let width = area.width.saturating_sub(2).max(1) as usize;
        let lines = build_lines(messages, thinking, width);

        self.viewport = area.height.saturating_sub(2).max(1) as usize;
        self.total_rows = lines.len();
        if self.follow {
            self.scroll = self.max_scroll();
        } else {
            self.scroll = self.scroll.min(self.max_scroll());
        }

        let visible: Vec<Line> = lines
            .into_iter()
            .skip(self.scroll)
            .take(self.viewport)
            .collect();

        let paragraph = Paragraph::new(visible)
            .block(Block::default().borders(Borders::ALL).title("Conversation"));
        f.render_widget(paragraph, area);
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

fn build_lines(messages: &[Message], thinking: bool, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    if messages.is_empty() && !thinking {
        lines.push(Line::from(Span::styled(
            "Ask anything about this video, e.g. \"What is the main topic?\"",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for message in messages {
        match message.role {
            Role::User => {
                for (i, wrapped) in textwrap::wrap(&message.content, width.saturating_sub(5))
                    .iter()
                    .enumerate()
                {
                    let prefix = if i == 0 { "You: " } else { "     " };
                    lines.push(Line::from(vec![
                        Span::styled(
                            prefix,
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(wrapped.to_string()),
                    ]));
                }
            }
            Role::Assistant => {
                lines.push(Line::from(Span::styled(
                    "Assistant:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                lines.extend(render_markdown(&message.content, width));
            }
        }
        lines.push(Line::default());
    }

    if thinking {
        lines.push(Line::from(Span::styled(
            "Thinking...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::{ChatLog, build_lines};
    use crate::session::Message;
    use crossterm::event::{KeyCode, KeyEvent};

    fn log_with_extents(viewport: usize, total_rows: usize) -> ChatLog {
        let mut log = ChatLog::new();
        log.viewport = viewport;
        log.total_rows = total_rows;
        log.scroll = log.max_scroll();
        log
    }

    #[test]
    fn scrolling_stays_within_bounds() {
        let mut log = log_with_extents(10, 25);
        assert_eq!(log.scroll, 15);

        log.handle_key(KeyEvent::from(KeyCode::Down));
        assert_eq!(log.scroll, 15);

        log.handle_key(KeyEvent::from(KeyCode::Home));
        assert_eq!(log.scroll, 0);
        log.handle_key(KeyEvent::from(KeyCode::Up));
        assert_eq!(log.scroll, 0);
    }

    #[test]
    fn scrolling_up_stops_following() {
        let mut log = log_with_extents(10, 25);
        assert!(log.follow);

        log.handle_key(KeyEvent::from(KeyCode::Up));
        assert!(!log.follow);

        log.handle_key(KeyEvent::from(KeyCode::End));
        assert!(log.follow);
    }

    #[test]
    fn empty_history_shows_a_hint() {
        let lines = build_lines(&[], false, 80);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn user_lines_are_prefixed_and_assistant_is_rendered() {
        let messages = vec![
            Message::user("what is this about?"),
            Message::assistant("**Nothing** much"),
        ];
        let lines = build_lines(&messages, false, 80);
        let rendered: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert!(rendered.iter().any(|l| l.starts_with("You: what")));
        assert!(rendered.iter().any(|l| l == "Assistant:"));
        assert!(rendered.iter().any(|l| l.contains("Nothing")));
    }

    #[test]
    fn thinking_indicator_is_appended() {
        let lines = build_lines(&[Message::user("q")], true, 80);
        let last: String = lines
            .last()
            .unwrap()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(last, "Thinking...");
    }
}
