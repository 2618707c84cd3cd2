use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Read-only view of the raw transcript. The transcript is one long string,
/// so wrapping happens here and scrolling is by wrapped row.
pub struct TranscriptView {
    content: String,
    word_count: usize,
    scroll: usize,
    viewport: usize,
    total_rows: usize,
}

impl TranscriptView {
    pub fn new(content: String) -> Self {
        let word_count = content.split_whitespace().count();
        Self {
            content,
            word_count,
            scroll: 0,
            viewport: 1,
            total_rows: 0,
        }
    }

    fn max_scroll(&self) -> usize {
        self.total_rows.saturating_sub(self.viewport)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                true
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(self.viewport);
                true
            }
            KeyCode::PageDown => {
                self.scroll = (self.scroll + self.viewport).min(self.max_scroll());
                true
            }
            KeyCode::Home => {
                self.scroll = 0;
                true
            }
            KeyCode::End => {
                self.scroll = self.max_scroll();
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(2).max(1) as usize;
        let wrapped = textwrap::wrap(&self.content, width);

        self.viewport = area.height.saturating_sub(2).max(1) as usize;
        self.total_rows = wrapped.len();
        self.scroll = self.scroll.min(self.max_scroll());

        let lines: Vec<Line> = wrapped
            .iter()
            .skip(self.scroll)
            .take(self.viewport)
            .map(|row| Line::raw(row.to_string()))
            .collect();

        let title = format!("Raw Transcript ({} words)", self.word_count);
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(paragraph, area);
    }
}
