use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Success,
    Warning,
    Error,
}

impl BannerKind {
    fn color(self) -> Color {
        match self {
            BannerKind::Info => Color::White,
            BannerKind::Success => Color::Green,
            BannerKind::Warning => Color::Yellow,
            BannerKind::Error => Color::Red,
        }
    }
}

/// One-line status area: the outcome of the last action, timestamped.
pub struct StatusBanner {
    entry: Option<(BannerKind, String, String)>,
}

impl StatusBanner {
    pub fn new() -> Self {
        Self { entry: None }
    }

    pub fn set(&mut self, kind: BannerKind, message: impl Into<String>) {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        self.entry = Some((kind, message.into(), timestamp));
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    #[allow(dead_code)]
    pub fn current(&self) -> Option<(BannerKind, &str)> {
        self.entry
            .as_ref()
            .map(|(kind, message, _)| (*kind, message.as_str()))
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let line = match &self.entry {
            Some((kind, message, timestamp)) => Line::from(vec![
                Span::styled(
                    format!("[{timestamp}] "),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(message.clone(), Style::default().fg(kind.color())),
            ]),
            None => Line::default(),
        };

        let paragraph =
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new()
    }
}
