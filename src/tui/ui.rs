use crate::core::video::VideoId;
use crate::tui::app::{App, AppState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn draw(f: &mut Frame, app: &mut App) {
    match app.state.clone() {
        AppState::Home => draw_home(f, app),
        AppState::Loading { video_id } => draw_loading(f, app, &video_id),
        AppState::Chat => draw_chat(f, app),
    }
}

fn title_widget(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn help_widget(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn draw_home(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // URL input
            Constraint::Length(3), // Status
            Constraint::Min(1),    // Filler
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    f.render_widget(
        title_widget("TubeAsk - Ask anything about any YouTube video"),
        chunks[0],
    );

    app.url_input.render(f, chunks[1]);
    app.banner.render(f, chunks[2]);

    f.render_widget(help_widget("[Enter] Load Video  [Esc] Quit"), chunks[4]);
}

fn draw_loading(f: &mut Frame, app: &mut App, video_id: &VideoId) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // Video details
            Constraint::Length(3), // Status
            Constraint::Min(1),    // Filler
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    f.render_widget(title_widget("Loading video"), chunks[0]);

    let details = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Video ID: ", Style::default().fg(Color::Gray)),
            Span::styled(
                video_id.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Preview:  ", Style::default().fg(Color::Gray)),
            Span::raw(video_id.thumbnail_url()),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Video"));
    f.render_widget(details, chunks[1]);

    app.banner.render(f, chunks[2]);

    f.render_widget(help_widget("[Esc] Cancel"), chunks[4]);
}

fn draw_chat(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Video header
            Constraint::Min(5),    // Conversation or transcript
            Constraint::Length(3), // Chat input
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let header = match app.session.video_id() {
        Some(id) => format!("Video: {id}   Preview: {}", id.thumbnail_url()),
        None => String::new(),
    };
    let header = Paragraph::new(header)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title("TubeAsk"));
    f.render_widget(header, chunks[0]);

    if app.session.show_transcript() {
        if let Some(view) = &mut app.transcript_view {
            view.render(f, chunks[1]);
        }
    } else {
        app.chat_log
            .render(f, chunks[1], app.session.messages(), app.awaiting_answer);
    }

    app.chat_input.render(f, chunks[2]);
    app.banner.render(f, chunks[3]);

    let help = if app.session.show_transcript() {
        "[Up/Down PgUp/PgDn] Scroll  [Esc] Close Transcript  [Ctrl+C] Quit"
    } else {
        "[Enter] Ask  [Ctrl+S] Summarize  [Ctrl+T] Transcript  [Ctrl+L] Clear Chat  [Ctrl+N] New Video  [Ctrl+C] Quit"
    };
    f.render_widget(help_widget(help), chunks[4]);
}
