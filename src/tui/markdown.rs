//! Renders model answers (Markdown) into styled, width-wrapped ratatui lines.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

pub fn render_markdown(text: &str, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut renderer = Renderer::new(width);

    for event in Parser::new_ext(text, Options::empty()) {
        renderer.event(event);
    }

    renderer.finish()
}

struct Renderer {
    width: usize,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    bold: usize,
    italic: usize,
    heading: bool,
}

impl Renderer {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current: Vec::new(),
            bold: 0,
            italic: 0,
            heading: false,
        }
    }

    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.heading {
            style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.current);
        self.lines.extend(wrap_spans(spans, self.width));
    }

    fn blank_line(&mut self) {
        if !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
    }

    fn event(&mut self, event: Event) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                self.flush();
                self.blank_line();
                self.heading = true;
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush();
                self.heading = false;
            }
            Event::Start(Tag::Paragraph) => {
                self.flush();
                self.blank_line();
            }
            Event::End(TagEnd::Paragraph) => self.flush(),
            Event::Start(Tag::Item) => {
                self.flush();
                self.current
                    .push(Span::styled("• ", Style::default().fg(Color::Green)));
            }
            Event::End(TagEnd::Item) => self.flush(),
            Event::Start(Tag::Strong) => self.bold += 1,
            Event::End(TagEnd::Strong) => self.bold = self.bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.italic += 1,
            Event::End(TagEnd::Emphasis) => self.italic = self.italic.saturating_sub(1),
            Event::Text(text) => {
                let style = self.style();
                self.current.push(Span::styled(text.into_string(), style));
            }
            Event::Code(code) => {
                self.current.push(Span::styled(
                    code.into_string(),
                    Style::default().fg(Color::Cyan),
                ));
            }
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(self.width),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.lines
    }
}

/// Word-wrap a run of styled spans to the given display width, preserving
/// each fragment's style across line breaks.
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0usize;

    for span in spans {
        for word in span.content.split_inclusive(' ') {
            let word_width = word.trim_end().width();
            if current_width + word_width > width && current_width > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
                current_width = 0;
            }
            current_width += word.width();
            current.push(Span::styled(word.to_string(), span.style));
        }
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::render_markdown;
    use ratatui::style::Modifier;
    use ratatui::text::Line;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn renders_plain_paragraph() {
        let lines = render_markdown("hello world", 80);
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), "hello world");
    }

    #[test]
    fn headings_are_bold() {
        let lines = render_markdown("# Summary", 80);
        let heading = lines.iter().find(|l| text_of(l) == "Summary").unwrap();
        assert!(
            heading.spans[0]
                .style
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }

    #[test]
    fn strong_text_is_bold() {
        let lines = render_markdown("plain **important** plain", 80);
        let line = &lines[0];
        let bold_span = line
            .spans
            .iter()
            .find(|s| s.content.trim() == "important")
            .unwrap();
        assert!(bold_span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn list_items_get_bullets() {
        let lines = render_markdown("- first\n- second", 80);
        let rendered: Vec<String> = lines.iter().map(text_of).collect();
        assert!(rendered.contains(&"• first".to_string()));
        assert!(rendered.contains(&"• second".to_string()));
    }

    #[test]
    fn long_paragraphs_wrap_to_width() {
        let lines = render_markdown(&"word ".repeat(50), 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_of(line).trim_end().len() <= 20);
        }
    }
}
