//! # Book Details Component
//!
//! Full view of one record: title, authors, publication date, description,
//! and the thumbnail URL. The body is pre-wrapped with `textwrap` so the
//! ScrollView canvas height is known before rendering.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::book::BookRecord;
use crate::tui::component::Component;

/// Scrollbar column
const SCROLLBAR_WIDTH: u16 = 1;

pub struct BookDetails<'a> {
    book: Option<&'a BookRecord>,
    scroll: &'a mut ScrollViewState,
}

impl<'a> BookDetails<'a> {
    pub fn new(book: Option<&'a BookRecord>, scroll: &'a mut ScrollViewState) -> Self {
        Self { book, scroll }
    }
}

fn wrap_into<'t>(lines: &mut Vec<Line<'t>>, text: &str, width: usize, style: Style) {
    let options = textwrap::Options::new(width.max(1))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(Line::default());
            continue;
        }
        for wrapped in textwrap::wrap(paragraph, &options) {
            lines.push(Line::from(Span::styled(wrapped.into_owned(), style)));
        }
    }
}

/// Builds the body lines for `book` at the given content width.
pub fn detail_lines(book: &BookRecord, width: usize) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    wrap_into(
        &mut lines,
        book.display_title(),
        width,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    );
    wrap_into(&mut lines, &book.display_authors(), width, Style::default().fg(Color::Cyan));
    if let Some(date) = book.published() {
        lines.push(Line::from(vec![
            Span::styled("Published ", label),
            Span::raw(date.to_string()),
        ]));
    }
    lines.push(Line::default());

    wrap_into(&mut lines, book.display_description(), width, Style::default());

    if let Some(url) = book.thumbnail() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Cover", label)));
        wrap_into(&mut lines, url, width, Style::default().fg(Color::Blue));
    }
    lines
}

impl Component for BookDetails<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Details ")
            .title_bottom(Line::from(" a Add to favorites  ↑↓ Scroll  Esc Back ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(book) = self.book else {
            let empty = Paragraph::new("No book selected.")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, inner);
            return;
        };

        let content_width = inner.width.saturating_sub(SCROLLBAR_WIDTH);
        if content_width == 0 || inner.height == 0 {
            return;
        }
        let lines = detail_lines(book, content_width as usize);
        let canvas_height = canvas_height(lines.len());

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(0, 0, content_width, canvas_height),
        );
        frame.render_stateful_widget(scroll_view, inner, self.scroll);
    }
}

/// Scroll canvas height for `line_count` lines, saturating at the u16 limit.
fn canvas_height(line_count: usize) -> u16 {
    u16::try_from(line_count).unwrap_or(u16::MAX).max(1)
}
