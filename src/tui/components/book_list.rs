//! # Book List Component
//!
//! Scrollable list of books used by both the search results and the
//! favorites screen.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BookListState` lives in `TuiState`
//! - `BookList` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::book::BookRecord;
use crate::tui::component::Component;

/// Persistent selection state for a book list.
#[derive(Default)]
pub struct BookListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl BookListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = self.selected.saturating_sub(1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Back to the first row (new result set).
    pub fn reset(&mut self, len: usize) {
        self.selected = 0;
        self.list_state = ListState::default();
        if len > 0 {
            self.list_state.select(Some(0));
        }
    }

    /// Keeps the selection inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

/// Transient render wrapper.
pub struct BookList<'a> {
    books: &'a [BookRecord],
    state: &'a mut BookListState,
    title: &'a str,
    help: &'a str,
    empty_text: &'a str,
    /// Whether the list has keyboard focus (selection is highlighted).
    focused: bool,
    /// Row style override for the selected row, e.g. pending delete.
    selected_style: Option<Style>,
}

impl<'a> BookList<'a> {
    pub fn new(books: &'a [BookRecord], state: &'a mut BookListState, title: &'a str) -> Self {
        Self {
            books,
            state,
            title,
            help: "",
            empty_text: "Nothing here yet.",
            focused: true,
            selected_style: None,
        }
    }

    pub fn help(mut self, help: &'a str) -> Self {
        self.help = help;
        self
    }

    pub fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn selected_style(mut self, style: Style) -> Self {
        self.selected_style = Some(style);
        self
    }
}

impl Component for BookList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Left)
            .padding(Padding::horizontal(1));
        if !self.help.is_empty() {
            block = block.title_bottom(Line::from(self.help).centered());
        }

        if self.books.is_empty() {
            let empty = Paragraph::new(self.empty_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        self.state.clamp(self.books.len());
        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding

        let items: Vec<ListItem> = self
            .books
            .iter()
            .enumerate()
            .map(|(i, book)| {
                let is_selected = self.focused && i == self.state.selected;
                let style = if is_selected {
                    self.selected_style.unwrap_or_else(|| {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    })
                } else {
                    Style::default().fg(Color::Gray)
                };
                let meta_style = if is_selected {
                    style
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                let meta = match book.published() {
                    Some(date) => format!("  {} · {}", book.display_authors(), date),
                    None => format!("  {}", book.display_authors()),
                };
                let title_width = inner_width.saturating_sub(meta.width().min(inner_width / 2));
                let title = truncate_str(book.display_title(), title_width);
                let meta = truncate_str(&meta, inner_width.saturating_sub(title.width()));
                let padding = inner_width.saturating_sub(title.width() + meta.width());

                ListItem::new(Line::from(vec![
                    Span::styled(title, style),
                    Span::styled(meta, meta_style),
                    Span::styled(" ".repeat(padding), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` display columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}
