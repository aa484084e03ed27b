//! # SearchInput Component
//!
//! Single-line query box. The buffer is internal state; whether it has focus
//! is a prop set by the parent each frame.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchInput
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInputEvent {
    /// Enter pressed. Carries the raw text; validation happens in core.
    Submit(String),
    /// Down or Esc: hand focus to the result list.
    FocusResults,
    /// The buffer changed.
    Edited,
}

pub struct SearchInput {
    pub buffer: String,
    /// Prop
    pub focused: bool,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchInput {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            focused: true,
        }
    }
}

impl EventHandler for SearchInput {
    type Event = SearchInputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchInputEvent> {
        match event {
            TuiEvent::InputChar(c) if !c.is_control() => {
                self.buffer.push(*c);
                Some(SearchInputEvent::Edited)
            }
            TuiEvent::Paste(text) => {
                // Queries are one line
                self.buffer.push_str(&text.replace(['\r', '\n'], " "));
                Some(SearchInputEvent::Edited)
            }
            TuiEvent::Backspace => {
                self.buffer.pop().map(|_| SearchInputEvent::Edited)
            }
            TuiEvent::Submit => Some(SearchInputEvent::Submit(self.buffer.clone())),
            TuiEvent::CursorDown | TuiEvent::Escape => Some(SearchInputEvent::FocusResults),
            _ => None,
        }
    }
}

impl Component for SearchInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(" Search books ")
            .border_style(border_style);

        let inner_width = area.width.saturating_sub(2) as usize;
        let text_width = self.buffer.width();
        // Keep the tail visible when the query is wider than the box
        let horizontal_scroll = text_width.saturating_sub(inner_width.saturating_sub(1));

        let paragraph = Paragraph::new(self.buffer.as_str())
            .block(block)
            .scroll((0, horizontal_scroll as u16));
        frame.render_widget(paragraph, area);

        if self.focused && area.width > 2 && area.height > 2 {
            let cursor_x = area.x + 1 + (text_width - horizontal_scroll) as u16;
            frame.set_cursor_position(Position::new(
                cursor_x.min(area.x + area.width - 2),
                area.y + 1,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(input: &mut SearchInput, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut input = SearchInput::new();
        type_text(&mut input, "dune");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(SearchInputEvent::Submit("dune".to_string()))
        );
        // Submitting keeps the text so the user can refine it
        assert_eq!(input.buffer, "dune");
    }

    #[test]
    fn test_backspace() {
        let mut input = SearchInput::new();
        type_text(&mut input, "dun");
        assert_eq!(input.handle_event(&TuiEvent::Backspace), Some(SearchInputEvent::Edited));
        assert_eq!(input.buffer, "du");
    }

    #[test]
    fn test_backspace_on_empty_is_silent() {
        let mut input = SearchInput::new();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = SearchInput::new();
        input.handle_event(&TuiEvent::Paste("frank\nherbert".to_string()));
        assert_eq!(input.buffer, "frank herbert");
    }

    #[test]
    fn test_down_and_escape_focus_results() {
        let mut input = SearchInput::new();
        assert_eq!(
            input.handle_event(&TuiEvent::CursorDown),
            Some(SearchInputEvent::FocusResults)
        );
        assert_eq!(
            input.handle_event(&TuiEvent::Escape),
            Some(SearchInputEvent::FocusResults)
        );
    }

    #[test]
    fn test_render_shows_buffer() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = SearchInput::new();
        type_text(&mut input, "hyperion");
        terminal
            .draw(|f| {
                input.render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("hyperion"));
        assert!(text.contains("Search books"));
    }
}
