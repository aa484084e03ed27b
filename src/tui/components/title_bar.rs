//! # TitleBar Component
//!
//! Top line: app name, the three screen tabs, and the current notice.
//!
//! ```text
//!  Libris   Search │ Details │ Favorites    Added to favorites
//! ```
//!
//! Stateless: everything comes in as props, so the bar can be rendered and
//! tested without an `App`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::{Notice, NoticeLevel, Screen};
use crate::tui::component::Component;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct TitleBar<'a> {
    pub screen: Screen,
    pub notice: Option<&'a Notice>,
    pub is_searching: bool,
    pub spinner_frame: usize,
}

impl<'a> TitleBar<'a> {
    pub fn new(screen: Screen, notice: Option<&'a Notice>) -> Self {
        Self {
            screen,
            notice,
            is_searching: false,
            spinner_frame: 0,
        }
    }

    pub fn searching(mut self, is_searching: bool, spinner_frame: usize) -> Self {
        self.is_searching = is_searching;
        self.spinner_frame = spinner_frame;
        self
    }

    fn notice_style(level: NoticeLevel) -> Style {
        match level {
            NoticeLevel::Info => Style::default().fg(Color::Green),
            NoticeLevel::Warning => Style::default().fg(Color::Yellow),
            NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " Libris ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];

        for (i, screen) in Screen::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            let style = if *screen == self.screen {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", screen.label()), style));
        }

        if self.is_searching {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(
                format!("   {spinner} Searching"),
                Style::default().fg(Color::Cyan),
            ));
        } else if let Some(notice) = self.notice {
            spans.push(Span::styled(
                format!("   {}", notice.text),
                Self::notice_style(notice.level),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
