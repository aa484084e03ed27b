use crate::core::state::{App, Screen};
use crate::tui::component::Component;
use crate::tui::components::{BookDetails, BookList, FavoritesList, TitleBar};
use crate::tui::{SearchFocus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.screen, app.notice.as_ref())
        .searching(app.is_searching, spinner_frame)
        .render(frame, title_area);

    match app.screen {
        Screen::Search => draw_search(frame, main_area, app, tui),
        Screen::Details => {
            BookDetails::new(app.details.as_ref(), &mut tui.details_scroll)
                .render(frame, main_area);
        }
        Screen::Favorites => {
            FavoritesList::new(
                &app.favorites_snapshot,
                &mut tui.favorites,
                app.favorites_loaded,
            )
            .render(frame, main_area);
        }
    }

    frame.render_widget(
        Span::styled(help_line(app.screen), Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn draw_search(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [input_area, results_area] = Layout::vertical([Length(3), Min(0)]).areas(area);

    tui.search_input.focused = tui.focus == SearchFocus::Input;
    tui.search_input.render(frame, input_area);

    let title = match &app.last_query {
        Some(query) if !app.results.is_empty() => {
            format!("Results for \"{}\" ({})", query, app.results.len())
        }
        _ => "Results".to_string(),
    };
    let empty_text = if app.is_searching {
        "Searching..."
    } else if app.last_query.is_some() {
        "No results."
    } else {
        "Type a title, author or keyword and press Enter."
    };
    BookList::new(&app.results, &mut tui.results, &title)
        .focused(tui.focus == SearchFocus::Results)
        .empty_text(empty_text)
        .render(frame, results_area);
}

fn help_line(screen: Screen) -> &'static str {
    match screen {
        Screen::Search => " Enter Search/Open  ↓ Results  Esc Back to input  Tab Switch  Ctrl+C Quit",
        Screen::Details => " a Add to favorites  ↑↓ PgUp PgDn Scroll  Esc Back  Tab Switch  Ctrl+C Quit",
        Screen::Favorites => " Enter Open  d d Remove  X X Clear all  Tab Switch  Ctrl+C Quit",
    }
}
