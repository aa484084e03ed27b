//! # Favorites List Component
//!
//! Saved books, newest last. Enter opens the selected book in Details;
//! `d` twice removes it; `X` twice clears the whole list.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FavoritesListState` lives in `TuiState`
//! - `FavoritesList` is created each frame with the current snapshot

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::core::book::BookRecord;
use crate::tui::component::Component;
use crate::tui::components::book_list::{BookList, BookListState};
use crate::tui::event::TuiEvent;

/// Events emitted by the favorites list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesEvent {
    /// Open the book at this index of the snapshot.
    Open(usize),
    /// Remove every favorite with this id.
    Remove(String),
    /// Drop all favorites.
    Clear,
}

/// A destructive key pressed once, waiting for the second press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirm {
    Remove,
    Clear,
}

/// Persistent state for the favorites screen.
#[derive(Default)]
pub struct FavoritesListState {
    pub list: BookListState,
    pub pending: Option<PendingConfirm>,
}

impl FavoritesListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key event against the current snapshot.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        favorites: &[BookRecord],
    ) -> Option<FavoritesEvent> {
        let pending = self.pending.take();

        match event {
            TuiEvent::CursorUp => {
                self.list.select_prev(favorites.len());
                None
            }
            TuiEvent::CursorDown => {
                self.list.select_next(favorites.len());
                None
            }
            TuiEvent::Submit => (self.list.selected < favorites.len())
                .then_some(FavoritesEvent::Open(self.list.selected)),
            TuiEvent::InputChar('d') => {
                let book = favorites.get(self.list.selected)?;
                if pending == Some(PendingConfirm::Remove) {
                    Some(FavoritesEvent::Remove(book.id.clone()))
                } else {
                    self.pending = Some(PendingConfirm::Remove);
                    None
                }
            }
            // Works on an empty list too: that is what an unreadable value looks like
            TuiEvent::InputChar('X') => {
                if pending == Some(PendingConfirm::Clear) {
                    Some(FavoritesEvent::Clear)
                } else {
                    self.pending = Some(PendingConfirm::Clear);
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the favorites screen.
pub struct FavoritesList<'a> {
    favorites: &'a [BookRecord],
    state: &'a mut FavoritesListState,
    loaded: bool,
}

impl<'a> FavoritesList<'a> {
    pub fn new(favorites: &'a [BookRecord], state: &'a mut FavoritesListState, loaded: bool) -> Self {
        Self {
            favorites,
            state,
            loaded,
        }
    }
}

impl Component for FavoritesList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help = match self.state.pending {
            Some(PendingConfirm::Remove) => {
                " Press d again to confirm remove | any other key cancels "
            }
            Some(PendingConfirm::Clear) => {
                " Press X again to clear ALL favorites | any other key cancels "
            }
            None => " Enter Open  d Remove  X Clear all  Tab Switch ",
        };
        let empty_text = if self.loaded {
            "No saved books yet."
        } else {
            "Loading favorites..."
        };
        let title = format!("Favorites ({})", self.favorites.len());

        let mut list = BookList::new(self.favorites, &mut self.state.list, &title)
            .help(help)
            .empty_text(empty_text);
        if self.state.pending.is_some() {
            list = list.selected_style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );
        }
        list.render(frame, area);
    }
}
