//! # Application State
//!
//! Core business state for Libris. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Arc<dyn CatalogProvider>   // search backend
//! ├── favorites: Arc<FavoritesStore>      // persisted favorites
//! ├── screen: Screen                      // visible tab
//! ├── return_to: Screen                   // where Back leaves Details
//! ├── last_query: Option<SearchQuery>     // most recent submitted search
//! ├── results: Vec<BookRecord>            // search results, API order
//! ├── is_searching: bool                  // request in flight
//! ├── search_generation: u64              // newest search id
//! ├── details: Option<BookRecord>         // record shown on Details
//! ├── favorites_snapshot: Vec<BookRecord> // what the Favorites tab shows
//! ├── notice: Option<Notice>              // status line
//! └── page_size: u32                      // result cap per search
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::catalog::CatalogProvider;
use crate::core::book::BookRecord;
use crate::core::config::ResolvedConfig;
use crate::core::favorites::FavoritesStore;
use crate::core::search::SearchQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Search,
    Details,
    Favorites,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Search, Screen::Details, Screen::Favorites];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Search => "Search",
            Screen::Details => "Details",
            Screen::Favorites => "Favorites",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Screen::Search => Screen::Details,
            Screen::Details => Screen::Favorites,
            Screen::Favorites => Screen::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Search => Screen::Favorites,
            Screen::Details => Screen::Search,
            Screen::Favorites => Screen::Details,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// The one line of user-facing feedback. Every component reports through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

pub struct App {
    pub catalog: Arc<dyn CatalogProvider>,
    pub favorites: Arc<FavoritesStore>,
    pub screen: Screen,
    pub return_to: Screen,
    pub last_query: Option<SearchQuery>,
    pub results: Vec<BookRecord>,
    pub is_searching: bool,
    pub search_generation: u64,
    pub details: Option<BookRecord>,
    pub favorites_snapshot: Vec<BookRecord>,
    /// True once a `list()` has completed for the current activation.
    pub favorites_loaded: bool,
    pub notice: Option<Notice>,
    pub page_size: u32,
}

impl App {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        favorites: Arc<FavoritesStore>,
        page_size: u32,
    ) -> Self {
        Self {
            catalog,
            favorites,
            screen: Screen::Search,
            return_to: Screen::Search,
            last_query: None,
            results: Vec::new(),
            is_searching: false,
            search_generation: 0,
            details: None,
            favorites_snapshot: Vec::new(),
            favorites_loaded: false,
            notice: None,
            page_size,
        }
    }

    pub fn from_config(
        catalog: Arc<dyn CatalogProvider>,
        favorites: Arc<FavoritesStore>,
        config: &ResolvedConfig,
    ) -> Self {
        Self::new(catalog, favorites, config.page_size)
    }
}
