//! # Actions
//!
//! Everything that can happen in Libris becomes an `Action`.
//! User presses Enter in the search box? That's `Action::SubmitSearch(text)`.
//! The catalog answers? That's `Action::SearchCompleted { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an `Effect` describing the I/O to run next. No I/O happens in
//! `update()`. `perform()` runs one effect against the catalog and the
//! favorites store and turns its outcome back into an `Action`.
//!
//! ```text
//! State + Action  →  update()  →  Effect  →  perform()  →  Action  →  ...
//! ```

use std::sync::Arc;

use log::{debug, info, warn};

use crate::catalog::{CatalogError, CatalogProvider};
use crate::core::book::BookRecord;
use crate::core::favorites::{AddOutcome, FavoritesStore, StoreError};
use crate::core::search::{self, SearchQuery};
use crate::core::state::{App, Notice, Screen};

#[derive(Debug)]
pub enum Action {
    SubmitSearch(String),
    SearchCompleted {
        generation: u64,
        result: Result<Vec<BookRecord>, CatalogError>,
    },
    /// Open the search result at this index on the Details screen.
    SelectResult(usize),
    /// Open the favorites snapshot entry at this index on the Details screen.
    OpenFavorite(usize),
    ShowScreen(Screen),
    NextScreen,
    PrevScreen,
    /// Leave Details for the screen it was opened from.
    Back,
    AddToFavorites,
    FavoriteAdded(Result<AddOutcome, StoreError>),
    FavoritesLoaded(Result<Vec<BookRecord>, StoreError>),
    RemoveFavorite(String),
    FavoriteRemoved {
        id: String,
        result: Result<(), StoreError>,
    },
    /// Drop every saved favorite, including an unreadable stored value.
    ClearFavorites,
    FavoritesCleared(Result<(), StoreError>),
    DismissNotice,
    Quit,
}

/// I/O requested by `update()`. The TUI runs these on background tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    SpawnSearch { generation: u64, query: SearchQuery },
    AddFavorite(BookRecord),
    LoadFavorites,
    RemoveFavorite(String),
    ClearFavorites,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitSearch(raw) => {
            // Any in-flight search is now stale, even if this one is rejected.
            app.search_generation += 1;
            match SearchQuery::parse(&raw) {
                None => {
                    app.results.clear();
                    app.last_query = None;
                    app.is_searching = false;
                    app.notice = Some(Notice::warning("Enter a search term"));
                    Effect::None
                }
                Some(query) => {
                    info!("Search #{} for {:?}", app.search_generation, query.as_str());
                    app.is_searching = true;
                    app.last_query = Some(query.clone());
                    app.notice = None;
                    Effect::SpawnSearch {
                        generation: app.search_generation,
                        query,
                    }
                }
            }
        }
        Action::SearchCompleted { generation, result } => {
            if generation != app.search_generation {
                debug!(
                    "Dropping stale search #{} (current #{})",
                    generation, app.search_generation
                );
                return Effect::None;
            }
            app.is_searching = false;
            match result {
                Ok(records) => {
                    if records.is_empty() {
                        let query = app
                            .last_query
                            .as_ref()
                            .map(|q| q.as_str())
                            .unwrap_or_default();
                        app.notice = Some(Notice::info(format!("No books found for \"{query}\"")));
                    } else {
                        app.notice = None;
                    }
                    app.results = records;
                }
                Err(e) => {
                    warn!("Search #{} failed: {}", generation, e);
                    app.results.clear();
                    app.notice = Some(Notice::error(format!("Search failed: {e}")));
                }
            }
            Effect::None
        }
        Action::SelectResult(index) => match app.results.get(index).cloned() {
            Some(record) => open_details(app, record, Screen::Search),
            None => Effect::None,
        },
        Action::OpenFavorite(index) => match app.favorites_snapshot.get(index).cloned() {
            Some(record) => open_details(app, record, Screen::Favorites),
            None => Effect::None,
        },
        Action::ShowScreen(screen) => activate(app, screen),
        Action::NextScreen => activate(app, app.screen.next()),
        Action::PrevScreen => activate(app, app.screen.prev()),
        Action::Back => {
            if app.screen == Screen::Details {
                activate(app, app.return_to)
            } else {
                Effect::None
            }
        }
        Action::AddToFavorites => match &app.details {
            Some(record) => Effect::AddFavorite(record.clone()),
            None => {
                app.notice = Some(Notice::warning("No book selected"));
                Effect::None
            }
        },
        Action::FavoriteAdded(result) => {
            app.notice = Some(match result {
                Ok(AddOutcome::Added) => Notice::info("Added to favorites"),
                Ok(AddOutcome::AlreadyPresent(_)) => Notice::info("Already in favorites"),
                Err(e) => store_error_notice(&e),
            });
            Effect::None
        }
        Action::FavoritesLoaded(result) => {
            app.favorites_loaded = true;
            match result {
                Ok(records) => {
                    debug!("Favorites snapshot: {} records", records.len());
                    app.favorites_snapshot = records;
                }
                Err(e @ StoreError::Corrupt(_)) => {
                    warn!("Showing empty favorites: {}", e);
                    app.favorites_snapshot.clear();
                    app.notice = Some(Notice::warning(format!(
                        "Saved favorites are unreadable; showing an empty list. {RESET_HINT}"
                    )));
                }
                Err(e) => {
                    app.favorites_snapshot.clear();
                    app.notice = Some(store_error_notice(&e));
                }
            }
            Effect::None
        }
        Action::RemoveFavorite(id) => Effect::RemoveFavorite(id),
        Action::FavoriteRemoved { id, result } => {
            match result {
                Ok(()) => {
                    // Same filter the store applied, so no second list() is needed.
                    app.favorites_snapshot.retain(|b| b.id != id);
                    app.notice = Some(Notice::info("Removed from favorites"));
                }
                Err(e) => {
                    app.notice = Some(store_error_notice(&e));
                }
            }
            Effect::None
        }
        Action::ClearFavorites => Effect::ClearFavorites,
        Action::FavoritesCleared(result) => {
            match result {
                Ok(()) => {
                    app.favorites_snapshot.clear();
                    app.favorites_loaded = true;
                    app.notice = Some(Notice::info("Favorites cleared"));
                }
                Err(e) => {
                    app.notice = Some(store_error_notice(&e));
                }
            }
            Effect::None
        }
        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn open_details(app: &mut App, record: BookRecord, from: Screen) -> Effect {
    debug!("Opening details for {}", record.id);
    app.details = Some(record);
    app.return_to = from;
    app.screen = Screen::Details;
    Effect::None
}

/// Switch tabs. Entering Favorites always takes a fresh snapshot.
fn activate(app: &mut App, screen: Screen) -> Effect {
    if screen == Screen::Details && app.screen != Screen::Details {
        app.return_to = app.screen;
    }
    app.screen = screen;
    if screen == Screen::Favorites {
        app.favorites_loaded = false;
        Effect::LoadFavorites
    } else {
        Effect::None
    }
}

/// How the user recovers from an unreadable favorites value.
const RESET_HINT: &str = "Press X twice on Favorites to reset.";

fn store_error_notice(e: &StoreError) -> Notice {
    match e {
        StoreError::Corrupt(_) => {
            Notice::error(format!("{} {RESET_HINT}", capitalize(&e.to_string())))
        }
        _ => Notice::error(capitalize(&e.to_string())),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Runs one effect and returns the action carrying its outcome.
/// `Effect::None` and `Effect::Quit` have nothing to run.
pub async fn perform(
    catalog: Arc<dyn CatalogProvider>,
    favorites: Arc<FavoritesStore>,
    page_size: u32,
    effect: Effect,
) -> Option<Action> {
    match effect {
        Effect::None | Effect::Quit => None,
        Effect::SpawnSearch { generation, query } => {
            let result = search::run(catalog.as_ref(), &query, page_size).await;
            Some(Action::SearchCompleted { generation, result })
        }
        Effect::AddFavorite(record) => Some(Action::FavoriteAdded(favorites.add(record).await)),
        Effect::LoadFavorites => Some(Action::FavoritesLoaded(favorites.list().await)),
        Effect::RemoveFavorite(id) => {
            let result = favorites.remove(&id).await;
            Some(Action::FavoriteRemoved { id, result })
        }
        Effect::ClearFavorites => Some(Action::FavoritesCleared(favorites.clear().await)),
    }
}
