//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. Core
//! effects run on tokio tasks and report back through an mpsc channel that
//! the event loop drains between frames. Searches get a task each so a
//! newer one can abort the old; favorites effects share one queue and run
//! in the order they were issued.
//!
//! ## Redraw Strategy
//!
//! - **Searching**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on input or when a
//!   background task reports back.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;
use tui_scrollview::ScrollViewState;

use crate::catalog::{CatalogProvider, GoogleBooksProvider};
use crate::core::action::{Action, Effect, perform, update};
use crate::core::config::ResolvedConfig;
use crate::core::favorites::FavoritesStore;
use crate::core::state::{App, Screen};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    BookListState, FavoritesEvent, FavoritesListState, SearchInput, SearchInputEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which part of the Search screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    Input,
    Results,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_input: SearchInput,
    pub focus: SearchFocus,
    pub results: BookListState,
    pub favorites: FavoritesListState,
    pub details_scroll: ScrollViewState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_input: SearchInput::new(),
            focus: SearchFocus::Input, // User expects to type immediately
            results: BookListState::new(),
            favorites: FavoritesListState::new(),
            details_scroll: ScrollViewState::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // REPORT_EVENT_TYPES lets the poller drop key releases; terminals
        // without the protocol ignore it.
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the catalog client from the resolved config.
pub fn build_catalog(config: &ResolvedConfig) -> std::io::Result<Arc<dyn CatalogProvider>> {
    let provider = GoogleBooksProvider::new(
        config.catalog_api_key.clone(),
        Some(config.catalog_base_url.clone()),
        config.timeout,
    )
    .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(Arc::new(provider))
}

/// Build the favorites store. Without a data directory favorites only last
/// for the session.
pub fn build_favorites(config: &ResolvedConfig) -> FavoritesStore {
    let backend: Arc<dyn KeyValueStore> = match &config.data_dir {
        Some(dir) => Arc::new(FileStore::new(dir)),
        None => {
            warn!("No data directory available; favorites will not be saved");
            Arc::new(MemoryStore::new())
        }
    };
    info!("Favorites backend: {}", backend.name());
    FavoritesStore::new(backend).allow_duplicates(config.allow_duplicates)
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let catalog = build_catalog(&config)?;
    let favorites = Arc::new(build_favorites(&config));
    let mut app = App::from_config(catalog, favorites, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Only the newest search may run; older ones are aborted on resubmit
    let mut search_task: Option<AbortHandle> = None;
    let store = StoreQueue::spawn(&app, tx.clone());

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.is_searching;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, &event)
                && apply(&mut app, &mut tui, action, &tx, &store, &mut search_task)
            {
                break 'main;
            }
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, &mut tui, action, &tx, &store, &mut search_task) {
                break 'main;
            }
        }
    }

    if let Some(handle) = search_task.take() {
        handle.abort();
    }
    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Translate a terminal event into a core action, updating presentation
/// state (focus, selection, scroll) along the way.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::NextTab => return Some(Action::NextScreen),
        TuiEvent::PrevTab => return Some(Action::PrevScreen),
        TuiEvent::Resize => return None,
        _ => {}
    }

    match app.screen {
        Screen::Search => route_search(app, tui, event),
        Screen::Details => route_details(tui, event),
        Screen::Favorites => {
            if matches!(event, TuiEvent::Escape) && tui.favorites.pending.is_none() {
                return Some(Action::ShowScreen(Screen::Search));
            }
            match tui.favorites.handle_event(event, &app.favorites_snapshot)? {
                FavoritesEvent::Open(index) => Some(Action::OpenFavorite(index)),
                FavoritesEvent::Remove(id) => Some(Action::RemoveFavorite(id)),
                FavoritesEvent::Clear => Some(Action::ClearFavorites),
            }
        }
    }
}

fn route_search(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match tui.focus {
        SearchFocus::Input => match tui.search_input.handle_event(event)? {
            SearchInputEvent::Submit(text) => Some(Action::SubmitSearch(text)),
            SearchInputEvent::FocusResults => {
                if !app.results.is_empty() {
                    tui.focus = SearchFocus::Results;
                    tui.results.clamp(app.results.len());
                }
                None
            }
            // A new query makes the old notice irrelevant
            SearchInputEvent::Edited => app.notice.is_some().then_some(Action::DismissNotice),
        },
        SearchFocus::Results => match event {
            TuiEvent::CursorUp if tui.results.selected == 0 => {
                tui.focus = SearchFocus::Input;
                None
            }
            TuiEvent::CursorUp => {
                tui.results.select_prev(app.results.len());
                None
            }
            TuiEvent::CursorDown => {
                tui.results.select_next(app.results.len());
                None
            }
            TuiEvent::Submit => Some(Action::SelectResult(tui.results.selected)),
            TuiEvent::Escape => {
                tui.focus = SearchFocus::Input;
                None
            }
            // Typing goes back to the query box
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
                tui.focus = SearchFocus::Input;
                route_search(app, tui, event)
            }
            _ => None,
        },
    }
}

fn route_details(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::InputChar('a') => Some(Action::AddToFavorites),
        TuiEvent::Escape | TuiEvent::Backspace => Some(Action::Back),
        TuiEvent::CursorUp => {
            tui.details_scroll.scroll_up();
            None
        }
        TuiEvent::CursorDown => {
            tui.details_scroll.scroll_down();
            None
        }
        TuiEvent::PageUp => {
            tui.details_scroll.scroll_page_up();
            None
        }
        TuiEvent::PageDown => {
            tui.details_scroll.scroll_page_down();
            None
        }
        _ => None,
    }
}

/// Apply an action to the core and start whatever effect it returns.
/// Returns true when the app should quit.
fn apply(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    tx: &mpsc::Sender<Action>,
    store: &StoreQueue,
    search_task: &mut Option<AbortHandle>,
) -> bool {
    let current_completion = matches!(
        &action,
        Action::SearchCompleted { generation, .. } if *generation == app.search_generation
    );
    let opens_details = matches!(action, Action::SelectResult(_) | Action::OpenFavorite(_));
    let is_submit = matches!(action, Action::SubmitSearch(_));

    let effect = update(app, action);
    sync_presentation(app, tui, current_completion, opens_details, is_submit);

    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SpawnSearch { .. } => {
            if let Some(previous) = search_task.take() {
                debug!("Aborting superseded search");
                previous.abort();
            }
            *search_task = Some(spawn_effect(app, effect, tx.clone()));
            false
        }
        other => {
            store.push(other);
            false
        }
    }
}

fn sync_presentation(
    app: &App,
    tui: &mut TuiState,
    current_completion: bool,
    opens_details: bool,
    is_submit: bool,
) {
    if is_submit {
        tui.results.reset(0);
        tui.focus = SearchFocus::Input;
    }
    if current_completion {
        tui.results.reset(app.results.len());
    }
    if opens_details && app.screen == Screen::Details {
        tui.details_scroll = ScrollViewState::default();
    }
    if app.screen == Screen::Favorites {
        tui.favorites.list.clamp(app.favorites_snapshot.len());
    } else {
        tui.favorites.pending = None;
    }
}

fn spawn_effect(app: &App, effect: Effect, tx: mpsc::Sender<Action>) -> AbortHandle {
    debug!("Spawning effect: {:?}", effect);
    let catalog = app.catalog.clone();
    let favorites = app.favorites.clone();
    let page_size = app.page_size;

    tokio::spawn(async move {
        if let Some(action) = perform(catalog, favorites, page_size, effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to deliver effect result: receiver dropped");
        }
    })
    .abort_handle()
}

/// Runs favorites effects one at a time, in the order they were issued, so
/// a reload never overtakes the add or remove before it.
struct StoreQueue {
    tx: tokio::sync::mpsc::UnboundedSender<Effect>,
}

impl StoreQueue {
    fn spawn(app: &App, actions: mpsc::Sender<Action>) -> Self {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Effect>();
        let catalog = app.catalog.clone();
        let favorites = app.favorites.clone();
        let page_size = app.page_size;

        tokio::spawn(async move {
            while let Some(effect) = rx.recv().await {
                debug!("Running store effect: {:?}", effect);
                if let Some(action) =
                    perform(catalog.clone(), favorites.clone(), page_size, effect).await
                    && actions.send(action).is_err()
                {
                    warn!("Failed to deliver store effect result: receiver dropped");
                    break;
                }
            }
        });

        Self { tx }
    }

    fn push(&self, effect: Effect) {
        if self.tx.send(effect).is_err() {
            warn!("Store queue stopped; dropping effect");
        }
    }
}
