//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: app name, screen tabs, and the current notice
//! - `BookDetails`: one record, scrollable
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `SearchInput`: query box, emits `Submit` on Enter
//! - `BookList`: selectable list of records (search results)
//! - `FavoritesList`: `BookList` plus two-step delete
//!
//! Persistent state (`BookListState`, `FavoritesListState`, the details
//! `ScrollViewState`) lives in `TuiState`; the render wrappers are built each
//! frame with borrowed state and props.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── search_input.rs
//! ├── book_list.rs
//! ├── book_details.rs
//! └── favorites_list.rs
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod book_details;
pub mod book_list;
pub mod favorites_list;
pub mod search_input;

pub use book_details::BookDetails;
pub use book_list::{BookList, BookListState};
pub use favorites_list::{FavoritesEvent, FavoritesList, FavoritesListState};
pub use search_input::{SearchInput, SearchInputEvent};
