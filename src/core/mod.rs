//! # Core Application Logic
//!
//! This module contains Libris' business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • FavoritesStore       │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  catalog   │      │  storage   │
//!     │  Adapter   │      │ (reqwest)  │      │ (kv files) │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`book`]: `BookRecord`, the value passed between screens
//! - [`favorites`]: the persisted favorites list
//! - [`search`]: query validation and search execution
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`]: settings and their override hierarchy

pub mod action;
pub mod book;
pub mod config;
pub mod favorites;
pub mod search;
pub mod state;
