//! Rickdex Search - Debounced search and client-side filtering
//!
//! This crate provides:
//! - `SearchController`: turns keystrokes into throttled catalog requests,
//!   discards superseded responses and keeps the filtered view current
//! - `SearchState`: the observable snapshot presentation layers render from

pub mod config;
pub mod controller;
pub mod state;

pub use config::*;
pub use controller::*;
pub use state::*;
