//! Rickdex Core - Core types for the character catalog client
//!
//! This crate defines the data structures and pure functions shared by the
//! client and the search coordinator:
//! - `Character`: one catalog record, plus the page envelope it arrives in
//! - `Facets`: filterable values derived from a result set
//! - `FilterSelection`: the user's chosen facet values and how they are applied

pub mod character;
pub mod error;
pub mod facets;
pub mod filter;

pub use character::*;
pub use error::*;
pub use facets::*;
pub use filter::*;
