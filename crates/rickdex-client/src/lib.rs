//! Rickdex Client - Client library for the public character catalog
//!
//! This crate provides:
//! - The `CatalogClient` seam the search coordinator depends on
//! - An HTTP implementation backed by reqwest
//! - Classification of every failure into a small, displayable taxonomy

pub mod client;
pub mod error;

pub use client::*;
pub use error::*;
