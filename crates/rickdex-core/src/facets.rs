//! Facet derivation - the filterable values present in a result set

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Character;

/// A filterable attribute of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetAxis {
    Status,
    Species,
    Type,
}

impl FacetAxis {
    pub const ALL: [FacetAxis; 3] = [FacetAxis::Status, FacetAxis::Species, FacetAxis::Type];

    /// The character's value on this axis
    pub fn value_of(self, character: &Character) -> &str {
        match self {
            FacetAxis::Status => &character.status,
            FacetAxis::Species => &character.species,
            FacetAxis::Type => &character.character_type,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FacetAxis::Status => "status",
            FacetAxis::Species => "species",
            FacetAxis::Type => "type",
        }
    }
}

impl fmt::Display for FacetAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct values per axis, each sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub status: Vec<String>,
    pub species: Vec<String>,
    pub types: Vec<String>,
}

impl Facets {
    pub fn values(&self, axis: FacetAxis) -> &[String] {
        match axis {
            FacetAxis::Status => &self.status,
            FacetAxis::Species => &self.species,
            FacetAxis::Type => &self.types,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.species.is_empty() && self.types.is_empty()
    }
}

/// Collect the distinct values of every axis across `characters`.
///
/// Case is preserved and ordering is byte-wise, so "Alive" < "Dead" < "alive".
/// Empty types mean "unset" and never become a facet value.
pub fn derive_facets(characters: &[Character]) -> Facets {
    Facets {
        status: distinct(characters, FacetAxis::Status),
        species: distinct(characters, FacetAxis::Species),
        types: distinct(characters, FacetAxis::Type),
    }
}

fn distinct(characters: &[Character], axis: FacetAxis) -> Vec<String> {
    let values: BTreeSet<&str> = characters
        .iter()
        .map(|c| axis.value_of(c))
        .filter(|v| axis != FacetAxis::Type || !v.is_empty())
        .collect();

    values.into_iter().map(str::to_owned).collect()
}
