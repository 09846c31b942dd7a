//! Client-side filtering of a result set by selected facet values

use serde::{Deserialize, Serialize};

use crate::{Character, FacetAxis};

/// The facet values a user has chosen; `None` means no constraint on that axis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub status: Option<String>,
    pub species: Option<String>,
    pub character_type: Option<String>,
}

impl FilterSelection {
    pub fn get(&self, axis: FacetAxis) -> Option<&str> {
        match axis {
            FacetAxis::Status => self.status.as_deref(),
            FacetAxis::Species => self.species.as_deref(),
            FacetAxis::Type => self.character_type.as_deref(),
        }
    }

    pub fn set(&mut self, axis: FacetAxis, value: Option<String>) {
        match axis {
            FacetAxis::Status => self.status = value,
            FacetAxis::Species => self.species = value,
            FacetAxis::Type => self.character_type = value,
        }
    }

    pub fn with(mut self, axis: FacetAxis, value: impl Into<String>) -> Self {
        self.set(axis, Some(value.into()));
        self
    }

    /// Reset every axis to "no constraint"
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any axis carries a value
    pub fn is_active(&self) -> bool {
        FacetAxis::ALL.iter().any(|axis| self.get(*axis).is_some())
    }

    /// Whether `character` passes every selected axis.
    ///
    /// Status and species must equal the selection ignoring case. Type only
    /// has to contain it, so an empty type selection matches everything.
    pub fn matches(&self, character: &Character) -> bool {
        FacetAxis::ALL.iter().all(|&axis| match self.get(axis) {
            None => true,
            Some(selected) => {
                let value = axis.value_of(character).to_lowercase();
                let selected = selected.to_lowercase();
                match axis {
                    FacetAxis::Type => value.contains(&selected),
                    FacetAxis::Status | FacetAxis::Species => value == selected,
                }
            }
        })
    }
}

/// Keep the characters that pass `selection`, preserving their order
pub fn apply_filters(characters: &[Character], selection: &FilterSelection) -> Vec<Character> {
    if !selection.is_active() {
        return characters.to_vec();
    }

    characters
        .iter()
        .filter(|c| selection.matches(c))
        .cloned()
        .collect()
}
