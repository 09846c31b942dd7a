//! Character types - the records returned by the catalog search endpoint

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Unique, stable identifier for a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A single catalog record
///
/// Only `status`, `species` and `type` take part in filtering. The remaining
/// fields are carried through untouched for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,

    /// Free-form status, e.g. "Alive", "Dead", "unknown"
    pub status: String,

    pub species: String,

    /// Sub-type of the species; empty when unset
    #[serde(rename = "type")]
    pub character_type: String,

    pub gender: String,
    pub origin: Place,
    pub location: Place,

    /// Avatar image URL
    pub image: String,

    /// URLs of the episodes this character appears in
    pub episode: Vec<String>,

    /// Canonical API URL of this record
    pub url: String,

    /// ISO 8601 creation timestamp, kept as the server sent it
    pub created: String,
}

impl Character {
    /// Create a character with the given id and name and every other field empty
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: CharacterId(id),
            name: name.into(),
            status: String::new(),
            species: String::new(),
            character_type: String::new(),
            gender: String::new(),
            origin: Place::default(),
            location: Place::default(),
            image: String::new(),
            episode: Vec::new(),
            url: String::new(),
            created: String::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    pub fn with_type(mut self, character_type: impl Into<String>) -> Self {
        self.character_type = character_type.into();
        self
    }

    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = created.into();
        self
    }

    /// Whether the record has a non-empty type
    pub fn has_type(&self) -> bool {
        !self.character_type.is_empty()
    }

    /// Parse the creation timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Human-readable creation date, e.g. "Nov 4, 2017 at 6:48 PM"
    ///
    /// Falls back to the raw string when it is not a valid timestamp.
    pub fn formatted_created_date(&self) -> String {
        match self.created_at() {
            Some(created) => created.format("%b %-d, %Y at %-I:%M %p").to_string(),
            None => self.created.clone(),
        }
    }
}

/// A named reference to an origin or last known location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub url: String,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

impl CharacterPage {
    /// Decode a page from the search endpoint's JSON payload
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Pagination metadata for a result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of matches across all pages
    pub count: u64,
    pub pages: u64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// Error envelope the catalog returns instead of a page, e.g.
/// `{"error": "There is nothing here"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
