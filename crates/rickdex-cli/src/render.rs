//! Plain-text rendering of search state

use rickdex_core::{Character, FacetAxis, Facets};
use rickdex_search::{SearchPhase, SearchState};

/// Print whatever the state calls for: progress, error, empty state or list
pub fn state(state: &SearchState) {
    match state.phase() {
        SearchPhase::Searching => println!("Searching for {:?}...", state.query_text().trim()),
        SearchPhase::Failed => println!("{}", state.error().unwrap_or("Search failed")),
        SearchPhase::Idle => println!("Search for Rick and Morty characters"),
        SearchPhase::Results if state.shows_empty_state() => println!("No characters found"),
        SearchPhase::Results => {
            for character in state.visible_results() {
                println!("{}", row(character));
            }
            println!("{}", summary(state));
        }
    }
}

/// One-line listing of a character
pub fn row(character: &Character) -> String {
    format!(
        "{:>5}  {}  ({}, {})",
        character.id, character.name, character.species, character.status
    )
}

fn summary(state: &SearchState) -> String {
    let shown = state.visible_results().len();
    let total = state.all_results().len();

    if !state.has_active_filters() {
        return format!("{} characters", total);
    }

    let active: Vec<String> = FacetAxis::ALL
        .iter()
        .filter_map(|axis| {
            state
                .selection()
                .get(*axis)
                .map(|value| format!("{}={}", axis, value))
        })
        .collect();
    format!("{} of {} characters ({})", shown, total, active.join(", "))
}

pub fn facets(facets: &Facets) {
    if facets.is_empty() {
        println!("No facets");
        return;
    }

    for axis in FacetAxis::ALL {
        let values = facets.values(axis);
        if !values.is_empty() {
            println!("{}: {}", axis, values.join(", "));
        }
    }
}

pub fn detail(character: &Character) {
    println!("{}", character.name);
    println!("  Species: {}", character.species);
    println!("  Status:  {}", character.status);
    println!("  Origin:  {}", character.origin.name);
    if character.has_type() {
        println!("  Type:    {}", character.character_type);
    }
    println!("  Created: {}", character.formatted_created_date());
    println!("  Image:   {}", character.image);
}
