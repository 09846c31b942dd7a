//! Interactive search session
//!
//! Every plain input line replaces the query text, as if typed into a search
//! field, so the controller's debounce and cancellation rules apply. Lines
//! starting with `:` are commands.

use anyhow::Result;
use rickdex_core::{CharacterId, FacetAxis, FilterSelection};
use rickdex_search::{SearchController, SearchPhase, SearchState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::render;

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Query(String),
    Facet(FacetAxis, Option<String>),
    Clear,
    ClearFilters,
    Facets,
    Show(CharacterId),
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return ShellCommand::Query(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command.trim(), ""),
        };
        let arg = (!arg.is_empty()).then(|| arg.to_string());

        match name {
            "status" => ShellCommand::Facet(FacetAxis::Status, arg),
            "species" => ShellCommand::Facet(FacetAxis::Species, arg),
            "type" => ShellCommand::Facet(FacetAxis::Type, arg),
            "clear" => ShellCommand::Clear,
            "clear-filters" => ShellCommand::ClearFilters,
            "facets" => ShellCommand::Facets,
            "show" => match arg.as_deref().map(str::parse::<u64>) {
                Some(Ok(id)) => ShellCommand::Show(CharacterId(id)),
                _ => ShellCommand::Unknown(line.to_string()),
            },
            "help" => ShellCommand::Help,
            "quit" | "q" => ShellCommand::Quit,
            _ => ShellCommand::Unknown(line.to_string()),
        }
    }
}

/// What the user currently sees; only changes to this are re-rendered
#[derive(Debug, Clone, PartialEq)]
struct View {
    phase: SearchPhase,
    error: Option<String>,
    visible: Vec<CharacterId>,
    selection: FilterSelection,
}

impl View {
    fn of(state: &SearchState) -> Self {
        Self {
            phase: state.phase(),
            error: state.error().map(str::to_owned),
            visible: state.visible_results().iter().map(|c| c.id).collect(),
            selection: state.selection().clone(),
        }
    }
}

pub async fn run(controller: SearchController) -> Result<()> {
    print_shell_help();
    let config = controller.config();
    debug!(
        "Shell started (query debounce {:?}, filter debounce {:?})",
        config.query_debounce, config.filter_debounce
    );

    let mut updates = controller.subscribe();
    let renderer = tokio::spawn(async move {
        let mut last = View::of(&updates.borrow_and_update());
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            let view = View::of(&state);
            if view != last {
                debug!("View changed ({})", view.phase.as_str());
                render::state(&state);
                last = view;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match ShellCommand::parse(&line) {
            ShellCommand::Query(text) => controller.set_query_text(text),
            ShellCommand::Facet(axis, value) => controller.set_facet_selection(axis, value),
            ShellCommand::Clear => controller.clear_search(),
            ShellCommand::ClearFilters => controller.clear_filters(),
            ShellCommand::Facets => render::facets(controller.snapshot().facets()),
            ShellCommand::Show(id) => {
                let state = controller.snapshot();
                match state.all_results().iter().find(|c| c.id == id) {
                    Some(character) => render::detail(character),
                    None => println!("No character {} in current results", id),
                }
            }
            ShellCommand::Help => print_shell_help(),
            ShellCommand::Quit => break,
            ShellCommand::Unknown(line) => println!("Unknown command: {}", line),
        }
    }

    renderer.abort();
    Ok(())
}

fn print_shell_help() {
    println!(
        r#"Type to search. Commands:
    :status [value]     Filter by status (no value clears)
    :species [value]    Filter by species (no value clears)
    :type [value]       Filter by type substring (no value clears)
    :clear              Clear the search
    :clear-filters      Clear all filters
    :facets             Show available filter values
    :show <id>          Show one character
    :quit               Leave the shell"#
    );
}
