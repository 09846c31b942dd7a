//! Rickdex CLI - Search the character catalog from a terminal

mod render;
mod shell;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use rickdex_client::{CatalogClient, ClientConfig, HttpCatalogClient};
use rickdex_core::{CharacterId, FacetAxis};
use rickdex_search::{SearchConfig, SearchController, SearchState};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rickdex=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "help" | "--help" | "-h" => print_help(),
        "search" => {
            if args.len() < 3 {
                eprintln!("Usage: rickdex search <name> [--status S] [--species S] [--type T]");
                return Ok(());
            }
            search(&args[2], &args[3..]).await?;
        }
        "facets" => {
            if args.len() < 3 {
                eprintln!("Usage: rickdex facets <name>");
                return Ok(());
            }
            facets(&args[2]).await?;
        }
        "show" => {
            if args.len() < 4 {
                eprintln!("Usage: rickdex show <name> <id>");
                return Ok(());
            }
            show(&args[2], &args[3]).await?;
        }
        "shell" => shell::run(controller()?).await?,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"Rickdex - Search the Rick and Morty character catalog

USAGE:
    rickdex <COMMAND> [OPTIONS]

COMMANDS:
    help            Show this help message
    search          Search characters by name, optionally filtered
    facets          Show the status, species and type values of a search
    show            Show one character from a search
    shell           Interactive search session

ENVIRONMENT:
    RICKDEX_API_URL         Search endpoint (default: https://rickandmortyapi.com/api/character/)
    RICKDEX_TIMEOUT_SECS    Request timeout in seconds (default: 30)
    RICKDEX_DEBOUNCE_MS     Keystroke debounce in the shell (default: 500)
    RICKDEX_FILTER_DEBOUNCE_MS
                            Filter change debounce in the shell (default: 300)

EXAMPLES:
    rickdex search rick --status alive --type sci
    rickdex facets smith
    rickdex show rick 1
    rickdex shell
"#
    );
}

async fn search(name: &str, options: &[String]) -> Result<()> {
    let controller = controller()?;
    for (axis, value) in parse_filters(options)? {
        controller.set_facet_selection(axis, Some(value));
    }

    let state = run_search(&controller, name).await?;
    render::state(&state);
    Ok(())
}

async fn facets(name: &str) -> Result<()> {
    let controller = controller()?;
    let state = run_search(&controller, name).await?;

    if let Some(error) = state.error() {
        bail!("{}", error);
    }
    render::facets(state.facets());
    Ok(())
}

async fn show(name: &str, id: &str) -> Result<()> {
    let id = CharacterId(id.parse().with_context(|| format!("Invalid character id: {}", id))?);
    let controller = controller()?;
    let state = run_search(&controller, name).await?;

    if let Some(error) = state.error() {
        bail!("{}", error);
    }
    match state.all_results().iter().find(|c| c.id == id) {
        Some(character) => render::detail(character),
        None => println!("No character {} in results for {:?}", id, name),
    }
    Ok(())
}

/// Search once and wait for the request to settle
async fn run_search(controller: &SearchController, name: &str) -> Result<SearchState> {
    let mut updates = controller.subscribe();
    controller.set_query_text(name);
    controller.trigger_search();

    let state = updates
        .wait_for(|s| !s.is_loading())
        .await
        .context("Search controller stopped")?
        .clone();
    Ok(state)
}

fn parse_filters(options: &[String]) -> Result<Vec<(FacetAxis, String)>> {
    let mut filters = Vec::new();
    let mut iter = options.iter();

    while let Some(flag) = iter.next() {
        let axis = match flag.as_str() {
            "--status" => FacetAxis::Status,
            "--species" => FacetAxis::Species,
            "--type" => FacetAxis::Type,
            other => bail!("Unknown option: {}", other),
        };
        let Some(value) = iter.next() else {
            bail!("Missing value for {}", flag);
        };
        filters.push((axis, value.clone()));
    }

    Ok(filters)
}

/// Assemble a controller around the HTTP catalog client
fn controller() -> Result<SearchController> {
    let client_config = client_config()?;
    let timeout = client_config.timeout;
    let client = HttpCatalogClient::new(client_config)?;
    debug!("Using catalog at {} (timeout {:?})", client.url(), timeout);

    let client: Arc<dyn CatalogClient> = Arc::new(client);
    Ok(SearchController::new(client, search_config()?))
}

fn client_config() -> Result<ClientConfig> {
    let mut config = ClientConfig::default();

    if let Ok(url) = std::env::var("RICKDEX_API_URL") {
        config.base_url = url
            .parse()
            .with_context(|| format!("Invalid RICKDEX_API_URL: {}", url))?;
    }
    if let Ok(secs) = std::env::var("RICKDEX_TIMEOUT_SECS") {
        let secs: u64 = secs
            .parse()
            .with_context(|| format!("Invalid RICKDEX_TIMEOUT_SECS: {}", secs))?;
        config.timeout = Duration::from_secs(secs);
    }

    Ok(config)
}

fn search_config() -> Result<SearchConfig> {
    let mut config = SearchConfig::default();

    if let Ok(ms) = std::env::var("RICKDEX_DEBOUNCE_MS") {
        let ms: u64 = ms
            .parse()
            .with_context(|| format!("Invalid RICKDEX_DEBOUNCE_MS: {}", ms))?;
        config = config.with_query_debounce(Duration::from_millis(ms));
    }
    if let Ok(ms) = std::env::var("RICKDEX_FILTER_DEBOUNCE_MS") {
        let ms: u64 = ms
            .parse()
            .with_context(|| format!("Invalid RICKDEX_FILTER_DEBOUNCE_MS: {}", ms))?;
        config = config.with_filter_debounce(Duration::from_millis(ms));
    }

    Ok(config)
}
