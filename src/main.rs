mod client;
mod config;
mod model;
mod normalizer;
mod query;
mod render;
mod utils;

use client::{HttpSearchClient, SearchService};
use config::{load_config, AppConfig, SearchInput};
use normalizer::OfferNormalizer;
use query::SearchForm;
use render::{format_card, ResultBoard};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use futures::future::join_all;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let service = match HttpSearchClient::new(
        &config.search_url,
        Duration::from_secs(config.request_timeout_seconds),
    ) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize search client: {}", e);
            return;
        }
    };
    let normalizer = OfferNormalizer::new(config.clock);
    let board = Arc::new(Mutex::new(ResultBoard::new()));

    info!("Searches to run: {}", config.searches.len());

    // All searches run at once; the board keeps the newest submission.
    let tasks: Vec<_> = config
        .searches
        .iter()
        .map(|input| process_search(input, &service, &normalizer, board.clone()))
        .collect();
    join_all(tasks).await;

    let board = board.lock().await;
    info!("Showing {} offers", board.records().len());
    for record in board.records() {
        println!("{}\n", format_card(record));
    }
}

/// Runs one search end to end: form input, request, normalization, board update.
async fn process_search(
    input: &SearchInput,
    service: &dyn SearchService,
    normalizer: &OfferNormalizer,
    board: Arc<Mutex<ResultBoard>>,
) {
    let mut form = SearchForm::new();
    form.set_field("origin", &input.origin);
    form.set_field("destination", &input.destination);
    form.set_field("date", &input.date);
    form.set_field("passengers", &input.passengers);

    let criteria = match form.to_criteria() {
        Ok(c) => c,
        Err(e) => {
            warn!("Invalid search input: {}", e);
            return;
        }
    };

    let ticket = board.lock().await.begin();

    let outcome = service
        .search(&criteria)
        .await
        .map(|response| normalizer.assemble(response).records);

    if let Some(notice) = board.lock().await.finish(ticket, outcome) {
        error!("{}", notice);
    }
}
