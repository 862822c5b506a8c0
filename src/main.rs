#![warn(clippy::pedantic)]

mod discovery_response;
mod export;
mod fetch;
mod prompt;
mod query;
mod summary;

use std::env;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;

use crate::fetch::DiscoveryClient;
use crate::fetch::PageSource;
use crate::query::Query;

const API_KEY_VAR: &str = "TICKETMASTER_API_KEY";

/// Fetches all events for the query, prints them and writes them to `dir`.
///
/// Nothing is written unless every page was fetched.
async fn export_events<S: PageSource>(
    source: &S,
    query: &Query,
    dir: &Path,
    out: &mut impl Write,
) -> anyhow::Result<PathBuf> {
    let events = fetch::fetch_all(source, query).await?;
    summary::print_events(&events, &query.location(), out)?;

    let path = dir.join(query.output_file_name());
    export::write_json(&events, &path)?;
    Ok(path)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // a builder for `FmtSubscriber`.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        // completes the builder.
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {e}");
    }

    println!("=== Ticketmaster Event Exporter ===");
    println!("Get your free API key at: https://developer.ticketmaster.com/\n");

    let input = prompt::collect(
        &mut io::stdin().lock(),
        &mut io::stdout(),
        env::var(API_KEY_VAR).ok(),
    )?;
    let query = Query::new(
        input.api_key,
        &input.country_code,
        input.city,
        Local::now().date_naive(),
    )
    .with_keyword(input.keyword);

    println!("\nSearching for events in {}", query.location());
    println!(
        "Date range: {} to {}",
        query.start_date().format("%Y-%m-%d"),
        query.end_date().format("%Y-%m-%d")
    );
    tracing::info!("Fetching events from the Discovery API");

    let client = DiscoveryClient::new()?;
    let path = export_events(&client, &query, Path::new("."), &mut io::stdout()).await?;
    println!("\nResults saved to {}", path.display());

    Ok(())
}
