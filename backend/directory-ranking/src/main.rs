use anyhow::{bail, Context, Result};
use directory_ranking::{config::LogFormat, CatalogQuery, Config, DirectorySearch, InMemoryCatalog};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Rank one directory search against a JSON catalog fixture.
///
/// Usage: directory-ranking <category> <city> [neighborhood] [subcategory]
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load config")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
    }

    let mut args = std::env::args().skip(1);
    let (Some(category), Some(city)) = (args.next(), args.next()) else {
        bail!("usage: directory-ranking <category> <city> [neighborhood] [subcategory]");
    };
    let mut query = CatalogQuery::new(category, city);
    if let Some(hood) = args.next().filter(|h| h != "all") {
        query = query.with_neighborhood(hood);
    }
    if let Some(sub) = args.next() {
        query = query.with_subcategory(sub);
    }

    let path = config
        .catalog_fixture_path
        .as_deref()
        .context("CATALOG_FIXTURE_PATH must be set")?;
    let catalog = InMemoryCatalog::from_path(path)?;

    info!(service = %config.service_name, "Running directory search");

    let search = DirectorySearch::with_default_top_pinned_count(catalog, config.default_top_pinned_count);
    let ranked = search.search(&query).await?;

    let ids: Vec<&str> = ranked.iter().map(|c| c.id.as_str()).collect();
    println!("{}", serde_json::to_string_pretty(&ids)?);

    Ok(())
}
