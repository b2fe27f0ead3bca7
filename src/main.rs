use anyhow::{Context, Result};
use dealership_catalog::config::{Config, SourceConfig};
use dealership_catalog::models::{ListingDraft, Snapshot};
use dealership_catalog::report::CatalogReport;
use dealership_catalog::sources::{load_snapshot, JsonFileSource, ListingSource, SupabaseSource};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [cmd, path] if cmd == "validate" => validate_draft(&config, path).await,
        [] => build_catalog(&config).await,
        _ => {
            eprintln!("usage: dealership-catalog [validate <draft.json>]");
            std::process::exit(2);
        }
    }
}

async fn build_catalog(config: &Config) -> Result<()> {
    info!("🚗 Dealership Catalog");
    info!("=====================");

    let source: Box<dyn ListingSource> = match &config.source {
        SourceConfig::Supabase { url, anon_key } => Box::new(SupabaseSource::new(url, anon_key)?),
        SourceConfig::File(path) => Box::new(JsonFileSource::new(path.clone())),
    };

    let snapshot: Snapshot = load_snapshot(source.as_ref()).await;
    if snapshot.is_empty() {
        warn!("No available listings; every section will be empty");
    }

    let filter = config.filter.to_spec(&snapshot.listings);
    let report = CatalogReport::build(&snapshot, config.categorize_options(), filter);

    for category in &report.categories {
        println!("== {} ({}) ==", category.name, category.listings.len());
        println!("   {}", category.description);
        for listing in &category.listings {
            let contact = listing.contact(&config.contact);
            println!("   - {} ({} • {})", listing.title, listing.year, listing.location);
            println!("     {}", listing.display_price());
            println!("     {} | {}", contact.phone_link(), contact.whatsapp_link());
        }
        println!();
    }

    println!("== Filtered ({} of {}) ==", report.filtered.len(), report.total_listings);
    for listing in &report.filtered {
        println!("   - {} [{}] {}", listing.title, listing.type_label(), listing.display_price());
    }
    println!();

    if !report.price_ranges.is_empty() {
        println!("== Price ranges ==");
        for range in &report.price_ranges {
            println!("   {}", range.display());
        }
        println!();
    }

    let json = serde_json::to_string_pretty(&report)?;
    tokio::fs::write(&config.output, json)
        .await
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    info!("💾 Saved catalog views to {}", config.output.display());

    Ok(())
}

async fn validate_draft(config: &Config, path: &str) -> Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;
    let draft: ListingDraft = serde_json::from_str(&raw).context("Draft is not valid JSON")?;

    match draft.validate(config.min_photos) {
        Ok(listing) => {
            info!("✅ Draft is valid: {} {}", listing.brand, listing.model);
            println!("{}", serde_json::to_string_pretty(&listing)?);
            Ok(())
        }
        Err(e) => {
            warn!("Draft rejected: {}", e);
            Err(e.into())
        }
    }
}
