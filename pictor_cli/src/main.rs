use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pictor_core::{
    AggregationResult, Aggregator, Config, FileResultCache, Identity, SearchService,
    StaticAccessGate,
};

#[derive(Parser)]
#[command(name = "pictor", version, about = "Concurrent multi-provider image search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search Unsplash, Pixabay and Storyblocks for a query
    Search {
        /// Free-text search query
        query: String,

        /// Credential token presented to the access gate
        #[arg(long, env = "PICTOR_TOKEN")]
        token: String,

        /// Print the raw JSON result instead of a formatted list
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pictor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search { query, token, json } => {
            let config = Config::from_env();
            let identity = std::env::var("PICTOR_IDENTITY").unwrap_or_else(|_| "API_USER".into());
            tracing::debug!(
                caching = config.cache_results,
                identity,
                "Loaded configuration from environment"
            );

            // The CLI's gate accepts exactly the configured token. A deployed
            // service would swap in a real credential store behind the same
            // trait.
            let gate = Arc::new(
                StaticAccessGate::new().with_token(token.clone(), Identity::new(identity)),
            );

            let mut aggregator = Aggregator::new(&config);
            if config.cache_results {
                aggregator = aggregator.with_cache(Arc::new(FileResultCache::new_default()));
            }

            let service = SearchService::new(gate, aggregator);
            tracing::debug!(query, "Dispatching search");
            match service.search(&token, &query).await {
                Ok(result) => print_result(&query, &result, json),
                Err(e) => {
                    eprintln!("{}: {}", "Error".red().bold(), e);
                    process::exit(1);
                }
            }
        }
    }
}

fn print_result(query: &str, result: &AggregationResult, json: bool) {
    if json {
        match serde_json::to_string_pretty(result) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("{}: {}", "Error".red().bold(), e);
                process::exit(1);
            }
        }
        return;
    }

    println!(
        "{} result(s) for {}",
        result.len().bold(),
        format!("\"{query}\"").cyan()
    );
    for record in result {
        let title = if record.title.is_empty() {
            "(untitled)".to_string()
        } else {
            record.title.clone()
        };
        println!(
            "  [{}] {} {}",
            record.source.green(),
            record.image_id.bold(),
            title
        );
        println!("      thumb:   {}", record.thumbnails.dimmed());
        println!("      preview: {}", record.preview.dimmed());
        if !record.tags.is_empty() {
            println!("      tags:    {}", record.tags.join(", ").dimmed());
        }
    }
}
