use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use recipe_finder::{render, FinderConfig, RecipeFinder, SearchOutcome};

#[derive(Parser)]
#[command(name = "recipe-finder")]
#[command(author, version, about = "Find recipes by the ingredients you have", long_about = None)]
struct Cli {
    /// Comma-separated ingredients, e.g. "egg, milk, flour". Reads one search
    /// per line from stdin when omitted.
    ingredients: Option<String>,

    /// Write the results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the results in a complete HTML page
    #[arg(long)]
    page: bool,

    /// Number of recipes to request
    #[arg(short, long)]
    number: Option<u32>,

    /// Maximum recipe detail requests in flight
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Spoonacular API key (overrides config and SPOONACULAR_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Base URL of the recipe API
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let config = FinderConfig::load()?;
    let mut builder = RecipeFinder::builder().config(config);
    if let Some(key) = cli.api_key.clone() {
        builder = builder.api_key(key);
    }
    if let Some(url) = cli.base_url.clone() {
        builder = builder.base_url(url);
    }
    if let Some(number) = cli.number {
        builder = builder.number(number);
    }
    if let Some(limit) = cli.concurrency {
        builder = builder.detail_concurrency(limit);
    }

    let finder = match builder.build() {
        Ok(finder) => finder,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e.into());
        }
    };

    match cli.ingredients.as_deref() {
        Some(input) => submit(&finder, &cli, input).await?,
        None => {
            info!("Reading ingredient lists from stdin, one search per line");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                submit(&finder, &cli, &line).await?;
            }
        }
    }

    Ok(())
}

async fn submit(
    finder: &RecipeFinder,
    cli: &Cli,
    input: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = finder.search(input).await;
    if let SearchOutcome::Rendered(summary) = &outcome {
        info!(
            "{} card(s), {} detail error(s)",
            summary.cards,
            summary.failed.len()
        );
    }

    let html = if cli.page {
        render::page(input, &finder.html())
    } else {
        finder.html()
    };

    match &cli.output {
        Some(path) => tokio::fs::write(path, html).await?,
        None => println!("{}", html),
    }

    Ok(())
}
