use abujafinder::common_scraper::{run_scraper_with_options, ScrapingOptions};
use abujafinder::scraper::LISTING_URL;
use abujafinder::scrapers::PropertyCentreScraper;
use abujafinder::{logging, tui, utils};
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Abujafinder - Rental listing scraper for Abuja")]
struct Args {
    /// Path to output JSON file
    #[clap(short, long, default_value = "listings.json")]
    output: String,

    /// Listing page to scrape
    #[clap(short, long, default_value = LISTING_URL)]
    url: String,

    /// Number of threads used to normalize cards
    #[clap(short, long, default_value = "1")]
    workers: usize,

    /// Also export the accepted listings as CSV
    #[clap(long)]
    csv: Option<String>,

    /// Enable debug output
    #[clap(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.debug);

    let options = ScrapingOptions {
        output_file: args.output,
        listing_url: args.url,
        workers: args.workers,
        csv_export: args.csv,
        ..ScrapingOptions::default()
    };

    let scraper = PropertyCentreScraper::new()?;
    let result = run_scraper_with_options(&scraper, &options)?;

    utils::save_listings_to_json(&result.listings, &options.output_file)?;
    if let Some(csv_path) = &options.csv_export {
        utils::save_listings_to_csv(&result.listings, csv_path)?;
    }

    tui::show_run_summary(&result.summary, result.finished_at, &options.output_file)?;

    Ok(())
}
