use crate::models::Listing;
use crate::normalizer::{self, NormalizerConfig, RunSummary};
use crate::scraper::{extract_cards, LISTING_URL};
use anyhow::Result;
use chrono::{DateTime, Local};
use scraper::Html;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ScrapingOptions {
    pub output_file: String,
    pub listing_url: String,
    /// Normalizer threads; 0 or 1 keeps everything on the calling thread.
    pub workers: usize,
    pub csv_export: Option<String>,
    pub normalizer: NormalizerConfig,
}

impl Default for ScrapingOptions {
    fn default() -> Self {
        Self {
            output_file: "listings.json".to_string(),
            listing_url: LISTING_URL.to_string(),
            workers: 1,
            csv_export: None,
            normalizer: NormalizerConfig::default(),
        }
    }
}

/// Where listing pages come from.
pub trait PlatformScraper {
    fn name(&self) -> &str;
    fn fetch_document(&self, url: &str) -> Result<String>;
}

pub struct ScrapingResult {
    pub listings: Vec<Listing>,
    pub summary: RunSummary,
    pub finished_at: DateTime<Local>,
}

/// Fetches one listing page and normalizes every card on it.
///
/// Only the fetch can fail the run. Card problems end up in the summary.
pub fn run_scraper_with_options<T: PlatformScraper>(
    scraper: &T,
    options: &ScrapingOptions,
) -> Result<ScrapingResult> {
    info!(source = scraper.name(), url = %options.listing_url, "starting scrape");

    let body = scraper.fetch_document(&options.listing_url)?;
    let cards = {
        let document = Html::parse_document(&body);
        extract_cards(&document)?
    };
    info!(cards = cards.len(), "found listing cards");

    let report = normalizer::normalize_cards_parallel(&cards, &options.normalizer, options.workers);
    let summary = report.summary;

    info!(
        cards = summary.cards_seen,
        accepted = summary.accepted,
        rejected = summary.rejected(),
        missing_field = summary.missing_field,
        out_of_range = summary.out_of_range,
        malformed = summary.malformed,
        "scrape complete"
    );

    Ok(ScrapingResult {
        listings: report.listings,
        summary,
        finished_at: Local::now(),
    })
}
