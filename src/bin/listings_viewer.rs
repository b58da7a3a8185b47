use abujafinder::models::Category;
use abujafinder::{logging, tui, utils};
use anyhow::{anyhow, Result};
use clap::Parser;
use std::io;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Show saved listings, cheapest first")]
struct Args {
    /// Path to the listings JSON file
    #[clap(short, long, default_value = "listings.json")]
    input: String,

    /// Only show one category, e.g. "Block of Flats"
    #[clap(short, long)]
    category: Option<String>,

    /// Show at most this many listings
    #[clap(short, long)]
    limit: Option<usize>,

    /// Enable debug output
    #[clap(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.debug);

    let category = match args.category.as_deref() {
        Some(label) => Some(Category::from_label(label).ok_or_else(|| {
            anyhow!(
                "Unknown category '{}', expected one of: {}",
                label,
                Category::ALL.map(|c| c.label()).join(", ")
            )
        })?),
        None => None,
    };

    let mut listings = utils::load_listings_from_json(&args.input)?;
    if let Some(category) = category {
        listings.retain(|listing| listing.title == category);
    }
    utils::sort_by_price(&mut listings);
    if let Some(limit) = args.limit {
        listings.truncate(limit);
    }

    tui::show_listings(&mut io::stdout(), &listings)?;

    Ok(())
}
