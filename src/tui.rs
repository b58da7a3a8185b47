use crate::models::Listing;
use crate::normalizer::RunSummary;
use chrono::{DateTime, Local};
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

const ADDRESS_WIDTH: usize = 28;

/// Colored end-of-run report for the scraper binary.
pub fn show_run_summary(summary: &RunSummary, finished_at: DateTime<Local>, saved_to: &str) -> io::Result<()> {
    let mut out = io::stdout();

    execute!(
        out,
        Print("─".repeat(80)),
        Print("\n"),
        SetForegroundColor(Color::Green),
        Print(format!("✅ {} listings accepted", summary.accepted)),
        ResetColor,
        SetForegroundColor(Color::DarkGrey),
        Print(format!(" of {} cards", summary.cards_seen)),
        ResetColor
    )?;

    if summary.rejected() > 0 {
        execute!(
            out,
            SetForegroundColor(Color::Yellow),
            Print(format!(
                " | {} skipped ({} missing fields, {} out of price range, {} malformed)",
                summary.rejected(),
                summary.missing_field,
                summary.out_of_range,
                summary.malformed
            )),
            ResetColor
        )?;
    }

    execute!(
        out,
        Print("\n"),
        SetForegroundColor(Color::DarkGrey),
        Print(format!(
            "📁 Saved to {} at {}\n",
            saved_to,
            finished_at.format("%Y-%m-%d %H:%M:%S")
        )),
        ResetColor
    )?;

    Ok(())
}

/// Prints listings as a table, in the order given.
pub fn show_listings<W: Write>(out: &mut W, listings: &[Listing]) -> io::Result<()> {
    if listings.is_empty() {
        execute!(
            out,
            SetForegroundColor(Color::Yellow),
            Print("No listings to show.\n"),
            ResetColor
        )?;
        return Ok(());
    }

    execute!(
        out,
        SetForegroundColor(Color::White),
        Print(format!(
            "{:<22} {:>15}  {:>3} {:>3} {:>3} {:>3}  {:<width$}  {}\n",
            "Category",
            "Price (₦)",
            "Bd",
            "Ba",
            "WC",
            "P",
            "Address",
            "Link",
            width = ADDRESS_WIDTH
        )),
        Print("─".repeat(120)),
        Print("\n"),
        ResetColor
    )?;

    for listing in listings {
        let features = listing.features();
        execute!(
            out,
            SetForegroundColor(Color::Cyan),
            Print(format!("{:<22} ", listing.title.label())),
            SetForegroundColor(Color::Green),
            Print(format!("{:>15}  ", format_price(listing.price))),
            ResetColor,
            Print(format!(
                "{:>3} {:>3} {:>3} {:>3}  {:<width$}  ",
                features.bedrooms,
                features.bathrooms,
                features.toilets,
                features.parking_space,
                truncate(&listing.address, ADDRESS_WIDTH),
                width = ADDRESS_WIDTH
            )),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{}\n", listing.link)),
            ResetColor
        )?;
    }

    execute!(
        out,
        SetForegroundColor(Color::DarkGrey),
        Print(format!("{} shown\n", listings.len())),
        ResetColor
    )?;

    Ok(())
}

/// 12000000 -> "12,000,000"
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(ch);
    }

    formatted
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
