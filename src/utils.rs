use crate::models::Listing;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Writes listings as a pretty-printed JSON array, keeping the previous file
/// as `<path>.bak`.
pub fn save_listings_to_json(listings: &[Listing], output_path: &str) -> Result<()> {
    let path = Path::new(output_path);

    if path.exists() {
        let backup = format!("{}.bak", output_path);
        fs::copy(path, &backup)
            .with_context(|| format!("Failed to back up {} to {}", output_path, backup))?;
        debug!(backup = %backup, "backed up previous listings file");
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;
    let writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    listings
        .serialize(&mut serializer)
        .with_context(|| format!("Failed to write listings to {}", output_path))?;
    serializer
        .into_inner()
        .flush()
        .with_context(|| format!("Failed to flush {}", output_path))?;

    info!(count = listings.len(), path = output_path, "saved listings");
    Ok(())
}

/// Reads a listings file. A missing file is an empty collection.
pub fn load_listings_from_json(input_path: &str) -> Result<Vec<Listing>> {
    let path = Path::new(input_path);

    if !path.exists() {
        debug!(path = input_path, "listings file does not exist");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to open input file: {}", input_path))?;
    let listings: Vec<Listing> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse listings from {}", input_path))?;

    debug!(count = listings.len(), path = input_path, "loaded listings");
    Ok(listings)
}

pub fn save_listings_to_csv(listings: &[Listing], output_path: &str) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;

    // Header comes from the serde field names, same order as the JSON keys.
    let mut writer = csv::Writer::from_writer(file);
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;

    info!(count = listings.len(), path = output_path, "exported listings to CSV");
    Ok(())
}

/// Cheapest first. Equal prices keep their stored order.
pub fn sort_by_price(listings: &mut [Listing]) {
    listings.sort_by_key(|listing| listing.price);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("abujafinder-utils-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    fn listing(price: u64, link: &str) -> Listing {
        Listing {
            title: Category::BlockOfFlats,
            address: "Wuse 2, Abuja".to_string(),
            price,
            link: link.to_string(),
            bedrooms: 2,
            bathrooms: 2,
            toilets: 3,
            parking_space: 1,
            original_title: "2 Bedroom Flat".to_string(),
        }
    }

    #[test]
    fn json_save_then_load() {
        let path = temp_path("listings.json");
        let path = path.to_str().unwrap();
        let listings = vec![listing(8_000_000, "a"), listing(6_000_000, "b")];

        save_listings_to_json(&listings, path).unwrap();
        assert_eq!(load_listings_from_json(path).unwrap(), listings);

        let raw = fs::read_to_string(path).unwrap();
        assert!(raw.starts_with("[\n    {\n        \"title\": \"Block of Flats\""));
    }

    #[test]
    fn saving_over_existing_file_keeps_backup() {
        let path = temp_path("backup.json");
        let path = path.to_str().unwrap();

        save_listings_to_json(&[listing(7_000_000, "old")], path).unwrap();
        save_listings_to_json(&[listing(9_000_000, "new")], path).unwrap();

        let backup = load_listings_from_json(&format!("{}.bak", path)).unwrap();
        assert_eq!(backup[0].link, "old");
        assert_eq!(load_listings_from_json(path).unwrap()[0].link, "new");
    }

    #[test]
    fn loading_missing_file_is_empty() {
        let path = temp_path("does-not-exist.json");
        assert!(load_listings_from_json(path.to_str().unwrap()).unwrap().is_empty());
    }

    #[test]
    fn csv_export_has_header_and_rows() {
        let path = temp_path("listings.csv");
        let path = path.to_str().unwrap();

        save_listings_to_csv(&[listing(6_500_000, "https://x/1")], path).unwrap();

        let raw = fs::read_to_string(path).unwrap();
        let mut lines = raw.lines();
        assert_eq!(
            lines.next(),
            Some("title,address,price,link,bedrooms,bathrooms,toilets,parking_space,original_title")
        );
        assert_eq!(
            lines.next(),
            Some("Block of Flats,\"Wuse 2, Abuja\",6500000,https://x/1,2,2,3,1,2 Bedroom Flat")
        );
    }

    #[test]
    fn sorts_ascending_and_stable() {
        let mut listings = vec![
            listing(9_000_000, "c"),
            listing(0, "missing"),
            listing(6_000_000, "a"),
            listing(6_000_000, "b"),
        ];
        sort_by_price(&mut listings);
        let links: Vec<&str> = listings.iter().map(|l| l.link.as_str()).collect();
        assert_eq!(links, ["missing", "a", "b", "c"]);
    }
}
