//! Listing assembly: one card in, one accepted [`Listing`] or a [`Rejection`] out.

use crate::error::Rejection;
use crate::models::{Features, Listing};
use crate::parser;
use std::any::Any;
use std::ops::RangeInclusive;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

pub const BASE_URL: &str = "https://nigeriapropertycentre.com";
pub const DEFAULT_ADDRESS: &str = "Abuja";
pub const MIN_PRICE: u64 = 5_000_000;
pub const MAX_PRICE: u64 = 5_000_000_000;

/// Text lookups exposed by one listing block of the source page.
///
/// Every lookup is optional; the normalizer decides which absences are fatal
/// for the card.
pub trait Card {
    fn title(&self) -> Option<String>;
    fn price_text(&self) -> Option<String>;
    fn address(&self) -> Option<String>;
    /// Free-text body of the card, used when no usable aux info exists.
    fn content(&self) -> Option<String>;
    /// Relative link to the listing detail page.
    fn href(&self) -> Option<String>;
    /// Structured "aux info" blocks, e.g. "4 beds | 3 baths | 2 cars".
    fn aux_info(&self) -> Vec<String>;
}

impl<C: Card + ?Sized> Card for &C {
    fn title(&self) -> Option<String> {
        (**self).title()
    }
    fn price_text(&self) -> Option<String> {
        (**self).price_text()
    }
    fn address(&self) -> Option<String> {
        (**self).address()
    }
    fn content(&self) -> Option<String> {
        (**self).content()
    }
    fn href(&self) -> Option<String> {
        (**self).href()
    }
    fn aux_info(&self) -> Vec<String> {
        (**self).aux_info()
    }
}

/// Owned card text, detached from the parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCard {
    pub title: Option<String>,
    pub price_text: Option<String>,
    pub address: Option<String>,
    pub content: Option<String>,
    pub href: Option<String>,
    pub aux_info: Vec<String>,
}

impl Card for RawCard {
    fn title(&self) -> Option<String> {
        self.title.clone()
    }
    fn price_text(&self) -> Option<String> {
        self.price_text.clone()
    }
    fn address(&self) -> Option<String> {
        self.address.clone()
    }
    fn content(&self) -> Option<String> {
        self.content.clone()
    }
    fn href(&self) -> Option<String> {
        self.href.clone()
    }
    fn aux_info(&self) -> Vec<String> {
        self.aux_info.clone()
    }
}

/// Sources of amenity counts, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureTier {
    /// All `aux-info` blocks of the card joined by a space.
    AuxInfo,
    /// The card's content heading.
    Content,
}

pub const DEFAULT_TIERS: [FeatureTier; 2] = [FeatureTier::AuxInfo, FeatureTier::Content];

impl FeatureTier {
    /// Returns `None` when the card has nothing for this tier to read.
    pub fn extract<C: Card + ?Sized>(&self, card: &C) -> Option<Features> {
        match self {
            FeatureTier::AuxInfo => {
                let blocks = card.aux_info();
                if blocks.is_empty() {
                    None
                } else {
                    Some(parser::parse_features(&blocks.join(" ")))
                }
            }
            FeatureTier::Content => card.content().map(|text| parser::parse_features(&text)),
        }
    }
}

/// Runs the tiers in order and keeps the result of the last one that had input,
/// stopping early at the first result with a bedroom count.
///
/// Tiers are never merged: a later tier replaces the earlier result whole.
pub fn extract_features<C: Card + ?Sized>(card: &C, tiers: &[FeatureTier]) -> Features {
    let mut features = Features::default();

    for tier in tiers {
        if let Some(found) = tier.extract(card) {
            features = found;
            if features.bedrooms > 0 {
                break;
            }
        }
    }

    features
}

#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    pub base_url: String,
    pub default_address: String,
    pub price_range: RangeInclusive<u64>,
    pub tiers: Vec<FeatureTier>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            default_address: DEFAULT_ADDRESS.to_string(),
            price_range: MIN_PRICE..=MAX_PRICE,
            tiers: DEFAULT_TIERS.to_vec(),
        }
    }
}

/// Builds a listing from one card, or says why the card is skipped.
pub fn normalize_card<C: Card + ?Sized>(
    card: &C,
    config: &NormalizerConfig,
) -> Result<Listing, Rejection> {
    let original_title = card.title().ok_or(Rejection::MissingTitle)?.trim().to_string();
    let price_text = card.price_text().ok_or(Rejection::MissingPrice)?;

    let title = parser::map_title(&original_title);
    let price = parser::clean_price(&price_text);

    let address = card
        .address()
        .map(|a| a.trim().to_string())
        .unwrap_or_else(|| config.default_address.clone());

    let href = card.href().ok_or(Rejection::MissingLink)?;
    let link = format!("{}{}", config.base_url, href);

    let features = extract_features(card, &config.tiers);

    if !config.price_range.contains(&price) {
        return Err(Rejection::PriceOutOfRange { price });
    }

    Ok(Listing {
        title,
        address,
        price,
        link,
        bedrooms: features.bedrooms,
        bathrooms: features.bathrooms,
        toilets: features.toilets,
        parking_space: features.parking_space,
        original_title,
    })
}

/// [`normalize_card`] behind a panic boundary, so a misbehaving card handle
/// costs one card instead of the batch.
pub fn normalize_card_guarded<C: Card + ?Sized>(
    card: &C,
    config: &NormalizerConfig,
) -> Result<Listing, Rejection> {
    panic::catch_unwind(AssertUnwindSafe(|| normalize_card(card, config))).unwrap_or_else(
        |payload| {
            let message = panic_message(payload.as_ref());
            warn!(%message, "card processing panicked, skipping card");
            Err(Rejection::Malformed(message))
        },
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "card handler panicked".to_string()
    }
}

/// Card counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cards_seen: usize,
    pub accepted: usize,
    pub missing_field: usize,
    pub out_of_range: usize,
    pub malformed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &Result<Listing, Rejection>) {
        self.cards_seen += 1;
        match outcome {
            Ok(_) => self.accepted += 1,
            Err(rejection) if rejection.is_missing_field() => self.missing_field += 1,
            Err(Rejection::PriceOutOfRange { .. }) => self.out_of_range += 1,
            Err(_) => self.malformed += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.missing_field + self.out_of_range + self.malformed
    }

    pub fn merge(&mut self, other: &RunSummary) {
        self.cards_seen += other.cards_seen;
        self.accepted += other.accepted;
        self.missing_field += other.missing_field;
        self.out_of_range += other.out_of_range;
        self.malformed += other.malformed;
    }
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    pub listings: Vec<Listing>,
    pub summary: RunSummary,
}

/// Normalizes cards one after another, keeping input order.
pub fn normalize_cards<I>(cards: I, config: &NormalizerConfig) -> NormalizeReport
where
    I: IntoIterator,
    I::Item: Card,
{
    let mut report = NormalizeReport::default();

    for (index, card) in cards.into_iter().enumerate() {
        let outcome = normalize_card_guarded(&card, config);
        report.summary.record(&outcome);
        match outcome {
            Ok(listing) => report.listings.push(listing),
            Err(rejection) => debug!(card = index, %rejection, "skipping card"),
        }
    }

    report
}

/// Normalizes cards on up to `workers` scoped threads.
///
/// Each worker takes a contiguous chunk and the chunk results are concatenated
/// in chunk order, so the output order matches [`normalize_cards`].
pub fn normalize_cards_parallel<C>(
    cards: &[C],
    config: &NormalizerConfig,
    workers: usize,
) -> NormalizeReport
where
    C: Card + Sync,
{
    if workers <= 1 || cards.len() < 2 {
        return normalize_cards(cards, config);
    }

    let chunk_size = cards.len().div_ceil(workers);
    let mut report = NormalizeReport::default();

    std::thread::scope(|scope| {
        let handles: Vec<_> = cards
            .chunks(chunk_size)
            .map(|chunk| (chunk.len(), scope.spawn(move || normalize_cards(chunk, config))))
            .collect();

        for (len, handle) in handles {
            match handle.join() {
                Ok(part) => {
                    report.listings.extend(part.listings);
                    report.summary.merge(&part.summary);
                }
                Err(_) => {
                    warn!(cards = len, "normalizer worker died, dropping its chunk");
                    report.summary.cards_seen += len;
                    report.summary.malformed += len;
                }
            }
        }
    });

    report
}
