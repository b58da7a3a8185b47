use crate::normalizer::{Card, RawCard};
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info};

pub const LISTING_URL: &str = "https://nigeriapropertycentre.com/for-rent/abuja";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

pub fn fetch_page(client: &Client, url: &str) -> Result<String> {
    info!(url, "fetching listing page");

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch listing page: {}", url))?;

    if !response.status().is_success() {
        return Err(anyhow!("Failed to fetch listing page: HTTP {}", response.status()));
    }

    let body = response.text().context("Failed to read response body")?;
    debug!(bytes = body.len(), "received listing page");
    Ok(body)
}

/// CSS selectors for the listing cards of the for-rent index page.
pub struct CardSelectors {
    card: Selector,
    title: Selector,
    price: Selector,
    address: Selector,
    content: Selector,
    link: Selector,
    aux_info: Selector,
}

impl CardSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            card: parse_selector(r#"div[itemprop="itemListElement"]"#)?,
            title: parse_selector(r#"h3[itemprop="name"]"#)?,
            price: parse_selector("span.pull-sm-left")?,
            address: parse_selector("address")?,
            content: parse_selector("h4.content-title")?,
            link: parse_selector("a[href]")?,
            aux_info: parse_selector("ul.aux-info")?,
        })
    }

    pub fn cards<'a, 'b>(&'b self, document: &'a Html) -> impl Iterator<Item = HtmlCard<'a, 'b>> {
        document.select(&self.card).map(move |element| HtmlCard {
            element,
            selectors: self,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| anyhow!("Failed to parse selector {}: {:?}", selector, e))
}

/// A card handle borrowing one listing block of a parsed page.
pub struct HtmlCard<'a, 'b> {
    element: ElementRef<'a>,
    selectors: &'b CardSelectors,
}

impl HtmlCard<'_, '_> {
    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.element.select(selector).next().map(element_text)
    }

    /// Detaches the card from the document so it can cross threads.
    pub fn to_raw(&self) -> RawCard {
        RawCard {
            title: self.title(),
            price_text: self.price_text(),
            address: self.address(),
            content: self.content(),
            href: self.href(),
            aux_info: self.aux_info(),
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

impl Card for HtmlCard<'_, '_> {
    fn title(&self) -> Option<String> {
        self.first_text(&self.selectors.title)
            .map(|t| t.trim().to_string())
    }

    fn price_text(&self) -> Option<String> {
        self.first_text(&self.selectors.price)
    }

    fn address(&self) -> Option<String> {
        self.first_text(&self.selectors.address)
            .map(|a| a.trim().to_string())
    }

    fn content(&self) -> Option<String> {
        self.first_text(&self.selectors.content)
    }

    fn href(&self) -> Option<String> {
        self.element
            .select(&self.selectors.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string)
    }

    fn aux_info(&self) -> Vec<String> {
        self.element
            .select(&self.selectors.aux_info)
            .map(element_text)
            .collect()
    }
}

/// Collects every listing card of a page as owned [`RawCard`]s.
pub fn extract_cards(document: &Html) -> Result<Vec<RawCard>> {
    let selectors = CardSelectors::new()?;
    let cards: Vec<RawCard> = selectors.cards(document).map(|card| card.to_raw()).collect();
    debug!(cards = cards.len(), "extracted listing cards");
    Ok(cards)
}
