use crate::common_scraper::PlatformScraper;
use crate::scraper;
use anyhow::Result;
use reqwest::blocking::Client;

/// Live source: the nigeriapropertycentre.com rental index.
pub struct PropertyCentreScraper {
    client: Client,
}

impl PropertyCentreScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: scraper::build_client()?,
        })
    }
}

impl PlatformScraper for PropertyCentreScraper {
    fn name(&self) -> &str {
        "NigeriaPropertyCentre"
    }

    fn fetch_document(&self, url: &str) -> Result<String> {
        scraper::fetch_page(&self.client, url)
    }
}
