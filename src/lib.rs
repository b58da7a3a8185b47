//! Scrapes Abuja rental listings from nigeriapropertycentre.com and
//! normalizes them into typed [`models::Listing`] records.

pub mod common_scraper;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod parser;
pub mod scraper;
pub mod scrapers;
pub mod tui;
pub mod utils;
