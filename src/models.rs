use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of property categories a listing title is normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    #[serde(rename = "Detached Duplex")]
    DetachedDuplex,
    #[serde(rename = "Semi Detached Duplex")]
    SemiDetachedDuplex,
    #[serde(rename = "Terraced Duplexes")]
    TerracedDuplexes,
    #[serde(rename = "Detached Bungalow")]
    DetachedBungalow,
    #[serde(rename = "Semi Detached Bungalow")]
    SemiDetachedBungalow,
    #[serde(rename = "Terraced Bungalow")]
    TerracedBungalow,
    #[serde(rename = "Block of Flats")]
    BlockOfFlats,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::DetachedDuplex,
        Category::SemiDetachedDuplex,
        Category::TerracedDuplexes,
        Category::DetachedBungalow,
        Category::SemiDetachedBungalow,
        Category::TerracedBungalow,
        Category::BlockOfFlats,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::DetachedDuplex => "Detached Duplex",
            Category::SemiDetachedDuplex => "Semi Detached Duplex",
            Category::TerracedDuplexes => "Terraced Duplexes",
            Category::DetachedBungalow => "Detached Bungalow",
            Category::SemiDetachedBungalow => "Semi Detached Bungalow",
            Category::TerracedBungalow => "Terraced Bungalow",
            Category::BlockOfFlats => "Block of Flats",
        }
    }

    /// Looks up a category by its exact label, ignoring case.
    ///
    /// Unlike [`crate::parser::map_title`] this is not a heuristic: it only
    /// recognizes the seven labels themselves.
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Amenity counts extracted from a single text blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub toilets: u32,
    pub parking_space: u32,
}

/// A fully normalized rental listing.
///
/// Records are assembled by [`crate::normalizer`] and never modified after
/// acceptance. Field order here is the key order of the persisted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    // Stored records missing a key read back with its default (0, "", or
    // the fallback category) instead of failing the whole file.
    #[serde(default)]
    pub title: Category,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub toilets: u32,
    #[serde(default)]
    pub parking_space: u32,
    #[serde(default)]
    pub original_title: String,
}

impl Listing {
    pub fn features(&self) -> Features {
        Features {
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            toilets: self.toilets,
            parking_space: self.parking_space,
        }
    }
}
