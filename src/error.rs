//! Reasons a card does not become a listing.
//!
//! None of these abort a run. The normalizer turns each one into a skipped
//! card and a counter in the run summary.

/// Why a single card was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("card has no title")]
    MissingTitle,

    #[error("card has no price")]
    MissingPrice,

    #[error("card has no link")]
    MissingLink,

    /// Cleaned price fell outside the accepted range.
    #[error("price {price} outside accepted range")]
    PriceOutOfRange { price: u64 },

    /// Anything else that went wrong while reading the card.
    #[error("malformed card: {0}")]
    Malformed(String),
}

impl Rejection {
    pub fn is_missing_field(&self) -> bool {
        matches!(
            self,
            Rejection::MissingTitle | Rejection::MissingPrice | Rejection::MissingLink
        )
    }
}
