// One ItemRecord is produced per item row of the price page. Records are the
// only thing written to the output file and the only thing the price database
// reads back.

use indexmap::IndexMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rarity: String,
    /// Paint color -> price range, in page order. An empty value means the
    /// color exists but has no recorded price.
    pub prices: IndexMap<String, String>,
}

impl ItemRecord {
    /// Numeric bounds for one color, if that color has a usable price.
    pub fn price_range(&self, color: &str) -> Option<PriceRange> {
        self.prices.get(color)?.parse().ok()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PriceRangeError {
    #[error("price range is empty")]
    Empty,
    #[error("invalid price bound {0:?}")]
    InvalidBound(String),
}

/// A price in keys, e.g. "7-10" gives lower 7 and upper 10.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub lower: f64,
    pub upper: f64,
}

impl FromStr for PriceRange {
    type Err = PriceRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceRangeError::Empty);
        }

        let parse_bound = |bound: &str| {
            let bound = bound.trim();
            bound
                .parse::<f64>()
                .map_err(|_| PriceRangeError::InvalidBound(bound.to_owned()))
        };

        match s.split_once('-') {
            Some((lower, upper)) => Ok(PriceRange {
                lower: parse_bound(lower)?,
                upper: parse_bound(upper)?,
            }),
            // Single value, no spread
            None => {
                let value = parse_bound(s)?;
                Ok(PriceRange { lower: value, upper: value })
            }
        }
    }
}
