//! Parameters passed to the trade offer page by listing sites.

use crate::enums::ListingIntent;
use crate::helpers::parse_item_element_id;
use crate::types::ItemKey;
use url::Url;

/// Listing details given in the trade offer URL's query string. Values that fail to parse
/// are treated as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlParams {
    /// `listing_intent`, whether the listing the offer came from is a buy or sell order.
    pub listing_intent: Option<ListingIntent>,
    /// `listing_currencies_keys`, the number of keys in the listing price.
    pub listing_currencies_keys: u32,
    /// `listing_currencies_metal`, the metal in the listing price in refined.
    pub listing_currencies_metal: f64,
    /// `for_item`, the partner's item being bought e.g. `440_2_123`.
    pub for_item: Option<ItemKey>,
}

impl UrlParams {
    /// Reads the parameters from a URL.
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "listing_intent" => {
                    params.listing_intent = parse_leading_int(&value)
                        .and_then(|intent| u8::try_from(intent).ok())
                        .and_then(|intent| ListingIntent::try_from(intent).ok());
                },
                "listing_currencies_keys" => {
                    params.listing_currencies_keys = parse_leading_int(&value)
                        .and_then(|keys| u32::try_from(keys).ok())
                        .unwrap_or(0);
                },
                "listing_currencies_metal" => {
                    params.listing_currencies_metal = value
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|metal| metal.is_finite())
                        .unwrap_or(0.0);
                },
                "for_item" => {
                    params.for_item = parse_item_element_id(&format!("item{value}"));
                },
                _ => {},
            }
        }

        params
    }

    /// Parses a URL string and reads its parameters.
    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::from_url(&Url::parse(url)?))
    }

    /// Whether the offer was opened from a listing.
    pub fn has_listing(&self) -> bool {
        self.listing_intent.is_some()
    }
}

/// Reads the leading integer of a value, ignoring anything after it, e.g. `"12abc"` is `12`.
fn parse_leading_int(value: &str) -> Option<u64> {
    let value = value.trim();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());

    value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_params() {
        let params = UrlParams::parse(
            "https://steamcommunity.com/tradeoffer/new/?partner=1&listing_intent=1&listing_currencies_keys=2&listing_currencies_metal=1.33&for_item=440_2_123"
        ).unwrap();

        assert_eq!(params.listing_intent, Some(ListingIntent::SellOrder));
        assert_eq!(params.listing_currencies_keys, 2);
        assert_eq!(params.listing_currencies_metal, 1.33);
        assert_eq!(params.for_item, Some((440, 2, 123)));
        assert!(params.has_listing());
    }

    #[test]
    fn missing_params_are_defaults() {
        let params = UrlParams::parse("https://steamcommunity.com/tradeoffer/new/?partner=1").unwrap();

        assert_eq!(params, UrlParams::default());
    }

    #[test]
    fn malformed_params_fall_back() {
        let params = UrlParams::parse(
            "https://steamcommunity.com/tradeoffer/new/?listing_intent=7&listing_currencies_keys=abc&listing_currencies_metal=lots&for_item=440_2"
        ).unwrap();

        assert_eq!(params, UrlParams::default());
    }

    #[test]
    fn reads_leading_digits() {
        let params = UrlParams::parse(
            "https://steamcommunity.com/tradeoffer/new/?listing_intent=0&listing_currencies_keys=3keys"
        ).unwrap();

        assert_eq!(params.listing_intent, Some(ListingIntent::BuyOrder));
        assert_eq!(params.listing_currencies_keys, 3);
    }
}
