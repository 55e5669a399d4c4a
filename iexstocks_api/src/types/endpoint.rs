//! The fixed catalog of stock data endpoints served by the batch API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named category of stock data. The catalog is fixed and ordered; any
/// name outside it is rejected at parse time.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    Chart,
    Quote,
    Book,
    OpenClose,
    Previous,
    Company,
    Stats,
    Peers,
    Relevant,
    News,
    Financials,
    Earnings,
    Dividends,
    Splits,
    Logo,
    Price,
    DelayedQuote,
    EffectiveSpread,
    VolumeByVenue,
    Ohlc,
}

impl Endpoint {
    /// The full catalog, in the order the API documents it.
    pub const ALL: [Endpoint; 20] = [
        Endpoint::Chart,
        Endpoint::Quote,
        Endpoint::Book,
        Endpoint::OpenClose,
        Endpoint::Previous,
        Endpoint::Company,
        Endpoint::Stats,
        Endpoint::Peers,
        Endpoint::Relevant,
        Endpoint::News,
        Endpoint::Financials,
        Endpoint::Earnings,
        Endpoint::Dividends,
        Endpoint::Splits,
        Endpoint::Logo,
        Endpoint::Price,
        Endpoint::DelayedQuote,
        Endpoint::EffectiveSpread,
        Endpoint::VolumeByVenue,
        Endpoint::Ohlc,
    ];

    /// First request group: the catalog's leading ten names. Requesting the
    /// whole catalog in one URL exceeds the server-side length limit.
    pub fn first_group() -> &'static [Endpoint] {
        &Self::ALL[..10]
    }

    /// Second request group: the remaining names.
    pub fn second_group() -> &'static [Endpoint] {
        &Self::ALL[10..]
    }

    /// Wire name for the `types` parameter and response keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Chart => "chart",
            Endpoint::Quote => "quote",
            Endpoint::Book => "book",
            Endpoint::OpenClose => "open-close",
            Endpoint::Previous => "previous",
            Endpoint::Company => "company",
            Endpoint::Stats => "stats",
            Endpoint::Peers => "peers",
            Endpoint::Relevant => "relevant",
            Endpoint::News => "news",
            Endpoint::Financials => "financials",
            Endpoint::Earnings => "earnings",
            Endpoint::Dividends => "dividends",
            Endpoint::Splits => "splits",
            Endpoint::Logo => "logo",
            Endpoint::Price => "price",
            Endpoint::DelayedQuote => "delayed-quote",
            Endpoint::EffectiveSpread => "effective-spread",
            Endpoint::VolumeByVenue => "volume-by-venue",
            Endpoint::Ohlc => "ohlc",
        }
    }

    /// Comma-joins a group of endpoints for the `types` parameter.
    pub fn join(endpoints: &[Endpoint]) -> String {
        endpoints
            .iter()
            .map(Endpoint::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Whether this endpoint's payload has a record shape that tabular
    /// rendering can present. Chart and price payloads do not.
    pub fn supports_tabular(&self) -> bool {
        !matches!(self, Endpoint::Chart | Endpoint::Price)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|endpoint| endpoint.as_str() == s)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Endpoint;

    #[test]
    fn catalog_splits_ten_and_ten() {
        assert_eq!(Endpoint::first_group().len(), 10);
        assert_eq!(Endpoint::second_group().len(), 10);
        assert_eq!(
            Endpoint::join(Endpoint::first_group()),
            "chart,quote,book,open-close,previous,company,stats,peers,relevant,news"
        );
        assert_eq!(
            Endpoint::join(Endpoint::second_group()),
            "financials,earnings,dividends,splits,logo,price,delayed-quote,effective-spread,volume-by-venue,ohlc"
        );
    }

    #[test]
    fn wire_names_round_trip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_str(endpoint.as_str()), Ok(endpoint));
        }
        assert!(Endpoint::from_str("BADENDPOINT").is_err());
    }
}
