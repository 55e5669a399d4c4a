//! The consolidated per-symbol data set and its accessors.

use std::str::FromStr;

use serde_json::{Map, Value};

use iexstocks_api::types::{BatchResponse, ChartRange, Endpoint};
use iexstocks_api::{build_batch_requests, BatchQuery, Client, Query, DEFAULT_LAST};

use crate::error::IexStocksError;
use crate::output::{self, OutputFormat, Rendered};
use crate::symbols::Symbols;

/// Inclusive bounds for the `last` news-count option.
pub const LAST_MIN: u32 = 1;
pub const LAST_MAX: u32 = 50;

/// The consolidated data set: symbol -> endpoint -> value, the union of all
/// request groups.
pub type DataSet = BatchResponse;

/// Construction options for [`Stock`]. Defaults mirror the server defaults,
/// and all-default options are omitted from the wire request.
#[derive(Clone, Debug)]
pub struct StockOptions {
    /// Lookback range for the chart, dividends, and splits endpoints.
    pub range: ChartRange,
    /// Number of news items, between 1 and 50.
    pub last: u32,
    /// Whether percentage fields are returned scaled for display.
    pub display_percent: bool,
    /// Rendering mode for endpoint accessors.
    pub output_format: OutputFormat,
}

impl Default for StockOptions {
    fn default() -> StockOptions {
        StockOptions {
            range: ChartRange::default(),
            last: DEFAULT_LAST,
            display_percent: false,
            output_format: OutputFormat::default(),
        }
    }
}

impl StockOptions {
    fn validate(&self) -> Result<(), IexStocksError> {
        if self.last < LAST_MIN || self.last > LAST_MAX {
            return Err(IexStocksError::InvalidInput(format!(
                "last must be between {} and {}",
                LAST_MIN, LAST_MAX
            )));
        }
        Ok(())
    }
}

/// A snapshot of every stock endpoint for one or more symbols.
///
/// All endpoints are fetched eagerly at construction (two requests, because
/// the endpoint catalog does not fit a single URL) and consolidated into one
/// per-symbol mapping. Accessors only read the snapshot; [`Stock::refresh`]
/// re-runs the same fetch sequence.
pub struct Stock {
    client: Client,
    symbols: Symbols,
    options: StockOptions,
    data_set: DataSet,
}

impl Stock {
    /// Validates the options, downloads all endpoints for `symbols`, and
    /// consolidates the responses.
    pub async fn new(
        client: Client,
        symbols: Symbols,
        options: StockOptions,
    ) -> Result<Self, IexStocksError> {
        options.validate()?;
        let data_set = fetch_data_set(&client, &symbols, &options).await?;
        Ok(Self {
            client,
            symbols,
            options,
            data_set,
        })
    }

    /// Downloads the latest data from all endpoints, replacing the snapshot.
    pub async fn refresh(&mut self) -> Result<(), IexStocksError> {
        self.data_set = fetch_data_set(&self.client, &self.symbols, &self.options).await?;
        Ok(())
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// Returns the whole consolidated data set, indexed by endpoint name for
    /// each symbol. Structured output only.
    pub fn get_all(&self) -> Result<Value, IexStocksError> {
        let data = serde_json::to_value(&self.data_set)?;
        Ok(output::unwrap_single(data, &self.symbols))
    }

    /// Selects specific endpoints from the data set, as
    /// `{symbol: {endpoint: value}}` (unwrapped for a single symbol).
    /// Structured output only.
    pub fn get_select_endpoints(&self, endpoints: &[&str]) -> Result<Value, IexStocksError> {
        if endpoints.is_empty() {
            return Err(IexStocksError::InvalidInput(
                "please provide a valid list of endpoints".to_string(),
            ));
        }
        let endpoints = endpoints
            .iter()
            .map(|name| {
                Endpoint::from_str(name)
                    .map_err(|_| IexStocksError::EndpointNotFound(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let projected = self.project(&endpoints)?;
        Ok(output::unwrap_single(projected, &self.symbols))
    }

    // endpoint methods

    pub fn get_quote(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Quote)
    }

    pub fn get_book(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Book)
    }

    /// Chart data is list-shaped and only renders structurally.
    pub fn get_chart(&self) -> Result<Value, IexStocksError> {
        let data = self.endpoint_map(Endpoint::Chart)?;
        Ok(output::unwrap_single(data, &self.symbols))
    }

    /// Time Series is an alias for the chart endpoint and returns the same.
    pub fn get_time_series(&self) -> Result<Value, IexStocksError> {
        self.get_chart()
    }

    /// Open/Close is an alias for the OHLC endpoint and returns the same.
    pub fn get_open_close(&self) -> Result<Rendered, IexStocksError> {
        self.get_ohlc()
    }

    pub fn get_previous(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Previous)
    }

    pub fn get_company(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Company)
    }

    pub fn get_key_stats(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Stats)
    }

    pub fn get_peers(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Peers)
    }

    pub fn get_relevant(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Relevant)
    }

    pub fn get_news(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::News)
    }

    pub fn get_financials(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Financials)
    }

    pub fn get_earnings(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Earnings)
    }

    pub fn get_dividends(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Dividends)
    }

    pub fn get_splits(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Splits)
    }

    pub fn get_logo(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Logo)
    }

    /// Price is a bare number per symbol and only renders structurally.
    pub fn get_price(&self) -> Result<Value, IexStocksError> {
        let data = self.endpoint_map(Endpoint::Price)?;
        Ok(output::unwrap_single(data, &self.symbols))
    }

    pub fn get_delayed_quote(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::DelayedQuote)
    }

    pub fn get_effective_spread(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::EffectiveSpread)
    }

    pub fn get_volume_by_venue(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::VolumeByVenue)
    }

    pub fn get_ohlc(&self) -> Result<Rendered, IexStocksError> {
        self.render(Endpoint::Ohlc)
    }

    // field methods: single nested lookups into the quote and stats
    // endpoints, returning JSON null for a missing leaf field

    pub fn get_company_name(&self) -> Result<Value, IexStocksError> {
        self.quote_field("companyName")
    }

    pub fn get_primary_exchange(&self) -> Result<Value, IexStocksError> {
        self.quote_field("primaryExchange")
    }

    pub fn get_sector(&self) -> Result<Value, IexStocksError> {
        self.quote_field("sector")
    }

    pub fn get_open(&self) -> Result<Value, IexStocksError> {
        self.quote_field("open")
    }

    pub fn get_close(&self) -> Result<Value, IexStocksError> {
        self.quote_field("close")
    }

    pub fn get_years_high(&self) -> Result<Value, IexStocksError> {
        self.quote_field("week52High")
    }

    pub fn get_years_low(&self) -> Result<Value, IexStocksError> {
        self.quote_field("week52Low")
    }

    pub fn get_ytd_change(&self) -> Result<Value, IexStocksError> {
        self.quote_field("ytdChange")
    }

    pub fn get_volume(&self) -> Result<Value, IexStocksError> {
        self.quote_field("latestVolume")
    }

    pub fn get_market_cap(&self) -> Result<Value, IexStocksError> {
        self.quote_field("marketCap")
    }

    pub fn get_beta(&self) -> Result<Value, IexStocksError> {
        self.stats_field("beta")
    }

    pub fn get_short_interest(&self) -> Result<Value, IexStocksError> {
        self.stats_field("shortInterest")
    }

    pub fn get_short_ratio(&self) -> Result<Value, IexStocksError> {
        self.stats_field("shortRatio")
    }

    pub fn get_latest_eps(&self) -> Result<Value, IexStocksError> {
        self.stats_field("latestEPS")
    }

    pub fn get_shares_outstanding(&self) -> Result<Value, IexStocksError> {
        self.stats_field("sharesOutstanding")
    }

    pub fn get_float(&self) -> Result<Value, IexStocksError> {
        self.stats_field("float")
    }

    pub fn get_eps_consensus(&self) -> Result<Value, IexStocksError> {
        self.stats_field("consensusEPS")
    }

    /// Extracts the requested endpoints for every symbol, as
    /// `{symbol: {endpoint: value}}`.
    fn project(&self, endpoints: &[Endpoint]) -> Result<Value, IexStocksError> {
        let mut result = Map::new();
        for symbol in self.symbols.iter() {
            let fields = self
                .data_set
                .get(symbol)
                .ok_or_else(|| IexStocksError::SymbolNotFound(symbol.clone()))?;
            let mut entry = Map::new();
            for endpoint in endpoints {
                let value = fields
                    .get(endpoint.as_str())
                    .ok_or_else(|| IexStocksError::EndpointNotFound(endpoint.to_string()))?;
                entry.insert(endpoint.as_str().to_string(), value.clone());
            }
            result.insert(symbol.clone(), Value::Object(entry));
        }
        Ok(Value::Object(result))
    }

    /// One endpoint's value for every symbol, as `{symbol: value}`.
    fn endpoint_map(&self, endpoint: Endpoint) -> Result<Value, IexStocksError> {
        let mut result = Map::new();
        for symbol in self.symbols.iter() {
            let fields = self
                .data_set
                .get(symbol)
                .ok_or_else(|| IexStocksError::SymbolNotFound(symbol.clone()))?;
            let value = fields
                .get(endpoint.as_str())
                .ok_or_else(|| IexStocksError::EndpointNotFound(endpoint.to_string()))?;
            result.insert(symbol.clone(), value.clone());
        }
        Ok(Value::Object(result))
    }

    fn render(&self, endpoint: Endpoint) -> Result<Rendered, IexStocksError> {
        let data = self.endpoint_map(endpoint)?;
        Ok(output::render(
            data,
            endpoint,
            &self.symbols,
            self.options.output_format,
        ))
    }

    fn quote_field(&self, field: &str) -> Result<Value, IexStocksError> {
        self.endpoint_field(Endpoint::Quote, field)
    }

    fn stats_field(&self, field: &str) -> Result<Value, IexStocksError> {
        self.endpoint_field(Endpoint::Stats, field)
    }

    fn endpoint_field(&self, endpoint: Endpoint, field: &str) -> Result<Value, IexStocksError> {
        let mut result = Map::new();
        for symbol in self.symbols.iter() {
            let fields = self
                .data_set
                .get(symbol)
                .ok_or_else(|| IexStocksError::SymbolNotFound(symbol.clone()))?;
            let payload = fields
                .get(endpoint.as_str())
                .ok_or_else(|| IexStocksError::EndpointNotFound(endpoint.to_string()))?;
            let value = payload.get(field).cloned().unwrap_or(Value::Null);
            result.insert(symbol.clone(), value);
        }
        Ok(output::unwrap_single(
            Value::Object(result),
            &self.symbols,
        ))
    }
}

async fn fetch_data_set(
    client: &Client,
    symbols: &Symbols,
    options: &StockOptions,
) -> Result<DataSet, IexStocksError> {
    let base = BatchQuery::default()
        .with_symbols(symbols.as_slice())
        .with_range(options.range)
        .with_last(options.last)
        .with_display_percent(options.display_percent);
    let [first, second] = build_batch_requests(&base);
    tracing::debug!(symbols = %symbols.comma_joined(), "refreshing consolidated data set");
    let group1 = client.get_stock_batch(&first).await?;
    let group2 = client.get_stock_batch(&second).await?;
    consolidate(symbols, &group1, &[group2])
}

/// Merges the per-group responses into one mapping per symbol.
///
/// The first group is authoritative for symbol existence: a symbol absent
/// there fails the whole request. Later groups extend a symbol's fields and
/// never replace an endpoint already present. Pure; on failure no partial
/// merge is visible anywhere.
fn consolidate(
    symbols: &Symbols,
    first: &DataSet,
    rest: &[DataSet],
) -> Result<DataSet, IexStocksError> {
    let mut merged = DataSet::new();
    for symbol in symbols.iter() {
        let mut fields = first
            .get(symbol)
            .cloned()
            .ok_or_else(|| IexStocksError::SymbolNotFound(symbol.clone()))?;
        for group in rest {
            if let Some(extra) = group.get(symbol) {
                for (endpoint, value) in extra {
                    fields
                        .entry(endpoint.clone())
                        .or_insert_with(|| value.clone());
                }
            }
        }
        merged.insert(symbol.clone(), fields);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{consolidate, DataSet, StockOptions};
    use crate::error::IexStocksError;
    use crate::symbols::Symbols;

    fn group(entries: &[(&str, &[(&str, Value)])]) -> DataSet {
        entries
            .iter()
            .map(|(symbol, fields)| {
                (
                    symbol.to_string(),
                    fields
                        .iter()
                        .map(|(endpoint, value)| (endpoint.to_string(), value.clone()))
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn merges_disjoint_groups_per_symbol() {
        let symbols = Symbols::list(&["AAPL", "TSLA"]).unwrap();
        let first = group(&[
            ("AAPL", &[("quote", json!({"latestPrice": 171.34}))]),
            ("TSLA", &[("quote", json!({"latestPrice": 302.54}))]),
        ]);
        let second = group(&[
            ("AAPL", &[("price", json!(171.34))]),
            ("TSLA", &[("price", json!(302.54))]),
        ]);
        let merged = consolidate(&symbols, &first, &[second]).unwrap();
        assert_eq!(merged["AAPL"].len(), 2);
        assert_eq!(merged["TSLA"]["price"], json!(302.54));
    }

    #[test]
    fn missing_symbol_in_first_group_fails() {
        let symbols = Symbols::list(&["AAPL", "BADSYMBOL"]).unwrap();
        let first = group(&[("AAPL", &[("quote", json!({}))])]);
        let second = group(&[("AAPL", &[("price", json!(171.34))])]);
        let err = consolidate(&symbols, &first, &[second]).unwrap_err();
        assert!(matches!(
            err,
            IexStocksError::SymbolNotFound(symbol) if symbol == "BADSYMBOL"
        ));
    }

    #[test]
    fn later_groups_extend_but_never_replace() {
        let symbols = Symbols::single("AAPL").unwrap();
        let first = group(&[("AAPL", &[("quote", json!({"latestPrice": 171.34}))])]);
        let second = group(&[(
            "AAPL",
            &[
                ("quote", json!({"latestPrice": 0.0})),
                ("price", json!(171.34)),
            ],
        )]);
        let merged = consolidate(&symbols, &first, &[second]).unwrap();
        assert_eq!(merged["AAPL"]["quote"], json!({"latestPrice": 171.34}));
        assert_eq!(merged["AAPL"]["price"], json!(171.34));
    }

    #[test]
    fn symbol_missing_from_later_group_merges_nothing() {
        let symbols = Symbols::single("AAPL").unwrap();
        let first = group(&[("AAPL", &[("quote", json!({}))])]);
        let second = group(&[]);
        let merged = consolidate(&symbols, &first, &[second]).unwrap();
        assert_eq!(merged["AAPL"].len(), 1);
    }

    #[test]
    fn options_validate_last_bounds() {
        let options = StockOptions {
            last: 555,
            ..StockOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(IexStocksError::InvalidInput(_))
        ));
        assert!(StockOptions::default().validate().is_ok());
    }
}
