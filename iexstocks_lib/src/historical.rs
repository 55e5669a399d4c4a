//! Date-bounded historical daily series over the chart endpoint.
//!
//! The requested span maps to the smallest lookback bucket the API can serve
//! in one request; the response is then validated and sliced back down to
//! the exact window.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use serde_json::{json, Map, Value};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use iexstocks_api::types::{ChartBar, ChartRange, Endpoint};
use iexstocks_api::{Client, HistoricalQuery, Query};

use crate::error::IexStocksError;
use crate::output::{OutputFormat, Rendered};
use crate::symbols::Symbols;

#[derive(Tabled)]
struct BarRow {
    #[tabled(rename = "date")]
    date: String,
    #[tabled(rename = "open")]
    open: f64,
    #[tabled(rename = "high")]
    high: f64,
    #[tabled(rename = "low")]
    low: f64,
    #[tabled(rename = "close")]
    close: f64,
    #[tabled(rename = "volume")]
    volume: i64,
}

/// Fetches daily bars for every symbol over `[start, end]` inclusive.
///
/// Structured output is `{symbol: {date: {open, high, low, close, volume}}}`;
/// tabular output is one table per symbol, unwrapped for a single symbol.
/// The start date must lie within the past five years.
pub async fn get_historical_data(
    client: &Client,
    symbols: &Symbols,
    start: NaiveDate,
    end: NaiveDate,
    output_format: OutputFormat,
) -> Result<Rendered, IexStocksError> {
    get_historical_data_as_of(client, symbols, start, end, output_format, Utc::now().date_naive())
        .await
}

/// Same as [`get_historical_data`], with the lookback bucket resolved
/// relative to an explicit `today` instead of the current date.
pub async fn get_historical_data_as_of(
    client: &Client,
    symbols: &Symbols,
    start: NaiveDate,
    end: NaiveDate,
    output_format: OutputFormat,
    today: NaiveDate,
) -> Result<Rendered, IexStocksError> {
    let range = chart_range_for(start, today)?;
    let query = HistoricalQuery::default()
        .with_symbols(symbols.as_slice())
        .with_range(range);
    let response = client.get_stock_batch(&query).await?;

    // The server is authoritative for symbol existence.
    for symbol in symbols.iter() {
        if !response.contains_key(symbol) {
            return Err(IexStocksError::SymbolNotFound(symbol.clone()));
        }
    }

    let mut series: Vec<(String, Vec<ChartBar>)> = Vec::with_capacity(symbols.len());
    for symbol in symbols.iter() {
        let chart = response[symbol]
            .get(Endpoint::Chart.as_str())
            .cloned()
            .ok_or_else(|| IexStocksError::EndpointNotFound(Endpoint::Chart.to_string()))?;
        let mut bars: Vec<ChartBar> = serde_json::from_value(chart)?;
        bars.sort_by_key(|bar| bar.date);
        bars.retain(|bar| bar.date >= start && bar.date <= end);
        series.push((symbol.clone(), bars));
    }

    Ok(shape_output(series, symbols, output_format))
}

/// Maps a start date to the coarsest supported lookback bucket, keeping the
/// bucket as small as the span allows. Never clamps: a start older than the
/// five-year ceiling is an error, not a silent truncation.
pub(crate) fn chart_range_for(
    start: NaiveDate,
    today: NaiveDate,
) -> Result<ChartRange, IexStocksError> {
    let delta = today.year() - start.year();
    match delta {
        2..=5 => Ok(ChartRange::FiveYears),
        1 => Ok(ChartRange::TwoYears),
        0 => Ok(ChartRange::OneYear),
        _ => Err(IexStocksError::InvalidDateRange(
            "start date must be within the past 5 years".to_string(),
        )),
    }
}

fn shape_output(
    series: Vec<(String, Vec<ChartBar>)>,
    symbols: &Symbols,
    format: OutputFormat,
) -> Rendered {
    match format {
        OutputFormat::Structured => {
            let mut result = Map::new();
            for (symbol, bars) in series {
                let mut by_date = Map::new();
                for bar in bars {
                    by_date.insert(
                        bar.date.format("%Y-%m-%d").to_string(),
                        json!({
                            "open": bar.open,
                            "high": bar.high,
                            "low": bar.low,
                            "close": bar.close,
                            "volume": bar.volume,
                        }),
                    );
                }
                result.insert(symbol, Value::Object(by_date));
            }
            Rendered::Structured(Value::Object(result))
        }
        OutputFormat::Tabular => {
            let mut tables = HashMap::new();
            for (symbol, bars) in series {
                let rows: Vec<BarRow> = bars
                    .into_iter()
                    .map(|bar| BarRow {
                        date: bar.date.format("%Y-%m-%d").to_string(),
                        open: bar.open,
                        high: bar.high,
                        low: bar.low,
                        close: bar.close,
                        volume: bar.volume,
                    })
                    .collect();
                tables.insert(symbol, Table::new(rows).with(Style::rounded()).to_string());
            }
            match symbols {
                Symbols::Single(symbol) => match tables.remove(symbol.as_str()) {
                    Some(table) => Rendered::Table(table),
                    None => Rendered::Tables(tables),
                },
                Symbols::Batch(_) => Rendered::Tables(tables),
            }
        }
    }
}
