//! Library layer over the IEX stock batch API: a consolidated per-symbol
//! data set with endpoint and field accessors, plus date-bounded historical
//! series.
//!
//! Wraps the `iexstocks_api` crate with symbol validation, response
//! consolidation, and structured/tabular output rendering.

pub mod error;
pub mod historical;
pub mod output;
pub mod stock;
pub mod symbols;

pub use iexstocks_api;
pub use iexstocks_api::types;
pub use iexstocks_api::{BatchQuery, Client, HistoricalQuery, Query};

pub use error::IexStocksError;
pub use historical::{get_historical_data, get_historical_data_as_of};
pub use output::{OutputFormat, Rendered};
pub use stock::{Stock, StockOptions};
pub use symbols::Symbols;
