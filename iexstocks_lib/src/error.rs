//! Error types for the library layer.

use thiserror::Error;

/// Errors produced by the library layer. None are recovered locally: every
/// variant propagates to the caller and there is no partial-success mode.
#[derive(Error, Debug)]
pub enum IexStocksError {
    /// A malformed argument, rejected eagerly before any request is made.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A requested symbol was absent from a server response. The server is
    /// authoritative for symbol existence.
    #[error("symbol {0} not found")]
    SymbolNotFound(String),
    /// A requested endpoint name is outside the catalog or absent from a
    /// symbol's consolidated data.
    #[error("endpoint {0} not found")]
    EndpointNotFound(String),
    /// A historical start date older than the supported lookback ceiling.
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),
    /// A transport-level failure, propagated unmodified and never retried.
    #[error("query failed")]
    Api(#[from] iexstocks_api::Error),
    /// A response payload that does not decode into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
