//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for the symbol list.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Adds one symbol to the request.
    fn with_symbol(mut self, symbol: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().symbols.push(symbol.to_string());
        self
    }

    /// Adds a list of symbols to the request.
    fn with_symbols(mut self, symbols: &[String]) -> Self
    where
        Self: Sized,
    {
        self.get_common().symbols.extend_from_slice(symbols);
        self
    }
}

/// Fields shared by all query types: the requested symbol list.
#[derive(Clone, Default)]
pub struct QueryCommon {
    /// Symbols to request, serialized comma-joined as the `symbols` parameter.
    pub symbols: Vec<String>,
}

impl QueryCommon {
    /// Appends the common symbol parameter to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("symbols", &self.symbols.join(","));
        url
    }
}
