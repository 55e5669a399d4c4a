//! The requested symbol set: validated once, at construction, and threaded
//! through every downstream operation.

use crate::error::IexStocksError;

/// Maximum number of symbols accepted per request.
pub const MAX_SYMBOLS: usize = 100;

/// A validated, ordered, deduplicated set of uppercase ticker symbols.
///
/// Whether a request is for one symbol or a batch is decided here, once;
/// downstream code matches on the variant instead of re-inferring it from
/// collection sizes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbols {
    Single(String),
    Batch(Vec<String>),
}

impl Symbols {
    /// Validates a single symbol.
    pub fn single(symbol: &str) -> Result<Self, IexStocksError> {
        Ok(Symbols::Single(normalize(symbol)?))
    }

    /// Validates a symbol list: trimmed, uppercased, deduplicated preserving
    /// first-seen order. A one-element list is a `Single` request.
    pub fn list(symbols: &[&str]) -> Result<Self, IexStocksError> {
        if symbols.is_empty() {
            return Err(IexStocksError::InvalidInput(
                "at least one symbol is required".to_string(),
            ));
        }
        let mut normalized: Vec<String> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let symbol = normalize(symbol)?;
            if !normalized.contains(&symbol) {
                normalized.push(symbol);
            }
        }
        if normalized.len() > MAX_SYMBOLS {
            return Err(IexStocksError::InvalidInput(format!(
                "at most {} symbols may be requested at once",
                MAX_SYMBOLS
            )));
        }
        match normalized.len() {
            1 => Ok(Symbols::Single(normalized.remove(0))),
            _ => Ok(Symbols::Batch(normalized)),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Symbols::Single(_))
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The symbols in request order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Symbols::Single(symbol) => std::slice::from_ref(symbol),
            Symbols::Batch(symbols) => symbols.as_slice(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.as_slice().iter()
    }

    /// Comma-joined form, as sent on the wire.
    pub fn comma_joined(&self) -> String {
        self.as_slice().join(",")
    }
}

fn normalize(symbol: &str) -> Result<String, IexStocksError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(IexStocksError::InvalidInput(
            "symbol must be a non-empty string".to_string(),
        ));
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::{Symbols, MAX_SYMBOLS};
    use crate::error::IexStocksError;

    #[test]
    fn uppercases_and_dedups_preserving_order() {
        let symbols = Symbols::list(&["tsla", "aapl", "TSLA", "msft"]).unwrap();
        assert_eq!(
            symbols,
            Symbols::Batch(vec![
                "TSLA".to_string(),
                "AAPL".to_string(),
                "MSFT".to_string()
            ])
        );
    }

    #[test]
    fn one_element_list_is_single() {
        let symbols = Symbols::list(&["aapl"]).unwrap();
        assert_eq!(symbols, Symbols::Single("AAPL".to_string()));
        assert!(symbols.is_single());
    }

    #[test]
    fn duplicates_collapsing_to_one_is_single() {
        let symbols = Symbols::list(&["aapl", "AAPL"]).unwrap();
        assert!(symbols.is_single());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            Symbols::list(&[]),
            Err(IexStocksError::InvalidInput(_))
        ));
        assert!(matches!(
            Symbols::single(""),
            Err(IexStocksError::InvalidInput(_))
        ));
        assert!(matches!(
            Symbols::list(&["AAPL", "  "]),
            Err(IexStocksError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_oversized_list() {
        let many: Vec<String> = (0..MAX_SYMBOLS + 2).map(|i| format!("SYM{}", i)).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        assert!(matches!(
            Symbols::list(&refs),
            Err(IexStocksError::InvalidInput(_))
        ));
    }

    #[test]
    fn comma_joined_keeps_request_order() {
        let symbols = Symbols::list(&["aapl", "tsla"]).unwrap();
        assert_eq!(symbols.comma_joined(), "AAPL,TSLA");
    }
}
