//! Output rendering: the structured/tabular switch applied after each
//! data-producing operation.

use std::collections::HashMap;

use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use iexstocks_api::types::Endpoint;

use crate::symbols::Symbols;

/// Caller-selected rendering mode for endpoint data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Raw structured JSON. This is the default.
    #[default]
    Structured,
    /// Row/column tables, for endpoints whose payloads are record-like.
    Tabular,
}

/// A rendered result: structured JSON, one table, or one table per symbol.
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered {
    Structured(Value),
    Table(String),
    Tables(HashMap<String, String>),
}

impl Rendered {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Rendered::Structured(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Rendered::Structured(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<String> {
        match self {
            Rendered::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_tables(self) -> Option<HashMap<String, String>> {
        match self {
            Rendered::Tables(tables) => Some(tables),
            _ => None,
        }
    }
}

/// Unwraps the outer symbol key for single-symbol requests. This is a
/// formatting-time decision: the consolidated data set itself stays keyed
/// by symbol.
pub(crate) fn unwrap_single(data: Value, symbols: &Symbols) -> Value {
    let Symbols::Single(symbol) = symbols else {
        return data;
    };
    match data {
        Value::Object(mut map) => match map.remove(symbol.as_str()) {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Renders one endpoint's per-symbol data in the requested mode.
///
/// Tabular mode requires the endpoint to be tabular-capable and every
/// symbol's payload to be record-like; otherwise the data falls back to
/// structured output with a warning.
pub(crate) fn render(
    data: Value,
    endpoint: Endpoint,
    symbols: &Symbols,
    format: OutputFormat,
) -> Rendered {
    match format {
        OutputFormat::Structured => Rendered::Structured(unwrap_single(data, symbols)),
        OutputFormat::Tabular => {
            let record_like = symbols
                .iter()
                .all(|symbol| matches!(data.get(symbol), Some(Value::Object(_))));
            if !endpoint.supports_tabular() || !record_like {
                tracing::warn!(
                    endpoint = %endpoint,
                    "tabular output not supported for this endpoint, returning structured data"
                );
                return Rendered::Structured(unwrap_single(data, symbols));
            }
            Rendered::Table(build_endpoint_table(&data, symbols))
        }
    }
}

/// Builds one table over all symbols: a `symbol` column followed by the
/// union of record fields in first-seen order.
fn build_endpoint_table(data: &Value, symbols: &Symbols) -> String {
    let mut columns: Vec<String> = Vec::new();
    for symbol in symbols.iter() {
        if let Some(Value::Object(record)) = data.get(symbol) {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let mut builder = Builder::default();
    let mut header = vec!["symbol".to_string()];
    header.extend(columns.iter().cloned());
    builder.push_record(header);
    for symbol in symbols.iter() {
        let record = data.get(symbol);
        let mut row = vec![symbol.clone()];
        for column in &columns {
            let cell = record
                .and_then(|r| r.get(column))
                .map(cell_text)
                .unwrap_or_default();
            row.push(cell);
        }
        builder.push_record(row);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render, unwrap_single, OutputFormat, Rendered};
    use crate::symbols::Symbols;
    use iexstocks_api::types::Endpoint;

    #[test]
    fn single_symbol_output_is_unwrapped() {
        let symbols = Symbols::single("AAPL").unwrap();
        let data = json!({"AAPL": {"latestPrice": 171.34}});
        assert_eq!(
            unwrap_single(data, &symbols),
            json!({"latestPrice": 171.34})
        );
    }

    #[test]
    fn batch_output_keeps_symbol_keys() {
        let symbols = Symbols::list(&["AAPL", "TSLA"]).unwrap();
        let data = json!({"AAPL": 171.34, "TSLA": 302.54});
        assert_eq!(unwrap_single(data.clone(), &symbols), data);
    }

    #[test]
    fn tabular_renders_record_like_payloads() {
        let symbols = Symbols::list(&["AAPL", "TSLA"]).unwrap();
        let data = json!({
            "AAPL": {"companyName": "Apple Inc.", "latestPrice": 171.34},
            "TSLA": {"companyName": "Tesla Inc.", "latestPrice": 302.54},
        });
        let rendered = render(data, Endpoint::Quote, &symbols, OutputFormat::Tabular);
        let table = match rendered {
            Rendered::Table(table) => table,
            other => panic!("expected a table, got {:?}", other),
        };
        assert!(table.contains("companyName"));
        assert!(table.contains("Apple Inc."));
        assert!(table.contains("TSLA"));
    }

    #[test]
    fn tabular_falls_back_for_unsupported_endpoint() {
        let symbols = Symbols::single("AAPL").unwrap();
        let data = json!({"AAPL": 171.34});
        let rendered = render(data, Endpoint::Price, &symbols, OutputFormat::Tabular);
        assert_eq!(rendered, Rendered::Structured(json!(171.34)));
    }

    #[test]
    fn tabular_falls_back_for_non_record_payloads() {
        let symbols = Symbols::single("AAPL").unwrap();
        let data = json!({"AAPL": ["MSFT", "GOOGL"]});
        let rendered = render(data, Endpoint::Peers, &symbols, OutputFormat::Tabular);
        assert_eq!(rendered, Rendered::Structured(json!(["MSFT", "GOOGL"])));
    }
}
