mod endpoint;
pub use self::endpoint::Endpoint;

mod range;
pub use self::range::ChartRange;

mod chart;
pub use self::chart::ChartBar;

use std::collections::HashMap;

use serde_json::Value;

/// One symbol's payloads, keyed by endpoint name.
pub type EndpointData = HashMap<String, Value>;

/// Raw market batch response: symbol -> endpoint -> value.
pub type BatchResponse = HashMap<String, EndpointData>;
