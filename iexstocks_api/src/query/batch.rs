use url::Url;

use crate::types::{ChartRange, Endpoint};

use super::common::{Query, QueryCommon};

/// Default value for the `last` news-count option.
pub const DEFAULT_LAST: u32 = 10;

/// Query for the market batch endpoint: a symbol list, an endpoint group,
/// and the chart/news/percent options.
///
/// When every option still holds its catalog default, the option parameters
/// are omitted from the wire request and the server defaults apply.
#[derive(Clone)]
pub struct BatchQuery {
    pub common: QueryCommon,
    /// Endpoint group requested via the `types` parameter.
    pub endpoints: Vec<Endpoint>,
    /// Lookback range for the chart, dividends, and splits endpoints.
    pub range: ChartRange,
    /// Number of news items to return, between 1 and 50.
    pub last: u32,
    /// Whether percentage fields are returned scaled for display.
    pub display_percent: bool,
}

impl Default for BatchQuery {
    fn default() -> BatchQuery {
        BatchQuery {
            common: QueryCommon::default(),
            endpoints: Vec::new(),
            range: ChartRange::default(),
            last: DEFAULT_LAST,
            display_percent: false,
        }
    }
}

impl Query for BatchQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        url.query_pairs_mut()
            .append_pair("types", &Endpoint::join(&self.endpoints));
        if !self.uses_default_options() {
            url.query_pairs_mut()
                .append_pair("range", self.range.as_str());
            url.query_pairs_mut()
                .append_pair("last", &self.last.to_string());
            url.query_pairs_mut()
                .append_pair("displayPercent", if self.display_percent { "true" } else { "false" });
        }
        url
    }
}

impl BatchQuery {
    pub fn with_endpoints(mut self, endpoints: &[Endpoint]) -> Self {
        self.endpoints = endpoints.to_vec();
        self
    }

    pub fn with_range(mut self, range: ChartRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_last(mut self, last: u32) -> Self {
        self.last = last;
        self
    }

    pub fn with_display_percent(mut self, display_percent: bool) -> Self {
        self.display_percent = display_percent;
        self
    }

    /// True when every option equals its catalog default, in which case the
    /// option parameters are left off the wire entirely.
    pub fn uses_default_options(&self) -> bool {
        self.range == ChartRange::default() && self.last == DEFAULT_LAST && !self.display_percent
    }
}

/// Splits the full endpoint catalog across two requests, carrying the symbol
/// list and options of `base` into each.
///
/// Requesting all twenty endpoints in one URL has historically exceeded the
/// server-side length limit, so the catalog is always fetched as the first
/// ten names and the remainder. Pure and deterministic.
pub fn build_batch_requests(base: &BatchQuery) -> [BatchQuery; 2] {
    [
        base.clone().with_endpoints(Endpoint::first_group()),
        base.clone().with_endpoints(Endpoint::second_group()),
    ]
}
