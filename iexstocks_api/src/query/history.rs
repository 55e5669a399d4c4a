use url::Url;

use crate::types::{ChartRange, Endpoint};

use super::common::{Query, QueryCommon};

/// Query for historical daily bars: the chart endpoint alone, over a
/// resolved lookback range. The range is always sent on the wire.
#[derive(Clone, Default)]
pub struct HistoricalQuery {
    pub common: QueryCommon,
    pub range: ChartRange,
}

impl Query for HistoricalQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        url.query_pairs_mut()
            .append_pair("types", Endpoint::Chart.as_str());
        url.query_pairs_mut()
            .append_pair("range", self.range.as_str());
        url
    }
}

impl HistoricalQuery {
    pub fn with_range(mut self, range: ChartRange) -> Self {
        self.range = range;
        self
    }
}
