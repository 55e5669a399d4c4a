use chrono::NaiveDate;
use serde::Deserialize;

/// One daily bar from the chart endpoint. Extra response fields are ignored.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ChartBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}
