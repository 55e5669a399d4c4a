mod common;
pub use self::common::Query;

mod batch;
pub use self::batch::{build_batch_requests, BatchQuery, DEFAULT_LAST};

mod history;
pub use self::history::HistoricalQuery;
