//! Final-report delivery adapters.

mod http_sink;
mod mock;

pub use http_sink::HttpReportSink;
pub use mock::MockReportSink;
