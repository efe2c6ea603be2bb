//! Check aggregation and latency histogram utilities.
mod collector;
mod histogram;
mod types;


pub use collector::setup_check_collector;
pub use histogram::LatencyHistogram;
pub use types::{CheckReport, CheckSample, CheckSummary};
