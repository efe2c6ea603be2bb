//! HTTP client construction, the fixed-payload workload, and the
//! virtual-user iteration driver.
mod client;
mod driver;
pub(crate) mod workload;


pub use driver::setup_driver;
pub use workload::{EventPayload, Workload};
