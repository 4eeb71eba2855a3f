//! # Ports Layer
//!
//! - `provider`: where the server reads off-chain records from
//! - `functions`: custom selector handlers beside the record functions
//! - `time`: clock used for response expiry

pub mod functions;
pub mod provider;
pub mod time;

pub use functions::{FnHandler, FunctionHandler};
pub use provider::{RecordProvider, RecordView};
pub use time::{SystemTimeSource, TimeSource};
