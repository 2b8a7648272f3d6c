//! Backend context: configuration, lifecycle and entry points
//!
//! - **config**: serializable backend configuration
//! - **backend**: the caller-owned context threaded through every call
//! - **counters**: per-operator call counts
//! - **table**: operator table and free-function entry points
//! - **error**: configuration errors

mod backend;
mod config;
mod counters;
mod error;
pub mod table;

pub use backend::{BackendContext, DebugCallback};
pub use config::{BackendConfig, EnabledOperators};
pub use counters::{OpCount, OpCountEntry, OpCountSummary, OpCounters};
pub use error::BackendError;
pub use table::{init, init_with, OperatorTable};
