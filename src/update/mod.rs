//! The update decision engine.
//!
//! For every hostname the current addresses are compared with the cached
//! ones, and only changed families are pushed to the provider. The cache is
//! touched only for updates the provider confirmed, so a failed run is simply
//! retried by the next one.

mod decision;
mod report;
mod updater;

pub use decision::{UpdateDecision, decide_update};
pub use report::{HostOutcome, HostReport, RunReport};
pub use updater::{CycleError, Updater};
