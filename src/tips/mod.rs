//! Recommendation matching and suppression.
//!
//! - [`index`]: pattern → ids grouping built once from tip data
//! - [`accumulator`]: the persisted, grow-only recommendation set
//! - [`important`]: ignore list and gate for individually notified tips
//! - [`workspace`]: dismissal flag and filter for workspace recommendations
//! - [`service`]: deferred per-document units tying it all together
pub mod accumulator;
pub mod important;
pub mod index;
pub mod service;
pub mod workspace;

pub use service::{Collaborators, DocumentObserved, ExtensionTipsService};
