//! Logging setup for hosts embedding the recommendation engine.
//!
//! The library itself only emits [`tracing`] events; installing a subscriber
//! is the host's call. [`init_subscriber`] provides the default console one.

mod subscriber;

pub use subscriber::{LOG_ENV_VAR, build_filter, init_subscriber};
