//! Editor extension recommendation engine.
//!
//! Watches the documents a user opens, matches them against glob-keyed tip
//! tables, and recommends extensions. It accumulates silent recommendations,
//! notifies about important ones, and offers a one-time batch of
//! workspace-declared recommendations. Dismissals persist through a scoped
//! key-value store, so they survive restarts.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load tip tables and workspace declarations
//! - **[`storage`]**, **[`extensions`]**, **[`matcher`]**, **[`notification`]**:
//!   the host-facing seams (state store, installed query, globs, prompts)
//! - **[`tips`]**: pattern index, suppression state and the service itself
//! - **[`logging`]**: default console subscriber for embedding hosts
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod config;
pub mod error;
pub mod exec;
pub mod extensions;
pub mod logging;
pub mod matcher;
pub mod notification;
pub mod storage;
pub mod tips;

pub use config::TipsConfig;
pub use tips::{Collaborators, DocumentObserved, ExtensionTipsService};
