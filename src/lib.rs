//! matchwarden: hierarchical match-data verification worker
//!
//! Ingests submitted competitive-match records (tournaments containing
//! matches, games and player scores) and decides, level by level, whether
//! each record is trustworthy enough to feed a downstream rating engine.
//! Untrusted or malformed data never reaches that engine; provisionally
//! trusted data (pending human confirmation) is tracked separately from
//! definitive accepts and rejects.
//!
//! # Architecture
//! - [`entities`]: the four-level tree (Tournament → Match → Game → Score)
//!   with verification/processing statuses and reason bitmaps
//! - [`checks`]: ordered, non-short-circuiting automation check chains per
//!   level, producing pass/fail verdicts plus accumulated flags
//! - [`processors`]: bottom-up check execution, verdict application,
//!   data-fetch stage and strict stage advancement
//! - [`worker`]: scheduler-facing service wrapping load → mutate → save,
//!   plus the confirm / reset / approve operations
//! - [`store`] / [`fetch`]: collaborator boundaries (persistence, external
//!   match data); real backends live outside this crate

pub mod checks;
pub mod config;
pub mod entities;
pub mod error;
pub mod fetch;
pub mod processors;
pub mod store;
pub mod worker;

pub use config::WorkerConfig;
pub use error::{FetchError, Result, StoreError, WorkerError};
pub use worker::Worker;
