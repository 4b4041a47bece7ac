//! Finds opaque Secrets in a namespace that no Pod consumes.
//!
//! `usage` and `detect` are pure functions over a Pod/Secret snapshot; `k8s` and
//! `inventory` fetch that snapshot, and `report` prints the result. The binary is a
//! thin wrapper, so every module is public for the tests in `tests/`.
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,   // internal helpers; callers are tests, not library consumers
    clippy::missing_errors_doc,   // every fallible fn returns anyhow::Error with context attached
)]

pub mod cli;
pub mod config;
pub mod detect;
pub mod inventory;
pub mod k8s;
pub mod report;
pub mod usage;
