//! Thin I/O layer against the Kubernetes API.

pub mod client;
pub mod list;
