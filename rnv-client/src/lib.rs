//! Client for the RNV Start.Info transit API.
//!
//! Wraps each REST endpoint (station and line packages, departure monitors,
//! ticker, news, maps) in a typed async method that validates its
//! parameters and returns the decoded JSON response.

pub mod api;
pub mod domain;
pub mod models;
pub mod query;

pub use api::{RnvClient, RnvConfig, RnvError};
