//! Start.Info REST client.
//!
//! This module provides an HTTP client for the RNV Start.Info API, which
//! serves station and line data, live departure monitors, ticker messages
//! and network maps for the Rhein-Neckar transit network.
//!
//! Key characteristics of the API:
//! - Every endpoint is a GET authenticated by a static token header
//! - Several parameters pack multiple values with in-band separators
//!   (`$` for the update time triple, `,` for poles, `;` for lines)
//! - Request timestamps are minute-precision `YYYY-MM-DD+HH:MM`

mod client;
mod endpoints;
mod error;

pub use client::{
    BASE_URL_ENV, DEFAULT_BASE_URL, RnvClient, RnvConfig, TOKEN_ENV, TOKEN_HEADER,
};
pub use endpoints::{
    DEFAULT_REGION_ID, JourneyInfoRequest, NextStopsRequest, StationMonitorRequest, UpdateRequest,
};
pub use error::RnvError;
