//! Typed client for the Warsaw Open Data API.
//!
//! # Overview
//! Wraps `api.um.warszawa.pl` behind one blocking client with a method per
//! dataset — urban greenery, air quality, public transport, defibrillators,
//! culture, education and road works. Every method returns typed records
//! instead of raw JSON.
//!
//! # Design
//! - `WarsawClient` holds the base URL, the optional API key and a
//!   transport; datasets differ only in their URL parameters and envelope
//!   shape.
//! - Raw payload coercion (compact dates, three timestamp formats,
//!   comma decimals) lives in `convert`; record structs in `records` map
//!   JSON keys to stable English field names.
//! - The transport is swappable at runtime between a plain agent and a
//!   SQLite-backed response cache, and is closed for good once the client
//!   observes an upstream error envelope.
//! - Integration tests run against the workspace's mock-server crate;
//!   records are defined independently from it so schema drift shows up in
//!   tests.

pub mod cache;
pub mod client;
pub mod convert;
pub mod error;
pub mod records;
mod transport;

pub use cache::{CacheConfig, CACHE_FILE_NAME};
pub use client::{WarsawClient, DEFAULT_BASE_URL};
pub use convert::CommaDecimal;
pub use error::{Error, Result};
pub use records::Record;
