//! Client for the BestChange currency-exchange aggregator feed.
//!
//! The aggregator publishes its whole database as a periodically regenerated
//! ZIP archive of semicolon-delimited, windows-1251 encoded tables. This
//! crate downloads the archive (reusing a short-lived on-disk cache), parses
//! the five tables into typed collections, and offers lookup and filtering
//! helpers over them.
//!
//! ```no_run
//! use bestchange::{BestChange, ClientConfig, Directory};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let api = BestChange::new(ClientConfig::default()).await;
//! if let (Some(currencies), Some(rates)) = (api.currencies(), api.rates()) {
//!     for offer in rates.filter(93, 42).iter().take(3) {
//!         println!(
//!             "{} -> {}: give {:.4} get {:.4}",
//!             currencies.name_by_id(offer.record.give_id).unwrap_or("?"),
//!             currencies.name_by_id(offer.record.get_id).unwrap_or("?"),
//!             offer.give,
//!             offer.get,
//!         );
//!     }
//! }
//! # }
//! ```
//!
//! Errors never surface as panics or `Result`s from [`BestChange::load`]:
//! a failed load stores one message behind [`BestChange::error`] and every
//! collection accessor returns `None` until a later load succeeds.

mod archive;
mod cache;
mod fetch;

pub mod client;
pub mod config;
pub mod records;

pub use client::BestChange;
pub use config::ClientConfig;
pub use records::{
    Cities, CityRecord, Currencies, CurrencyRecord, Directory, ExchangerRecord, Exchangers,
    NamedRecord, NormalizedRate, RateRecord, Rates, Reviews, Top, TopRecord,
};
