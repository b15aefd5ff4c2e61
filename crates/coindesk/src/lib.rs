// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! CoinDesk Bitcoin Price Index API client
//!
//! This crate wraps the CoinDesk data API, which serves the current Bitcoin
//! Price Index (BPI), historical daily closing prices, and the list of
//! supported quote currencies. No API key is required.
//!
//! All operations are plain GET requests against a fixed base URL; responses
//! are bare JSON documents parsed against declared payload types. Input is
//! validated before any request is constructed: currencies are a closed enum
//! and date bounds must be well-formed `YYYY-MM-DD` strings.
//!
//! # Example
//!
//! ```no_run
//! use coindesk::{CoindeskClient, CoindeskConfig, SupportedCurrency};
//!
//! # async fn run() -> Result<(), coindesk::CoindeskError> {
//! let client = CoindeskClient::new(CoindeskConfig::default())?;
//!
//! let index = client.price_in_currency(SupportedCurrency::Eur).await?;
//! if let Some(info) = index.bpi.get("EUR") {
//!     println!("1 BTC = {} {}", info.rate, info.code);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod types;

pub use client::{CoindeskClient, CoindeskConfig, CoindeskError};
pub use types::{
    CurrencyInfo, CurrentPriceInput, HistoricalPriceInput, HistoricalPriceResponse,
    PriceIndexResponse, PriceIndexTime, SupportedCurrenciesResponse, SupportedCurrency, TimePeriod,
};
