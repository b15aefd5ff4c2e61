// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request options and response payloads for the CoinDesk price index API

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Quote currencies supported by the Bitcoin Price Index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SupportedCurrency {
    /// United States dollar
    Usd,
    /// Euro
    Eur,
    /// British pound sterling
    Gbp,
    /// Chinese yuan
    Cny,
    /// Japanese yen
    Jpy,
}

impl SupportedCurrency {
    /// The upper-case ISO currency code used in query parameters and payloads
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cny => "CNY",
            Self::Jpy => "JPY",
        }
    }

    /// The lower-case form used in URL path segments
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
            Self::Cny => "cny",
            Self::Jpy => "jpy",
        }
    }

    /// All supported currencies
    pub const fn all() -> &'static [SupportedCurrency] {
        &[Self::Usd, Self::Eur, Self::Gbp, Self::Cny, Self::Jpy]
    }
}

impl fmt::Display for SupportedCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SupportedCurrency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "CNY" => Ok(Self::Cny),
            "JPY" => Ok(Self::Jpy),
            other => Err(format!("unsupported currency code: {other}")),
        }
    }
}

/// Time window selector for historical price queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    /// Daily closing values
    Close,
    /// The current (intraday) value
    Now,
    /// The most recent closing value
    Yesterday,
}

impl TimePeriod {
    /// The value sent as the `for` query parameter
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Now => "now",
            Self::Yesterday => "yesterday",
        }
    }
}

/// Input parameters for the current price index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrentPriceInput {
    /// Specific currency to include in the response; the upstream default
    /// response covers USD, EUR and GBP
    pub currency: Option<SupportedCurrency>,
}

/// Input parameters for historical price data
///
/// Unset fields carry their documented defaults: `currency` and `index`
/// both default to USD. Historical data is available from July 18, 2010.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalPriceInput {
    /// Start date in `YYYY-MM-DD` format
    pub start: Option<String>,
    /// End date in `YYYY-MM-DD` format
    pub end: Option<String>,
    /// Currency for the price data
    pub currency: Option<SupportedCurrency>,
    /// Index for the price data
    pub index: Option<SupportedCurrency>,
    /// Named time window, sent as the `for` query parameter
    pub period: Option<TimePeriod>,
}

/// Timestamps attached to a price index response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceIndexTime {
    /// Human-readable update time
    pub updated: String,
    /// ISO-8601 update time
    #[serde(rename = "updatedISO")]
    pub updated_iso: String,
    /// Update time in UK format, as spelled by the upstream API
    pub updateduk: String,
}

/// Per-currency quote in the current price index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// ISO currency code
    pub code: String,
    /// HTML entity for the currency symbol
    pub symbol: String,
    /// Formatted rate string
    pub rate: String,
    /// Currency display name
    pub description: String,
    /// Rate as a float
    pub rate_float: f64,
}

/// Response from the current price index endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceIndexResponse {
    /// When the index was last updated
    pub time: PriceIndexTime,
    /// Upstream data disclaimer
    pub disclaimer: String,
    /// Chart title
    #[serde(rename = "chartName")]
    pub chart_name: String,
    /// Quotes keyed by currency code
    pub bpi: HashMap<String, CurrencyInfo>,
}

/// Response from the historical close-price endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPriceResponse {
    /// When the series was last updated
    pub time: PriceIndexTime,
    /// Upstream data disclaimer
    pub disclaimer: String,
    /// Daily closing prices keyed by `YYYY-MM-DD` date
    pub bpi: HashMap<String, f64>,
}

/// Response from the supported-currencies endpoint: code mapped to display name
pub type SupportedCurrenciesResponse = HashMap<String, String>;
