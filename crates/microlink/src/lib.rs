// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Microlink link-preview and metadata-extraction API client
//!
//! This crate wraps the Microlink API, which turns any public URL into
//! structured metadata: title, description, publisher, media assets, and on
//! request a rendered screenshot, PDF or performance insights.
//!
//! The request pipeline is the same for every operation: per-call options
//! are merged over configured defaults, validated before any request is
//! built, flattened into dotted query parameters, and the JSON response is
//! normalized against the envelope contract: strict schema first, then a
//! relaxed fallback that tolerates minor upstream drift. Failures are typed:
//! callers can tell bad input, transport trouble, remote-reported errors and
//! contract violations apart without string matching.
//!
//! # Example
//!
//! ```no_run
//! use microlink::{MicrolinkClient, MicrolinkConfig, MicrolinkOptions};
//!
//! # async fn run() -> Result<(), microlink::MicrolinkError> {
//! let client = MicrolinkClient::new(MicrolinkConfig {
//!     api_key: Some("your-api-key".to_string()),
//!     ..MicrolinkConfig::default()
//! })?;
//!
//! let metadata = client
//!     .get_metadata("https://github.com/microlinkhq", &MicrolinkOptions::default())
//!     .await?;
//! println!("{:?} - {:?}", metadata.title, metadata.description);
//! # Ok(())
//! # }
//! ```
//!
//! Batch processing fans the primary operation out across many URLs without
//! letting one failure abort the rest:
//!
//! ```no_run
//! # use microlink::{MicrolinkClient, MicrolinkConfig, MicrolinkOptions};
//! # async fn run() -> Result<(), microlink::MicrolinkError> {
//! # let client = MicrolinkClient::new(MicrolinkConfig::default())?;
//! let outcomes = client
//!     .batch_get_metadata(
//!         vec![
//!             "https://github.com/microlinkhq".to_string(),
//!             "https://vercel.com".to_string(),
//!         ],
//!         &MicrolinkOptions::default(),
//!     )
//!     .await;
//!
//! for outcome in &outcomes {
//!     match outcome.data() {
//!         Some(data) => println!("{}: {:?}", outcome.url(), data.title),
//!         None => eprintln!("{} failed", outcome.url()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
mod normalize;
pub mod options;
pub mod types;

pub use client::{DEFAULT_BASE_URL, MicrolinkClient, MicrolinkConfig};
pub use error::MicrolinkError;
pub use options::{ColorScheme, MicrolinkOptions, Viewport, WaitUntil};
pub use types::{Envelope, HeaderValue, Media, Metadata, ResponseStatus};
