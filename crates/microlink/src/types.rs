// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Response envelope and payload types for the Microlink API
//!
//! Every Microlink response is a top-level envelope carrying a `status`
//! discriminator plus an optional payload. The envelope's `status` field is
//! the authoritative success/failure signal; the HTTP status code is
//! informative only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Envelope status reported by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The request succeeded and `data` carries the payload
    Success,
    /// The request failed and `message`/`statusCode` describe why
    Error,
}

/// A response header value: a single string or a repeated list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum HeaderValue {
    One(String),
    Many(Vec<String>),
}

/// A media asset attached to the metadata (image, logo, screenshot, PDF, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Where the asset is served from
    pub url: String,
    /// MIME type of the asset
    #[serde(rename = "type")]
    pub content_type: String,
    /// Size in bytes
    pub size: u64,
    /// Height in pixels
    pub height: u32,
    /// Width in pixels
    pub width: u32,
    /// Human-readable size
    pub size_pretty: String,
}

/// Link metadata extracted by the remote service
///
/// Fields the upstream marks nullable are `Option`; fields that only appear
/// when the matching request flag was set (screenshot, pdf, ...) are
/// `Option` as well. Unmodeled upstream fields are preserved verbatim in
/// `extra` rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Page language code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Page author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publishing organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Publication date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Canonical URL of the page
    pub url: String,
    /// Main image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Media>,
    /// Site logo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Media>,
    /// Rendered screenshot, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<Media>,
    /// Rendered PDF, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<Media>,
    /// Detected video asset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Media>,
    /// Detected audio asset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Media>,
    /// Dominant color palette, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
    /// Performance insights, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<serde_json::Value>,
    /// Upstream fields not modeled above, preserved verbatim
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Top-level response envelope
///
/// Invariant: `status == Success` requires `data` to be present; a success
/// envelope without data is a contract violation by the remote service and
/// surfaces as a distinct error, never as success with empty data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Authoritative success/failure discriminator
    pub status: ResponseStatus,
    /// Payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Metadata>,
    /// Error description, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Remote status code, as reported inside the envelope
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Redirect chain followed while resolving the target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirects: Option<Vec<String>>,
    /// Response headers echoed by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, HeaderValue>>,
}
