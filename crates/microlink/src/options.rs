// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request options: merging, validation and query encoding
//!
//! Options flow through three steps on every call: per-call values are
//! overlaid on the client's configured defaults, the merged copy is
//! validated (fail-fast on the first violated constraint), and the result
//! is flattened into the dotted query-key wire format. The caller's value
//! is never mutated; each call works on a fresh merged copy.

use api_client::QueryPairs;
use url::Url;

use crate::error::MicrolinkError;

/// Page lifecycle event the renderer waits for before capturing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// The `load` event fired
    Load,
    /// The `DOMContentLoaded` event fired
    DomContentLoaded,
    /// No network connections for at least 500 ms
    NetworkIdle0,
    /// At most two network connections for at least 500 ms
    NetworkIdle2,
}

impl WaitUntil {
    /// The value sent as the `waitUntil` query parameter
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "domcontentloaded",
            Self::NetworkIdle0 => "networkidle0",
            Self::NetworkIdle2 => "networkidle2",
        }
    }
}

/// Preferred color scheme when rendering the target page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    /// The value sent as the `colorScheme` query parameter
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Viewport dimensions used when rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels, non-zero
    pub width: u32,
    /// Height in pixels, non-zero
    pub height: u32,
}

/// Per-call request options
///
/// Unset fields fall back to the client's configured defaults; boolean
/// feature flags appear in the request only when enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MicrolinkOptions {
    /// Cache time-to-live hint, e.g. `"1d"`
    pub ttl: Option<String>,
    /// Capture a screenshot of the target page
    pub screenshot: Option<bool>,
    /// Render the target page as a PDF
    pub pdf: Option<bool>,
    /// Collect performance insights
    pub insights: Option<bool>,
    /// Extract the dominant color palette
    pub palette: Option<bool>,
    /// Detect audio assets
    pub audio: Option<bool>,
    /// Detect video assets
    pub video: Option<bool>,
    /// Allow iframe embedding detection
    pub iframe: Option<bool>,
    /// Prerender the page in a headless browser
    pub prerender: Option<bool>,
    /// Extra milliseconds to wait before capturing
    pub wait_for: Option<u64>,
    /// Page lifecycle event to wait for
    pub wait_until: Option<WaitUntil>,
    /// Preferred color scheme
    pub color_scheme: Option<ColorScheme>,
    /// Device preset name used for rendering
    pub device: Option<String>,
    /// Viewport dimensions
    pub viewport: Option<Viewport>,
    /// Custom headers forwarded to the target, in insertion order
    pub headers: Vec<(String, String)>,
}

impl MicrolinkOptions {
    /// Overlay these per-call options on the given defaults
    ///
    /// A set field always wins over its default; unset fields inherit.
    pub fn merged_with(&self, defaults: &MicrolinkOptions) -> MicrolinkOptions {
        MicrolinkOptions {
            ttl: self.ttl.clone().or_else(|| defaults.ttl.clone()),
            screenshot: self.screenshot.or(defaults.screenshot),
            pdf: self.pdf.or(defaults.pdf),
            insights: self.insights.or(defaults.insights),
            palette: self.palette.or(defaults.palette),
            audio: self.audio.or(defaults.audio),
            video: self.video.or(defaults.video),
            iframe: self.iframe.or(defaults.iframe),
            prerender: self.prerender.or(defaults.prerender),
            wait_for: self.wait_for.or(defaults.wait_for),
            wait_until: self.wait_until.or(defaults.wait_until),
            color_scheme: self.color_scheme.or(defaults.color_scheme),
            device: self.device.clone().or_else(|| defaults.device.clone()),
            viewport: self.viewport.or(defaults.viewport),
            headers: if self.headers.is_empty() {
                defaults.headers.clone()
            } else {
                self.headers.clone()
            },
        }
    }

    /// Validate the options together with the target URL
    ///
    /// Constraints are checked in declaration order and only the first
    /// violation is surfaced, with the offending field path.
    pub(crate) fn validate(&self, url: &str) -> Result<(), MicrolinkError> {
        let parsed = Url::parse(url).map_err(|e| MicrolinkError::Validation {
            field: "url".to_string(),
            message: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MicrolinkError::Validation {
                field: "url".to_string(),
                message: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }

        if let Some(viewport) = self.viewport {
            if viewport.width == 0 {
                return Err(MicrolinkError::Validation {
                    field: "viewport.width".to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
            if viewport.height == 0 {
                return Err(MicrolinkError::Validation {
                    field: "viewport.height".to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
        }

        for (name, _) in &self.headers {
            if name.trim().is_empty() {
                return Err(MicrolinkError::Validation {
                    field: "headers".to_string(),
                    message: "header names cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Flatten the options into query pairs, the target URL first
    pub(crate) fn to_query(&self, url: &str) -> QueryPairs {
        let mut query = QueryPairs::new();
        query.push("url", url);
        query.push_opt("ttl", self.ttl.as_deref());
        query.push_flag("screenshot", self.screenshot.unwrap_or(false));
        query.push_flag("pdf", self.pdf.unwrap_or(false));
        query.push_flag("insights", self.insights.unwrap_or(false));
        query.push_flag("palette", self.palette.unwrap_or(false));
        query.push_flag("audio", self.audio.unwrap_or(false));
        query.push_flag("video", self.video.unwrap_or(false));
        query.push_flag("iframe", self.iframe.unwrap_or(false));
        query.push_flag("prerender", self.prerender.unwrap_or(false));
        query.push_opt("waitFor", self.wait_for);
        query.push_opt("waitUntil", self.wait_until.map(WaitUntil::as_query_value));
        query.push_opt(
            "colorScheme",
            self.color_scheme.map(ColorScheme::as_query_value),
        );
        query.push_opt("device", self.device.as_deref());

        if let Some(viewport) = self.viewport {
            query.push_nested("viewport", "width", viewport.width);
            query.push_nested("viewport", "height", viewport.height);
        }

        for (name, value) in &self.headers {
            query.push_nested("headers", name, value);
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_per_call_values() {
        let defaults = MicrolinkOptions {
            ttl: Some("1d".to_string()),
            screenshot: Some(true),
            device: Some("iPhone X".to_string()),
            ..MicrolinkOptions::default()
        };

        let per_call = MicrolinkOptions {
            ttl: Some("5m".to_string()),
            screenshot: Some(false),
            ..MicrolinkOptions::default()
        };

        let merged = per_call.merged_with(&defaults);
        assert_eq!(merged.ttl.as_deref(), Some("5m"));
        assert_eq!(merged.screenshot, Some(false));
        assert_eq!(merged.device.as_deref(), Some("iPhone X"));
    }

    #[test]
    fn merge_does_not_mutate_inputs() {
        let defaults = MicrolinkOptions {
            pdf: Some(true),
            ..MicrolinkOptions::default()
        };
        let per_call = MicrolinkOptions::default();

        let merged = per_call.merged_with(&defaults);
        assert_eq!(merged.pdf, Some(true));
        assert_eq!(per_call.pdf, None);
    }

    #[test]
    fn validate_accepts_http_and_https() {
        let options = MicrolinkOptions::default();
        assert!(options.validate("https://example.com").is_ok());
        assert!(options.validate("http://example.com/path?x=1").is_ok());
    }

    #[test]
    fn validate_rejects_malformed_url() {
        let options = MicrolinkOptions::default();
        let error = options.validate("not a url").unwrap_err();
        match error {
            MicrolinkError::Validation { field, .. } => assert_eq!(field, "url"),
            other => panic!("Expected Validation error, got: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let options = MicrolinkOptions::default();
        let error = options.validate("ftp://example.com").unwrap_err();
        match error {
            MicrolinkError::Validation { field, message } => {
                assert_eq!(field, "url");
                assert!(message.contains("ftp"));
            }
            other => panic!("Expected Validation error, got: {other:?}"),
        }
    }

    #[test]
    fn validate_surfaces_first_violation_only() {
        // Both the URL and the viewport are invalid; the URL is declared
        // first and must win.
        let options = MicrolinkOptions {
            viewport: Some(Viewport {
                width: 0,
                height: 0,
            }),
            ..MicrolinkOptions::default()
        };

        let error = options.validate("nope").unwrap_err();
        match error {
            MicrolinkError::Validation { field, .. } => assert_eq!(field, "url"),
            other => panic!("Expected Validation error, got: {other:?}"),
        }

        let error = options.validate("https://example.com").unwrap_err();
        match error {
            MicrolinkError::Validation { field, .. } => assert_eq!(field, "viewport.width"),
            other => panic!("Expected Validation error, got: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_empty_header_name() {
        let options = MicrolinkOptions {
            headers: vec![(String::new(), "value".to_string())],
            ..MicrolinkOptions::default()
        };

        let error = options.validate("https://example.com").unwrap_err();
        match error {
            MicrolinkError::Validation { field, .. } => assert_eq!(field, "headers"),
            other => panic!("Expected Validation error, got: {other:?}"),
        }
    }

    #[test]
    fn query_starts_with_url_and_flattens_nested_fields() {
        let options = MicrolinkOptions {
            screenshot: Some(true),
            wait_until: Some(WaitUntil::NetworkIdle0),
            viewport: Some(Viewport {
                width: 1200,
                height: 800,
            }),
            headers: vec![("X-Custom".to_string(), "value".to_string())],
            ..MicrolinkOptions::default()
        };

        let query = options.to_query("https://example.com");
        assert_eq!(
            query.as_slice(),
            &[
                ("url".to_string(), "https://example.com".to_string()),
                ("screenshot".to_string(), "true".to_string()),
                ("waitUntil".to_string(), "networkidle0".to_string()),
                ("viewport.width".to_string(), "1200".to_string()),
                ("viewport.height".to_string(), "800".to_string()),
                ("headers.X-Custom".to_string(), "value".to_string()),
            ]
        );
    }

    #[test]
    fn disabled_flags_are_omitted() {
        let options = MicrolinkOptions {
            screenshot: Some(false),
            pdf: None,
            ..MicrolinkOptions::default()
        };

        let query = options.to_query("https://example.com");
        assert_eq!(query.len(), 1);
        assert_eq!(query.as_slice()[0].0, "url");
    }

    #[test]
    fn wait_until_wire_values() {
        assert_eq!(WaitUntil::Load.as_query_value(), "load");
        assert_eq!(WaitUntil::DomContentLoaded.as_query_value(), "domcontentloaded");
        assert_eq!(WaitUntil::NetworkIdle0.as_query_value(), "networkidle0");
        assert_eq!(WaitUntil::NetworkIdle2.as_query_value(), "networkidle2");
    }
}
