// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Two-tier response normalization
//!
//! Responses are first parsed against the full envelope schema. When that
//! fails, a relaxed fallback accepts the body anyway if it carries the two
//! mandatory envelope fields, `status` and `data`, rebuilding the envelope
//! from the individually-read fields. The fallback drops the `headers`
//! field. Only when both tiers fail does the call surface a schema error.
//!
//! Envelope semantics are enforced after parsing: an `error` status always
//! fails the call regardless of HTTP status code, and a `success` status
//! without data is a contract violation, not an empty success.

use serde_json::Value;

use crate::{
    error::MicrolinkError,
    types::{Envelope, Metadata, ResponseStatus},
};

/// Parse a response body into an envelope, strict tier first
pub(crate) fn parse_envelope(body: &str) -> Result<Envelope, MicrolinkError> {
    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => Ok(envelope),
        Err(strict_error) => {
            let value: Value =
                serde_json::from_str(body).map_err(|e| MicrolinkError::InvalidResponse {
                    message: format!("response body is not valid JSON: {e}"),
                })?;

            relaxed_envelope(&value).ok_or_else(|| MicrolinkError::InvalidResponse {
                message: format!("response does not match the envelope contract: {strict_error}"),
            })
        }
    }
}

/// Relaxed tier: accept any object carrying both `status` and `data`
///
/// `headers` is dropped on this path; the other optional fields are read
/// individually and ignored when malformed.
fn relaxed_envelope(value: &Value) -> Option<Envelope> {
    let object = value.as_object()?;
    if !object.contains_key("status") || !object.contains_key("data") {
        return None;
    }

    let status: ResponseStatus = serde_json::from_value(object.get("status")?.clone()).ok()?;
    let data: Option<Metadata> = serde_json::from_value(object.get("data")?.clone()).ok()?;

    let message = object
        .get("message")
        .and_then(Value::as_str)
        .map(ToString::to_string);
    let status_code = object
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok());
    let redirects = object
        .get("redirects")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok());

    Some(Envelope {
        status,
        data,
        message,
        status_code,
        redirects,
        headers: None,
    })
}

/// Apply the envelope's success/failure semantics
pub(crate) fn extract_data(envelope: Envelope) -> Result<Metadata, MicrolinkError> {
    if envelope.status == ResponseStatus::Error {
        let message = envelope
            .message
            .clone()
            .unwrap_or_else(|| "Unknown API error".to_string());
        let status_code = envelope.status_code;
        return Err(MicrolinkError::Api {
            message,
            status_code,
            response: Some(Box::new(envelope)),
        });
    }

    match envelope.data {
        Some(data) => Ok(data),
        None => Err(MicrolinkError::EmptySuccess {
            status_code: envelope.status_code,
        }),
    }
}

/// Full normalization pipeline: parse, then enforce envelope semantics
pub(crate) fn normalize(body: &str) -> Result<Metadata, MicrolinkError> {
    extract_data(parse_envelope(body)?)
}
