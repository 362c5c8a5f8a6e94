//! Content negotiation: `Accept` policy and write `Content-Type` validation.
//!
//! The response format is decided by walking the `Accept` list in header
//! order: the first entry whose essence is `application/json`,
//! `application/*`, or `*/*` selects JSON; the first entry that is exactly
//! `application/xml` selects XML. An empty list defaults to JSON; a
//! non-empty list matching neither rule is a 406.
//!
//! Write requests additionally declare a `Content-Type`, which must match
//! the operation's accepted set exactly (parameters such as `charset` are
//! ignored) or the request is a 415.

use http::HeaderMap;

use userhub_model::{MediaType, UsersError, UsersOperation, UsersResult};

/// Media-type essences treated as a JSON preference.
const JSON_ACCEPTED: [&str; 3] = ["application/json", "application/*", "*/*"];

/// Decide the response representation from the `Accept` header(s).
///
/// # Errors
///
/// Returns NotAcceptable when the accept list is non-empty and no entry
/// matches a supported representation.
pub fn response_media_type(headers: &HeaderMap) -> UsersResult<MediaType> {
    let entries = accept_entries(headers);
    if entries.is_empty() {
        return Ok(MediaType::Json);
    }

    for entry in &entries {
        if JSON_ACCEPTED.contains(&entry.as_str()) {
            return Ok(MediaType::Json);
        }
        if entry == "application/xml" {
            return Ok(MediaType::Xml);
        }
    }

    Err(UsersError::not_acceptable())
}

/// Validate the declared `Content-Type` of a write request.
///
/// POST accepts only `application/json`; PUT and PATCH accept
/// `application/json` or `application/xml`. (Bodies are decoded as JSON
/// regardless; see [`crate::codec`].)
///
/// # Errors
///
/// Returns UnsupportedMediaType when the header is missing, unparsable, or
/// outside the operation's accepted set.
pub fn validate_write_content_type(headers: &HeaderMap, op: UsersOperation) -> UsersResult<()> {
    let declared = headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| UsersError::unsupported_media_type("(none)"))?;

    let Some(essence) = media_essence(declared) else {
        return Err(UsersError::unsupported_media_type(declared));
    };

    let accepted: &[&str] = match op {
        UsersOperation::CreateUser => &["application/json"],
        _ => &["application/json", "application/xml"],
    };

    if accepted.contains(&essence.as_str()) {
        Ok(())
    } else {
        Err(UsersError::unsupported_media_type(declared))
    }
}

/// Collect the ordered accept-list essences from all `Accept` headers.
///
/// Entries that fail to parse as a media type are kept verbatim so they
/// still count toward "non-empty list, nothing matched" (406) rather than
/// silently vanishing.
fn accept_entries(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(http::header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| media_essence(s).unwrap_or_else(|| s.to_owned()))
        .collect()
}

/// Parse a media-type string down to its essence (`type/subtype`, no
/// parameters), lower-cased.
fn media_essence(raw: &str) -> Option<String> {
    raw.trim()
        .parse::<mime::Mime>()
        .ok()
        .map(|m| m.essence_str().to_ascii_lowercase())
}
