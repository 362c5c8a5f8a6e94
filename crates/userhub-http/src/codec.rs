//! The representation codec: values in, negotiated bytes out.
//!
//! Responses are built from intermediate `serde_json::Value`s and encoded
//! per the negotiated media type: JSON is a structural mapping, XML is a
//! generic object→element encoding (maps become nested elements keyed by
//! field name, sequences become repeated elements, scalars become text).
//!
//! Write bodies are decoded as JSON only — even when the declared
//! Content-Type is `application/xml` — and a parse failure surfaces the
//! parser's message as a 400-level domain error.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::BytesText;
use serde_json::Value;

use userhub_model::{MediaType, UserRecord, UsersError, UsersResult};

/// Errors from the XML encoder.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The underlying writer failed.
    #[error("xml write error: {0}")]
    Write(#[from] io::Error),

    /// XML payloads must be JSON objects at the top level.
    #[error("xml payloads must be objects, got {0}")]
    NotAnObject(&'static str),
}

impl From<CodecError> for UsersError {
    fn from(err: CodecError) -> Self {
        UsersError::internal_error(err.to_string())
    }
}

/// Encode a value in the negotiated representation.
pub fn encode(media: MediaType, value: &Value) -> UsersResult<Vec<u8>> {
    match media {
        MediaType::Json => serde_json::to_vec(value)
            .map_err(|e| UsersError::internal_error(format!("json encode error: {e}"))),
        MediaType::Xml => Ok(encode_xml(value)?),
    }
}

/// Encode a JSON object as XML: one element per top-level key, recursing
/// into nested objects and repeating elements for arrays.
///
/// No XML declaration is emitted; the document is the bare element tree.
pub fn encode_xml(value: &Value) -> Result<Vec<u8>, CodecError> {
    let Value::Object(map) = value else {
        return Err(CodecError::NotAnObject(json_type_name(value)));
    };

    let mut buf = Vec::with_capacity(256);
    let mut writer = Writer::new(&mut buf);
    for (key, child) in map {
        write_value(&mut writer, key, child)?;
    }
    Ok(buf)
}

/// Write a single `<tag>…</tag>` tree for a JSON value.
fn write_value<W: Write>(writer: &mut Writer<W>, tag: &str, value: &Value) -> io::Result<()> {
    match value {
        Value::Null => {
            writer.create_element(tag).write_empty()?;
        }
        Value::Bool(b) => {
            let text = if *b { "true" } else { "false" };
            writer
                .create_element(tag)
                .write_text_content(BytesText::new(text))?;
        }
        Value::Number(n) => {
            writer
                .create_element(tag)
                .write_text_content(BytesText::new(&n.to_string()))?;
        }
        Value::String(s) => {
            writer
                .create_element(tag)
                .write_text_content(BytesText::new(s))?;
        }
        // Sequences become repeated elements under the same tag.
        Value::Array(items) => {
            for item in items {
                write_value(writer, tag, item)?;
            }
        }
        Value::Object(map) => {
            writer.create_element(tag).write_inner_content(|w| {
                for (key, child) in map {
                    write_value(w, key, child)?;
                }
                Ok(())
            })?;
        }
    }
    Ok(())
}

/// Decode a write body into a user record.
///
/// Bodies are parsed as JSON regardless of the declared Content-Type.
///
/// # Errors
///
/// Returns a ParseError carrying the parser's message for malformed JSON,
/// or a generic one when the body is valid JSON but not an object.
pub fn decode_record(body: &[u8]) -> UsersResult<UserRecord> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| UsersError::parse_error(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(UserRecord::from_object(map)),
        other => Err(UsersError::parse_error(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
