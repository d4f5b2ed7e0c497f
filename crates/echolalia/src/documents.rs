// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading input documents from a file or stdin.
//!
//! Accepts either a single JSON array of objects or a stream of JSON objects
//! (newline-delimited or simply concatenated).

use std::io::Read;
use std::path::Path;

use echolalia_core::{Document, EcholaliaError};
use serde_json::Value;

/// Read documents from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_documents(path: Option<&Path>) -> Result<Vec<Document>, EcholaliaError> {
    let text = match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).map_err(|e| EcholaliaError::Documents {
                message: format!("failed to read {}: {e}", p.display()),
                source: Some(Box::new(e)),
            })?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| EcholaliaError::Documents {
                    message: format!("failed to read stdin: {e}"),
                    source: Some(Box::new(e)),
                })?;
            buf
        }
    };
    parse_documents(&text)
}

/// Parse a JSON array of objects, or a sequence of JSON objects.
pub fn parse_documents(text: &str) -> Result<Vec<Document>, EcholaliaError> {
    if text.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(text).map_err(|e| parse_error("document array", e))?;
        return values
            .into_iter()
            .enumerate()
            .map(|(i, v)| into_object(v, i))
            .collect();
    }

    serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .enumerate()
        .map(|(i, v)| {
            let value = v.map_err(|e| parse_error(&format!("document {i}"), e))?;
            into_object(value, i)
        })
        .collect()
}

fn into_object(value: Value, index: usize) -> Result<Document, EcholaliaError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(EcholaliaError::Documents {
            message: format!("document {index} is not a JSON object: {other}"),
            source: None,
        }),
    }
}

fn parse_error(what: &str, e: serde_json::Error) -> EcholaliaError {
    EcholaliaError::Documents {
        message: format!("failed to parse {what}: {e}"),
        source: Some(Box::new(e)),
    }
}
