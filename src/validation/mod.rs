// src/validation/mod.rs
//! Option normalization
//!
//! Turns [`RawSignalOptions`] into a [`SignalRequest`]. Each field is checked
//! on its own, then cross-field arity is enforced. All failures surface here,
//! before any extraction work begins.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::config::constants::{binning, fields, naming};
use crate::config::{RawSignalOptions, UnresolvedPolicy};
use crate::error::{SignalError, SignalResult};
use crate::request::SignalRequest;
use crate::resolver::{Category, EventKind};

/// Validate and canonicalize caller options
pub fn normalize(raw: &RawSignalOptions) -> SignalResult<SignalRequest> {
    let array_names = normalize_array_names(raw.array_names.as_ref())?;
    let source_array_names =
        normalize_source_arrays(raw.source_array_names.as_ref(), array_names.len())?;

    let continuous_names = optional_string_list(raw.continuous_names.as_ref(), fields::CONTINUOUS_NAMES)?
        .unwrap_or_default();
    let event_names = optional_string_list(raw.event_names.as_ref(), fields::EVENT_NAMES)?
        .unwrap_or_else(default_event_names);
    let trial_meta_fields = optional_string_list(raw.trial_meta_fields.as_ref(), fields::TRIAL_META_FIELDS)?
        .unwrap_or_default();

    let extract_emg = normalize_flag(raw.extract_emg.as_ref(), fields::EXTRACT_EMG)?;
    let bin_size = normalize_bin_size(raw.bin_size.as_ref())?;
    let extra_meta = normalize_extra_meta(raw.extra_meta.as_ref())?;

    if raw.unresolved_policy == UnresolvedPolicy::Error {
        check_tokens::<Category>(&continuous_names, fields::CONTINUOUS_NAMES)?;
        check_tokens::<EventKind>(&event_names, fields::EVENT_NAMES)?;
    }

    Ok(SignalRequest {
        array_names,
        source_array_names,
        continuous_names,
        extract_emg,
        event_names,
        bin_size,
        trial_meta_fields,
        extra_meta,
        unresolved_policy: raw.unresolved_policy,
    })
}

fn normalize_array_names(value: Option<&Value>) -> SignalResult<Vec<String>> {
    let field = fields::ARRAY_NAMES;
    let names = match value {
        None | Some(Value::Null) => return Err(SignalError::invalid_argument(field, "at least one array name is required")),
        Some(Value::String(name)) => vec![name.clone()],
        Some(Value::Array(items)) => {
            match items.first() {
                None => return Err(SignalError::invalid_argument(field, "at least one array name is required")),
                Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(SignalError::invalid_argument(
                        field,
                        format!("first entry must be a name, got {}", type_name(other)),
                    ))
                }
            }
            string_items(items, field)?
        }
        Some(other) => {
            return Err(SignalError::invalid_argument(
                field,
                format!("expected a name or a list of names, got {}", type_name(other)),
            ))
        }
    };

    let mut seen = HashSet::new();
    for name in &names {
        if name.is_empty() {
            return Err(SignalError::invalid_argument(field, "array names must be non-empty"));
        }
        if !seen.insert(name.as_str()) {
            return Err(SignalError::invalid_argument(field, format!("duplicate array name '{}'", name)));
        }
    }

    Ok(names)
}

fn normalize_source_arrays(value: Option<&Value>, expected: usize) -> SignalResult<Vec<String>> {
    let field = fields::SOURCE_ARRAY_NAMES;
    let sources = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(name)) => vec![name.clone()],
        Some(Value::Array(items)) => string_items(items, field)?,
        Some(other) => {
            return Err(SignalError::invalid_argument(
                field,
                format!("expected a name or a list of names, got {}", type_name(other)),
            ))
        }
    };

    if sources.is_empty() {
        tracing::warn!(
            arrays = expected,
            "no source array names given, extraction will use the default array mapping"
        );
        return Ok(vec![String::new(); expected]);
    }

    if sources.len() != expected {
        return Err(SignalError::ArityMismatch {
            field: field.to_string(),
            expected,
            actual: sources.len(),
        });
    }

    Ok(sources)
}

fn optional_string_list(value: Option<&Value>, field: &str) -> SignalResult<Option<Vec<String>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let names = string_items(items, field)?;
            if let Some(i) = names.iter().position(|name| name.trim().is_empty()) {
                return Err(SignalError::invalid_argument(field, format!("entry {} is empty", i)));
            }
            Ok(Some(names))
        }
        Some(other) => Err(SignalError::invalid_argument(
            field,
            format!("expected a list of names, got {}", type_name(other)),
        )),
    }
}

fn normalize_flag(value: Option<&Value>, field: &str) -> SignalResult<bool> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(SignalError::invalid_argument(
            field,
            format!("expected a boolean, got {}", type_name(other)),
        )),
    }
}

fn normalize_bin_size(value: Option<&Value>) -> SignalResult<f64> {
    let field = fields::BIN_SIZE;
    let bin_size = match value {
        None | Some(Value::Null) => return Ok(binning::DEFAULT_BIN_SIZE_S),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| SignalError::invalid_argument(field, "not representable as a float"))?,
        Some(other) => {
            return Err(SignalError::invalid_argument(
                field,
                format!("expected a number, got {}", type_name(other)),
            ))
        }
    };

    if !bin_size.is_finite() || bin_size <= 0.0 {
        return Err(SignalError::invalid_argument(
            field,
            format!("must be a positive number of seconds, got {}", bin_size),
        ));
    }

    Ok(bin_size)
}

fn normalize_extra_meta(value: Option<&Value>) -> SignalResult<Map<String, Value>> {
    match value {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(Value::Array(items)) if items.is_empty() => Ok(Map::new()),
        Some(Value::String(text)) if text.is_empty() => Ok(Map::new()),
        Some(other) => Err(SignalError::invalid_argument(
            fields::EXTRA_META,
            format!("expected a mapping, got {}", type_name(other)),
        )),
    }
}

fn check_tokens<T: std::str::FromStr>(tokens: &[String], field: &str) -> SignalResult<()> {
    match tokens.iter().find(|token| token.parse::<T>().is_err()) {
        Some(token) => Err(SignalError::UnresolvedCategory {
            field: field.to_string(),
            token: token.clone(),
        }),
        None => Ok(()),
    }
}

fn string_items(items: &[Value], field: &str) -> SignalResult<Vec<String>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(name) => Ok(name.clone()),
            other => Err(SignalError::invalid_argument(
                field,
                format!("entry {} must be a name, got {}", i, type_name(other)),
            )),
        })
        .collect()
}

fn default_event_names() -> Vec<String> {
    naming::DEFAULT_EVENT_NAMES.iter().map(|name| name.to_string()).collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
