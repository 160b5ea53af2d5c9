// src/config/mod.rs
//! Caller-facing option types and option file loading
//!
//! [`RawSignalOptions`] mirrors what a caller can write in an option file or
//! build in code. Its fields are dynamically typed so the normalizer in
//! [`crate::validation`] can accept the overloaded shapes (a single name or a
//! list of names) and reject everything else with a precise error.

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::{ConfigError, RequestLoader};

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unvalidated signal loading options
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RawSignalOptions {
    /// Array identifiers: a name or a list of names
    #[serde(default)]
    pub array_names: Option<Value>,

    /// Raw storage identifier per array: a name or a list of names
    #[serde(default)]
    pub source_array_names: Option<Value>,

    /// Continuous-signal category tokens
    #[serde(default)]
    pub continuous_names: Option<Value>,

    /// Whether to add the EMG channels
    #[serde(default)]
    pub extract_emg: Option<Value>,

    /// Trial event tokens; defaults to start and end
    #[serde(default)]
    pub event_names: Option<Value>,

    /// Bin width in seconds
    #[serde(default)]
    pub bin_size: Option<Value>,

    /// Per-trial fields copied from the trial table
    #[serde(default)]
    pub trial_meta_fields: Option<Value>,

    /// Mapping merged into the dataset metadata
    #[serde(default)]
    pub extra_meta: Option<Value>,

    /// Handling of unknown category and event tokens
    #[serde(default)]
    pub unresolved_policy: UnresolvedPolicy,
}

/// What to do with a category or event token that has no known expansion
///
/// Parsed case-insensitively, so `"Error"` and `"error"` are the same policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UnresolvedPolicy {
    /// Keep the token with an empty label set, silently
    Ignore,
    /// Keep the token with an empty label set and log a warning
    #[default]
    Warn,
    /// Reject the request with `UnresolvedCategory`
    Error,
}

/// Policy name that is not ignore, warn or error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unresolved policy '{0}', expected ignore, warn or error")]
pub struct UnknownPolicy(pub String);

impl FromStr for UnresolvedPolicy {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "ignore" => Ok(UnresolvedPolicy::Ignore),
            "warn" => Ok(UnresolvedPolicy::Warn),
            "error" => Ok(UnresolvedPolicy::Error),
            _ => Err(UnknownPolicy(value.to_string())),
        }
    }
}

impl TryFrom<String> for UnresolvedPolicy {
    type Error = UnknownPolicy;

    fn try_from(value: String) -> Result<Self, <Self as TryFrom<String>>::Error> {
        value.parse()
    }
}

impl RawSignalOptions {
    /// Options for the given arrays, everything else left at defaults
    pub fn for_arrays<I, S>(arrays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            array_names: Some(string_list(arrays)),
            ..Default::default()
        }
    }

    /// Set the raw storage identifier per array
    pub fn with_source_arrays<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_array_names = Some(string_list(sources));
        self
    }

    /// Set the continuous-signal category tokens
    pub fn with_continuous<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.continuous_names = Some(string_list(names));
        self
    }

    /// Set the trial event tokens
    pub fn with_events<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event_names = Some(string_list(names));
        self
    }

    /// Set the per-trial metadata fields
    pub fn with_trial_meta<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trial_meta_fields = Some(string_list(names));
        self
    }

    /// Enable or disable EMG extraction
    pub fn with_emg(mut self, extract: bool) -> Self {
        self.extract_emg = Some(Value::Bool(extract));
        self
    }

    /// Set the bin width in seconds
    pub fn with_bin_size(mut self, bin_size: f64) -> Self {
        self.bin_size = Some(serde_json::json!(bin_size));
        self
    }

    /// Set the dataset level caller metadata
    pub fn with_extra_meta(mut self, meta: serde_json::Map<String, Value>) -> Self {
        self.extra_meta = Some(Value::Object(meta));
        self
    }

    /// Set the unknown-token policy
    pub fn with_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved_policy = policy;
        self
    }
}

fn string_list<I, S>(items: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(items.into_iter().map(|s| Value::String(s.into())).collect())
}
