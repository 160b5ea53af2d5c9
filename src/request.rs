// src/request.rs
//! Validated signal request

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{RawSignalOptions, UnresolvedPolicy};
use crate::error::{SignalError, SignalResult};

/// Canonical form of the caller's options, produced by [`crate::validation::normalize`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRequest {
    /// Distinct, non-empty array identifiers
    pub array_names: Vec<String>,
    /// Raw storage identifier per array; empty means "same as the array name"
    pub source_array_names: Vec<String>,
    /// Category tokens as written by the caller
    pub continuous_names: Vec<String>,
    /// Add the EMG channels to the combined descriptor
    pub extract_emg: bool,
    /// Event tokens, defaulted to start and end
    pub event_names: Vec<String>,
    /// Bin width in seconds
    pub bin_size: f64,
    /// Per-trial fields requested from the trial table
    pub trial_meta_fields: Vec<String>,
    /// Caller metadata merged into the dataset
    pub extra_meta: Map<String, Value>,
    /// Handling of unknown category and event tokens
    pub unresolved_policy: UnresolvedPolicy,
}

impl SignalRequest {
    /// `(array name, source id)` pairs in request order
    pub fn arrays(&self) -> impl Iterator<Item = (&str, &str)> {
        self.array_names
            .iter()
            .map(String::as_str)
            .zip(self.source_array_names.iter().map(String::as_str))
    }
}

impl TryFrom<&RawSignalOptions> for SignalRequest {
    type Error = SignalError;

    fn try_from(raw: &RawSignalOptions) -> SignalResult<Self> {
        crate::validation::normalize(raw)
    }
}

impl TryFrom<RawSignalOptions> for SignalRequest {
    type Error = SignalError;

    fn try_from(raw: RawSignalOptions) -> SignalResult<Self> {
        crate::validation::normalize(&raw)
    }
}
