// src/descriptor.rs
//! Signal descriptor assembly
//!
//! A request becomes one spike descriptor per array followed by exactly one
//! combined descriptor holding continuous signals, then EMG, then events.
//! The converter consumes the list positionally, so this ordering is part of
//! the contract.

use serde::Serialize;

use crate::catalog::{self, EMG_NAMES};
use crate::config::constants::naming;
use crate::request::SignalRequest;
use crate::resolver::{ResolvedCategory, ResolvedEvent};

/// Kind of signal an output slot carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Per-array spike trains
    Spikes,
    /// Continuous signal
    Generic,
    /// EMG channel
    Emg,
    /// Trial event timestamp
    Event,
}

/// One extraction unit handed to the converter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalDescriptor {
    /// Array a spike descriptor reads; `None` for the combined descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_name: Option<String>,
    /// Raw storage identifier; empty means the converter's default
    pub source_id: String,
    /// Spikes for per-array descriptors, generic for the combined one
    pub kind: SignalKind,
    /// Output field names in slot order
    pub output_names: Vec<String>,
    /// One label group per output name
    pub labels: Vec<Vec<String>>,
    /// One tag per output name; empty for spike descriptors
    pub category_tags: Vec<SignalKind>,
}

impl SignalDescriptor {
    /// Spike descriptor for one array
    pub fn spikes(array_name: &str, source_id: &str) -> Self {
        Self {
            array_name: Some(array_name.to_string()),
            source_id: source_id.to_string(),
            kind: SignalKind::Spikes,
            output_names: vec![format!("{}{}", array_name, naming::SPIKES_SUFFIX)],
            labels: Vec::new(),
            category_tags: Vec::new(),
        }
    }

    /// Source to read from, falling back to `default` when none was given
    pub fn effective_source<'a>(&'a self, default: &'a str) -> &'a str {
        if self.source_id.is_empty() {
            default
        } else {
            &self.source_id
        }
    }

    /// Storage identifier a spike descriptor reads: the source id, or the
    /// array name when no source was given
    pub fn spike_source(&self) -> Option<&str> {
        self.array_name.as_deref().map(|array| self.effective_source(array))
    }

    /// All labels concatenated in output order
    pub fn flat_labels(&self) -> Vec<String> {
        self.labels.iter().flatten().cloned().collect()
    }

    /// Output names tagged with `kind`, in order
    pub fn outputs_of(&self, kind: SignalKind) -> impl Iterator<Item = &str> {
        self.output_names
            .iter()
            .zip(&self.category_tags)
            .filter(move |(_, tag)| **tag == kind)
            .map(|(name, _)| name.as_str())
    }

    /// Whether this is a per-array spike descriptor
    pub fn is_spikes(&self) -> bool {
        self.kind == SignalKind::Spikes
    }
}

/// Builder for the combined continuous/EMG/event descriptor
#[derive(Debug, Default)]
struct CombinedBuilder {
    output_names: Vec<String>,
    labels: Vec<Vec<String>>,
    category_tags: Vec<SignalKind>,
}

impl CombinedBuilder {
    fn push(&mut self, name: String, labels: Vec<String>, tag: SignalKind) {
        self.output_names.push(name);
        self.labels.push(labels);
        self.category_tags.push(tag);
    }

    fn build(self) -> SignalDescriptor {
        SignalDescriptor {
            array_name: None,
            source_id: String::new(),
            kind: SignalKind::Generic,
            output_names: self.output_names,
            labels: self.labels,
            category_tags: self.category_tags,
        }
    }
}

/// Build the ordered descriptor list for a validated request
pub fn assemble(
    request: &SignalRequest,
    categories: &[ResolvedCategory],
    events: &[ResolvedEvent],
) -> Vec<SignalDescriptor> {
    let mut descriptors: Vec<SignalDescriptor> = request
        .arrays()
        .map(|(array, source)| SignalDescriptor::spikes(array, source))
        .collect();

    let mut combined = CombinedBuilder::default();

    for resolved in categories {
        combined.push(resolved.token.clone(), resolved.labels.clone(), SignalKind::Generic);
    }

    if request.extract_emg {
        for name in catalog::prefixed(&EMG_NAMES, naming::EMG_PREFIX) {
            combined.push(name.clone(), vec![name], SignalKind::Emg);
        }
    }

    for event in events {
        combined.push(event.output_name.clone(), vec![event.output_name.clone()], SignalKind::Event);
    }

    descriptors.push(combined.build());
    descriptors
}
