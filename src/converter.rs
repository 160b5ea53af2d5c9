// src/converter.rs
//! Boundary contracts for the external trial-structuring engine
//!
//! Binning, alignment and trial segmentation happen outside this crate. The
//! traits here describe what the pipeline expects from those collaborators:
//! per-descriptor extraction routines, the trial-table builder that consumes
//! the descriptor list, and the final field-ordering pass.

use std::convert::Infallible;
use std::error::Error;

use ndarray::Array2;
use serde_json::{Map, Value};

use crate::dataset::{TrialDataset, TrialRecord};
use crate::descriptor::{SignalDescriptor, SignalKind};
use crate::error::BoxError;
use crate::request::SignalRequest;

/// Spike times (seconds) for every unit found in one array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpikeTrains {
    /// Unit identifiers
    pub unit_ids: Vec<String>,
    /// Spike times per unit, parallel to `unit_ids`
    pub spike_times: Vec<Vec<f64>>,
}

/// Continuous samples plus the per-trial metadata table
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousData {
    /// Sample timestamps in seconds, one per row of `samples`
    pub timestamps: Vec<f64>,
    /// Rows are samples, columns are channels
    pub samples: Array2<f64>,
    /// Column names of `samples`
    pub columns: Vec<String>,
    /// One record per trial holding the requested meta fields
    pub trial_table: Vec<TrialRecord>,
}

/// Reads the spike trains of one array from a session
pub trait SpikeExtractor<S: ?Sized> {
    /// Failure reported by the implementation
    type Error: Error + Send + Sync + 'static;

    /// Spike trains of the array stored under `source_id`
    fn extract_spikes(&self, session: &S, source_id: &str) -> Result<SpikeTrains, Self::Error>;
}

/// Reads continuous signals and the trial table from a session
pub trait ContinuousExtractor<S: ?Sized> {
    /// Failure reported by the implementation
    type Error: Error + Send + Sync + 'static;

    /// Continuous samples plus one trial-table record per trial
    fn extract_continuous(&self, session: &S, trial_meta_fields: &[String]) -> Result<ContinuousData, Self::Error>;
}

/// Options passed alongside the descriptor list
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Common time base in seconds
    pub bin_size: f64,
    /// Per-trial fields to copy from the trial table
    pub trial_meta_fields: Vec<String>,
    /// Caller metadata
    pub meta: Map<String, Value>,
}

impl BuildOptions {
    /// Options derived from a normalized request
    pub fn from_request(request: &SignalRequest) -> Self {
        Self {
            bin_size: request.bin_size,
            trial_meta_fields: request.trial_meta_fields.clone(),
            meta: request.extra_meta.clone(),
        }
    }
}

/// Builds the trial-indexed dataset from an ordered descriptor list
///
/// Implementations produce one record per trial with one field per output
/// name, sub-labelled with the descriptor's label groups, plus the requested
/// meta fields.
pub trait TrialTableBuilder<S: ?Sized> {
    /// Failure reported by the implementation
    type Error: Error + Send + Sync + 'static;

    /// One record per trial for the descriptors, in list order
    fn build_trials(
        &self,
        session: &S,
        descriptors: &[SignalDescriptor],
        options: &BuildOptions,
    ) -> Result<TrialDataset, Self::Error>;
}

impl<S: ?Sized, B: TrialTableBuilder<S>> TrialTableBuilder<S> for &B {
    type Error = B::Error;

    fn build_trials(
        &self,
        session: &S,
        descriptors: &[SignalDescriptor],
        options: &BuildOptions,
    ) -> Result<TrialDataset, Self::Error> {
        (**self).build_trials(session, descriptors, options)
    }
}

/// Puts dataset fields into display order
pub trait FieldOrdering {
    /// Failure reported by the implementation
    type Error: Error + Send + Sync + 'static;

    /// `preferred` lists field names in the order they should appear
    fn reorder(&self, dataset: TrialDataset, preferred: &[String]) -> Result<TrialDataset, Self::Error>;
}

/// Orders fields by their position in the preferred list; fields not listed
/// keep their relative order after the listed ones
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalFieldOrder;

impl FieldOrdering for CanonicalFieldOrder {
    type Error = Infallible;

    fn reorder(&self, mut dataset: TrialDataset, preferred: &[String]) -> Result<TrialDataset, Self::Error> {
        let rank = |name: &str| {
            preferred
                .iter()
                .position(|p| p == name)
                .unwrap_or(preferred.len())
        };

        dataset.trials = dataset
            .trials
            .into_iter()
            .map(|trial| {
                let mut fields = trial.into_fields();
                fields.sort_by_key(|(name, _)| rank(name.as_str()));
                TrialRecord::from_fields(fields)
            })
            .collect();

        Ok(dataset)
    }
}

/// Preferred display order: meta fields, spike fields, then combined outputs
pub fn preferred_field_order(request: &SignalRequest, descriptors: &[SignalDescriptor]) -> Vec<String> {
    let mut order = request.trial_meta_fields.clone();
    let (spikes, others): (Vec<_>, Vec<_>) = descriptors.iter().partition(|d| d.is_spikes());
    for descriptor in spikes.into_iter().chain(others) {
        order.extend(descriptor.output_names.iter().cloned());
    }
    order
}

/// Raw extraction result for one descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Spike trains for one array
    Spikes {
        /// Spike field name
        output_name: String,
        /// Extracted trains
        trains: SpikeTrains,
    },
    /// Continuous data for the combined descriptor
    Continuous(ContinuousData),
}

/// Run the extraction routine each descriptor calls for, in list order
///
/// Spike descriptors read `source_id`, or their array name when no source was
/// given. The combined descriptor triggers a single continuous extraction.
pub fn extract_descriptors<S, P, C>(
    session: &S,
    descriptors: &[SignalDescriptor],
    trial_meta_fields: &[String],
    spikes: &P,
    continuous: &C,
) -> Result<Vec<Extraction>, BoxError>
where
    S: ?Sized,
    P: SpikeExtractor<S>,
    C: ContinuousExtractor<S>,
{
    descriptors
        .iter()
        .map(|descriptor| -> Result<Extraction, BoxError> {
            match descriptor.kind {
                SignalKind::Spikes => {
                    let source = descriptor
                        .spike_source()
                        .ok_or("spike descriptor carries no array name")?;
                    let output_name = descriptor
                        .output_names
                        .first()
                        .cloned()
                        .ok_or("spike descriptor carries no output name")?;
                    let trains = spikes.extract_spikes(session, source)?;
                    Ok(Extraction::Spikes { output_name, trains })
                }
                _ => Ok(Extraction::Continuous(continuous.extract_continuous(session, trial_meta_fields)?)),
            }
        })
        .collect()
}
