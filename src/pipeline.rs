// src/pipeline.rs
//! End-to-end signal loading
//!
//! normalize → resolve → assemble → build trials → attach name lists → reorder

use crate::config::RawSignalOptions;
use crate::converter::{
    preferred_field_order, BuildOptions, CanonicalFieldOrder, FieldOrdering, TrialTableBuilder,
};
use crate::dataset::{NameLists, TrialDataset};
use crate::descriptor::{assemble, SignalDescriptor};
use crate::error::{ConverterStage, SignalError, SignalResult};
use crate::request::SignalRequest;
use crate::resolver::{resolve_categories, resolve_events, ResolvedCategory, ResolvedEvent};
use crate::validation::normalize;

/// Everything derived from a request before the converter runs
#[derive(Debug, Clone, PartialEq)]
pub struct LoadPlan {
    /// Normalized options
    pub request: SignalRequest,
    /// Continuous tokens with their labels, in request order
    pub categories: Vec<ResolvedCategory>,
    /// Event tokens with their output names
    pub events: Vec<ResolvedEvent>,
    /// Spike descriptors followed by the combined descriptor
    pub descriptors: Vec<SignalDescriptor>,
    /// Lists to attach once the dataset is built
    pub name_lists: NameLists,
}

impl LoadPlan {
    /// Validate options and assemble descriptors; no extraction happens here
    pub fn prepare(raw: &RawSignalOptions) -> SignalResult<Self> {
        let request = normalize(raw)?;
        Self::from_request(request)
    }

    /// Resolve and assemble an already normalized request
    pub fn from_request(request: SignalRequest) -> SignalResult<Self> {
        let categories = resolve_categories(&request.continuous_names, request.unresolved_policy)?;
        let events = resolve_events(&request.event_names, request.unresolved_policy)?;
        let descriptors = assemble(&request, &categories, &events);
        let name_lists = NameLists::from_categories(&categories);

        Ok(Self {
            request,
            categories,
            events,
            descriptors,
            name_lists,
        })
    }

    /// Options handed to the trial-table builder
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::from_request(&self.request)
    }

    /// The combined continuous/EMG/event descriptor (always last)
    pub fn combined(&self) -> Option<&SignalDescriptor> {
        self.descriptors.last().filter(|d| !d.is_spikes())
    }
}

/// Signal loader bound to a trial-table builder and a field ordering
pub struct SignalLoader<B, O = CanonicalFieldOrder> {
    builder: B,
    ordering: O,
}

impl<B> SignalLoader<B> {
    /// Loader using [`CanonicalFieldOrder`]
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            ordering: CanonicalFieldOrder,
        }
    }
}

impl<B, O> SignalLoader<B, O> {
    /// Replace the field ordering
    pub fn with_ordering<P>(self, ordering: P) -> SignalLoader<B, P> {
        SignalLoader {
            builder: self.builder,
            ordering,
        }
    }

    /// Load a trial dataset from a session
    pub fn load<S>(&self, session: &S, raw: &RawSignalOptions) -> SignalResult<TrialDataset>
    where
        S: ?Sized,
        B: TrialTableBuilder<S>,
        O: FieldOrdering,
    {
        let plan = LoadPlan::prepare(raw)?;
        self.load_plan(session, &plan)
    }

    /// Run the converter for an already prepared plan
    pub fn load_plan<S>(&self, session: &S, plan: &LoadPlan) -> SignalResult<TrialDataset>
    where
        S: ?Sized,
        B: TrialTableBuilder<S>,
        O: FieldOrdering,
    {
        let options = plan.build_options();
        tracing::info!(
            descriptors = plan.descriptors.len(),
            arrays = plan.request.array_names.len(),
            bin_size = options.bin_size,
            "building trial table"
        );

        let mut dataset = self
            .builder
            .build_trials(session, &plan.descriptors, &options)
            .map_err(|e| SignalError::converter(ConverterStage::BuildTrials, e))?;

        dataset.metadata.bin_size = plan.request.bin_size;
        dataset.merge_extra_meta(&plan.request.extra_meta);
        dataset.attach_name_lists(&plan.name_lists);

        let preferred = preferred_field_order(&plan.request, &plan.descriptors);
        self.ordering
            .reorder(dataset, &preferred)
            .map_err(|e| SignalError::converter(ConverterStage::ReorderFields, e))
    }
}

/// Load with the canonical field ordering
pub fn load_trial_data<S, B>(session: &S, raw: &RawSignalOptions, builder: &B) -> SignalResult<TrialDataset>
where
    S: ?Sized,
    B: TrialTableBuilder<S>,
{
    SignalLoader::new(builder).load(session, raw)
}
