//! Trial-Signals: signal specification and label resolution for trial datasets
//!
//! This library turns a high-level description of which signals to load
//! (array names, continuous-signal categories, EMG and event selections) into
//! an ordered list of extraction descriptors for an external trial-structuring
//! engine, then annotates the engine's output with channel name lists.
//!
//! - Static channel name tables (EMG, joints, muscles, motion markers)
//! - Category resolution from symbolic tokens to ordered channel labels
//! - Option normalization with fail-fast validation
//! - Descriptor assembly and post-load metadata attachment
//!
//! # Quick Start
//!
//! ```rust
//! use trial_signals::{LoadPlan, RawSignalOptions};
//!
//! fn main() -> Result<(), trial_signals::SignalError> {
//!     let options = RawSignalOptions::for_arrays(["S1"])
//!         .with_continuous(["pos", "vel"]);
//!
//!     let plan = LoadPlan::prepare(&options)?;
//!     let combined = plan.combined().expect("combined descriptor");
//!
//!     assert_eq!(plan.descriptors.len(), 2);
//!     assert_eq!(combined.flat_labels(), ["x", "y", "vx", "vy", "startTime", "endTime"]);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod catalog;
pub mod config;
pub mod converter;
pub mod dataset;
pub mod descriptor;
pub mod error;
pub mod pipeline;
pub mod request;
pub mod resolver;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{RawSignalOptions, RequestLoader, UnresolvedPolicy};
pub use converter::{
    BuildOptions, CanonicalFieldOrder, ContinuousExtractor, FieldOrdering, SpikeExtractor, TrialTableBuilder,
};
pub use dataset::{FieldValue, NameLists, TrialDataset, TrialRecord};
pub use descriptor::{assemble, SignalDescriptor, SignalKind};
pub use error::{ErrorKind, SignalError, SignalResult};
pub use pipeline::{load_trial_data, LoadPlan, SignalLoader};
pub use request::SignalRequest;
pub use resolver::{resolve, Category, EventKind};
pub use validation::normalize;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Signal specification and label resolution for trial datasets".to_string(),
        categories: Category::ALL.iter().map(|c| c.name().to_string()).collect(),
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// Supported continuous-signal category tokens
    pub categories: Vec<String>,
}
