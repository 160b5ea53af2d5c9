// src/dataset.rs
//! Trial-indexed dataset returned by the converter
//!
//! The converter produces one [`TrialRecord`] per behavioral trial. Dataset
//! level annotations (bin size, caller metadata and the derived channel name
//! lists) live in [`DatasetMetadata`].

use ndarray::Array2;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog;
use crate::resolver::{Category, CategoryFamily, ResolvedCategory};

/// Value stored in one trial field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Numeric per-trial value
    Scalar(f64),
    /// Textual per-trial value
    Text(String),
    /// Binned samples (rows are bins, columns are labelled channels)
    Signal {
        /// Bins by channels
        samples: Array2<f64>,
        /// One label per column
        labels: Vec<String>,
    },
    /// Binned spike counts (rows are bins, columns are units)
    Spikes(Array2<f64>),
}

/// One trial: named fields in display order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialRecord {
    fields: Vec<(String, FieldValue)>,
}

impl TrialRecord {
    /// Empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any existing value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Value of a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Field names in display order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the record into its ordered fields
    pub fn into_fields(self) -> Vec<(String, FieldValue)> {
        self.fields
    }

    /// Build a record from ordered fields; later duplicates replace earlier ones
    pub fn from_fields(fields: Vec<(String, FieldValue)>) -> Self {
        let mut record = Self::new();
        for (name, value) in fields {
            record.insert(name, value);
        }
        record
    }
}

/// Channel name lists derived from the requested categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameLists {
    /// Sorted marker labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_names: Option<Vec<String>>,
    /// Arm model joint names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joint_names: Option<Vec<String>>,
    /// Arm model muscle names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_names: Option<Vec<String>>,
    /// Motor control channel names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motor_control_names: Option<Vec<String>>,
}

impl NameLists {
    /// Name lists implied by a set of resolved categories
    pub fn from_categories(resolved: &[ResolvedCategory]) -> Self {
        let families: Vec<CategoryFamily> = resolved
            .iter()
            .filter_map(|r| r.category.map(Category::family))
            .collect();
        let has = |family: CategoryFamily| families.contains(&family);

        Self {
            marker_names: has(CategoryFamily::Markers).then(catalog::marker_labels),
            joint_names: has(CategoryFamily::Joints).then(catalog::joint_names),
            muscle_names: has(CategoryFamily::Muscles).then(catalog::muscle_names),
            motor_control_names: has(CategoryFamily::MotorControl).then(catalog::motor_control_names),
        }
    }

    /// Whether no list is present
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Dataset level annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetMetadata {
    /// Bin width in seconds
    pub bin_size: f64,
    /// Channel name lists, serialized as top-level keys
    #[serde(flatten)]
    pub name_lists: NameLists,
    /// Caller metadata
    pub extra: Map<String, Value>,
}

/// Converter output: one record per trial
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialDataset {
    /// One record per trial
    pub trials: Vec<TrialRecord>,
    /// Dataset level annotations
    pub metadata: DatasetMetadata,
}

impl TrialDataset {
    /// Dataset with empty metadata apart from the bin size
    pub fn new(trials: Vec<TrialRecord>, bin_size: f64) -> Self {
        Self {
            trials,
            metadata: DatasetMetadata {
                bin_size,
                ..Default::default()
            },
        }
    }

    /// Number of trials
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Whether there are no trials
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Attached marker labels, if markers were requested
    pub fn marker_names(&self) -> Option<&[String]> {
        self.metadata.name_lists.marker_names.as_deref()
    }

    /// Attached joint names, if a joint category was requested
    pub fn joint_names(&self) -> Option<&[String]> {
        self.metadata.name_lists.joint_names.as_deref()
    }

    /// Attached muscle names, if a muscle category was requested
    pub fn muscle_names(&self) -> Option<&[String]> {
        self.metadata.name_lists.muscle_names.as_deref()
    }

    /// Attached motor control names, if requested
    pub fn motor_control_names(&self) -> Option<&[String]> {
        self.metadata.name_lists.motor_control_names.as_deref()
    }

    /// Attach derived name lists; lists not implied by `names` are left untouched
    pub fn attach_name_lists(&mut self, names: &NameLists) {
        let target = &mut self.metadata.name_lists;
        if let Some(list) = &names.marker_names {
            target.marker_names = Some(list.clone());
        }
        if let Some(list) = &names.joint_names {
            target.joint_names = Some(list.clone());
        }
        if let Some(list) = &names.muscle_names {
            target.muscle_names = Some(list.clone());
        }
        if let Some(list) = &names.motor_control_names {
            target.motor_control_names = Some(list.clone());
        }
    }

    /// Merge caller metadata; existing keys are overwritten
    pub fn merge_extra_meta(&mut self, extra: &Map<String, Value>) {
        for (key, value) in extra {
            self.metadata.extra.insert(key.clone(), value.clone());
        }
    }
}
