// src/config/constants.rs
//! System-wide configuration constants

/// Binning constants
pub mod binning {
    /// Default bin width in seconds
    pub const DEFAULT_BIN_SIZE_S: f64 = 0.01;
}

/// Naming conventions shared by descriptors and the converter
pub mod naming {
    /// Appended to an array name to form its spike output field
    pub const SPIKES_SUFFIX: &str = "_spikes";
    /// Prepended to each EMG channel to form its output field
    pub const EMG_PREFIX: &str = "EMG_";
    /// Ending shared by event output names (`startTime`)
    pub const EVENT_SUFFIX: &str = "Time";

    /// Events requested when the caller gives none
    pub const DEFAULT_EVENT_NAMES: [&str; 2] = ["start", "end"];
}

/// Option field names, used in error reports and file keys
pub mod fields {
    /// Array identifiers
    pub const ARRAY_NAMES: &str = "array_names";
    /// Raw storage identifier per array
    pub const SOURCE_ARRAY_NAMES: &str = "source_array_names";
    /// Continuous-signal category tokens
    pub const CONTINUOUS_NAMES: &str = "continuous_names";
    /// EMG extraction flag
    pub const EXTRACT_EMG: &str = "extract_emg";
    /// Trial event tokens
    pub const EVENT_NAMES: &str = "event_names";
    /// Bin width in seconds
    pub const BIN_SIZE: &str = "bin_size";
    /// Per-trial metadata fields
    pub const TRIAL_META_FIELDS: &str = "trial_meta_fields";
    /// Dataset level caller metadata
    pub const EXTRA_META: &str = "extra_meta";
    /// Handling of unknown tokens
    pub const UNRESOLVED_POLICY: &str = "unresolved_policy";

    /// Fields holding a name or a list of names
    pub const NAME_FIELDS: [&str; 2] = [ARRAY_NAMES, SOURCE_ARRAY_NAMES];
    /// Fields that only accept a list of names
    pub const LIST_FIELDS: [&str; 3] = [CONTINUOUS_NAMES, EVENT_NAMES, TRIAL_META_FIELDS];
}

/// Option file locations
pub mod paths {
    /// System-wide option file, read first
    pub const SYSTEM_CONFIG_PATH: &str = "/etc/trial-signals/signals.toml";
    /// Option file in the working directory, overrides the system file
    pub const LOCAL_CONFIG_FILE: &str = "signals.toml";
    /// Prefix of environment variables that override file values
    pub const ENV_PREFIX: &str = "TRIALSIG_";
    /// Separator for list values given through the environment
    pub const ENV_LIST_SEPARATOR: char = ',';
}
