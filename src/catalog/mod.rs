// src/catalog/mod.rs
//! Static channel name tables
//!
//! The tables are immutable constant data. Every lookup returns a fresh
//! `Vec`, so callers may reorder or extend their copy freely.

pub mod markers;

pub use markers::{marker_labels, raw_marker_labels, MARKER_BASE_NAMES};

/// EMG channels in canonical channel order
pub const EMG_NAMES: [&str; 22] = [
    "DeltAnt", "DeltMid", "DeltPos", "PecSup", "PecInf", "Lat", "TerMaj", "InfSpin",
    "Trap", "BiLat", "BiMed", "Brach", "Brad", "TriLat", "TriMed", "ECRl",
    "ECRb", "ECU", "EDC", "FCR", "FCU", "FDS",
];

/// Arm model joints
pub const JOINT_NAMES: [&str; 7] = [
    "shoulder_adduction",
    "shoulder_rotation",
    "shoulder_flexion",
    "elbow_flexion",
    "radial_pronation",
    "wrist_flexion",
    "wrist_abduction",
];

/// Arm model muscles
pub const MUSCLE_NAMES: [&str; 39] = [
    "abd_poll_longus",
    "anconeus",
    "bicep_lh",
    "bicep_sh",
    "brachialis",
    "brachioradialis",
    "coracobrachialis",
    "deltoid_ant",
    "deltoid_med",
    "deltoid_pos",
    "dorsoepitrochlearis",
    "ext_carpi_rad_longus",
    "ext_carp_rad_brevis",
    "ext_carpi_ulnaris",
    "ext_digitorum",
    "ext_digiti",
    "ext_indicis",
    "flex_carpi_radialis",
    "flex_carpi_ulnaris",
    "flex_digit_profundus",
    "flex_digit_superficialis",
    "flex_poll_longus",
    "infraspinatus",
    "lat_dorsi_sup",
    "lat_dorsi_cen",
    "lat_dorsi_inf",
    "palmaris_longus",
    "pectoralis_sup",
    "pectoralis_inf",
    "pronator_quad",
    "pronator_teres",
    "subscapularis",
    "supinator",
    "supraspinatus",
    "teres_major",
    "teres_minor",
    "tricep_lat",
    "tricep_lng",
    "tricep_sho",
];

/// Motor control channels (shoulder, elbow)
pub const MOTOR_CONTROL_NAMES: [&str; 2] = ["MotorControlSho", "MotorControlElb"];

/// Fresh copy of [`EMG_NAMES`]
pub fn emg_names() -> Vec<String> {
    to_owned(&EMG_NAMES)
}

/// Fresh copy of [`JOINT_NAMES`]
pub fn joint_names() -> Vec<String> {
    to_owned(&JOINT_NAMES)
}

/// Fresh copy of [`MUSCLE_NAMES`]
pub fn muscle_names() -> Vec<String> {
    to_owned(&MUSCLE_NAMES)
}

/// Fresh copy of [`MOTOR_CONTROL_NAMES`]
pub fn motor_control_names() -> Vec<String> {
    to_owned(&MOTOR_CONTROL_NAMES)
}

/// Every name in `names` followed by `suffix`, in table order
pub fn suffixed(names: &[&str], suffix: &str) -> Vec<String> {
    names.iter().map(|name| format!("{}{}", name, suffix)).collect()
}

/// Every name in `names` preceded by `prefix`, in table order
pub fn prefixed(names: &[&str], prefix: &str) -> Vec<String> {
    names.iter().map(|name| format!("{}{}", prefix, name)).collect()
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_sizes() {
        assert_eq!(emg_names().len(), 22);
        assert_eq!(joint_names().len(), 7);
        assert_eq!(muscle_names().len(), 39);
        assert_eq!(motor_control_names(), vec!["MotorControlSho", "MotorControlElb"]);
    }

    #[test]
    fn test_tables_have_unique_names() {
        for table in [&EMG_NAMES[..], &JOINT_NAMES[..], &MUSCLE_NAMES[..]] {
            let unique: HashSet<_> = table.iter().collect();
            assert_eq!(unique.len(), table.len());
        }
    }

    #[test]
    fn test_lookup_returns_fresh_copy() {
        let mut names = emg_names();
        names.reverse();
        names.push("extra".to_string());

        assert_eq!(emg_names()[0], "DeltAnt");
        assert_eq!(emg_names().len(), 22);
    }

    #[test]
    fn test_suffix_and_prefix() {
        assert_eq!(suffixed(&JOINT_NAMES, "_ang")[3], "elbow_flexion_ang");
        assert_eq!(prefixed(&EMG_NAMES, "EMG_")[0], "EMG_DeltAnt");
    }
}
