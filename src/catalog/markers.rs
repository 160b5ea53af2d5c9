// src/catalog/markers.rs
//! Motion tracking marker labels
//!
//! Each base point is tracked on three axes. The exposed label sequence is the
//! plain string sort of all `<base>_<axis>` labels. The raw order used inside
//! session files interleaves axes as y, z, x per base point and is only
//! needed by converters reading that format.

/// Marker base points in tracking order
pub const MARKER_BASE_NAMES: [&str; 10] = [
    "Pronation_pt1",
    "Pronation_pt2",
    "Wrist_radius",
    "Wrist_ulna",
    "Hand_distal",
    "Hand_proximal",
    "Elbow_lateral",
    "Elbow_medial",
    "Shoulder_JC",
    "Shoulder_acromion",
];

const EXPOSED_AXES: [&str; 3] = ["x", "y", "z"];
const RAW_AXES: [&str; 3] = ["y", "z", "x"];

/// Sorted marker labels (30 entries)
pub fn marker_labels() -> Vec<String> {
    let mut labels = axis_labels(&EXPOSED_AXES);
    labels.sort();
    labels
}

/// Marker labels in the raw session-file column order
pub fn raw_marker_labels() -> Vec<String> {
    axis_labels(&RAW_AXES)
}

fn axis_labels(axes: &[&str]) -> Vec<String> {
    MARKER_BASE_NAMES
        .iter()
        .flat_map(|base| axes.iter().map(move |axis| format!("{}_{}", base, axis)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_labels_sorted() {
        let labels = marker_labels();
        assert_eq!(labels.len(), 30);
        assert!(labels.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(labels[0], "Elbow_lateral_x");
        assert_eq!(labels[29], "Wrist_ulna_z");
    }

    #[test]
    fn test_marker_labels_axis_suffix() {
        for label in marker_labels() {
            let (base, axis) = label.rsplit_once('_').unwrap();
            assert!(MARKER_BASE_NAMES.contains(&base));
            assert!(["x", "y", "z"].contains(&axis));
        }
    }

    #[test]
    fn test_raw_order_interleaves_yzx() {
        let raw = raw_marker_labels();
        assert_eq!(raw.len(), 30);
        assert_eq!(&raw[..3], &["Pronation_pt1_y", "Pronation_pt1_z", "Pronation_pt1_x"]);
    }

    #[test]
    fn test_raw_and_exposed_hold_same_labels() {
        let mut raw = raw_marker_labels();
        raw.sort();
        assert_eq!(raw, marker_labels());
    }
}
