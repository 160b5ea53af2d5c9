// tests/descriptor_properties.rs
//! Property tests for descriptor assembly invariants

use proptest::prelude::*;
use trial_signals::catalog::EMG_NAMES;
use trial_signals::{Category, ErrorKind, LoadPlan, RawSignalOptions, SignalKind};

fn array_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Z][A-Za-z0-9]{0,6}", 1..6).prop_map(|set| set.into_iter().collect())
}

fn category_tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(Category::ALL.to_vec()), 0..6)
        .prop_map(|categories| categories.into_iter().map(|c| c.name().to_string()).collect())
}

proptest! {
    #[test]
    fn descriptor_count_is_arrays_plus_one(arrays in array_names(), tokens in category_tokens(), emg in any::<bool>()) {
        let raw = RawSignalOptions::for_arrays(arrays.clone()).with_continuous(tokens).with_emg(emg);
        let plan = LoadPlan::prepare(&raw).unwrap();

        prop_assert_eq!(plan.descriptors.len(), arrays.len() + 1);
        prop_assert!(plan.descriptors[..arrays.len()].iter().all(|d| d.is_spikes()));
        prop_assert!(!plan.descriptors[arrays.len()].is_spikes());
        for (descriptor, array) in plan.descriptors.iter().zip(&arrays) {
            prop_assert_eq!(&descriptor.output_names[0], &format!("{}_spikes", array));
        }
    }

    #[test]
    fn combined_slots_are_ordered_and_aligned(arrays in array_names(), tokens in category_tokens(), emg in any::<bool>()) {
        let raw = RawSignalOptions::for_arrays(arrays).with_continuous(tokens.clone()).with_emg(emg);
        let plan = LoadPlan::prepare(&raw).unwrap();
        let combined = plan.combined().unwrap();

        let emg_count = if emg { EMG_NAMES.len() } else { 0 };
        let expected = tokens.len() + emg_count + 2;
        prop_assert_eq!(combined.output_names.len(), expected);
        prop_assert_eq!(combined.labels.len(), expected);
        prop_assert_eq!(combined.category_tags.len(), expected);

        let mut expected_tags = vec![SignalKind::Generic; tokens.len()];
        expected_tags.extend(vec![SignalKind::Emg; emg_count]);
        expected_tags.extend([SignalKind::Event, SignalKind::Event]);
        prop_assert_eq!(&combined.category_tags, &expected_tags);

        let flat_expected: Vec<String> = tokens
            .iter()
            .flat_map(|t| trial_signals::resolve(t))
            .chain(combined.output_names[tokens.len()..].iter().cloned())
            .collect();
        prop_assert_eq!(combined.flat_labels(), flat_expected);
    }

    #[test]
    fn emg_outputs_keep_canonical_order(arrays in array_names(), tokens in category_tokens()) {
        let raw = RawSignalOptions::for_arrays(arrays).with_continuous(tokens).with_emg(true);
        let plan = LoadPlan::prepare(&raw).unwrap();
        let emg: Vec<&str> = plan.combined().unwrap().outputs_of(SignalKind::Emg).collect();

        let expected: Vec<String> = EMG_NAMES.iter().map(|n| format!("EMG_{}", n)).collect();
        prop_assert_eq!(emg, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn mismatched_sources_are_rejected(arrays in array_names(), extra in 1usize..4) {
        let sources: Vec<String> = (0..arrays.len() + extra).map(|i| format!("src{}", i)).collect();
        let raw = RawSignalOptions::for_arrays(arrays).with_source_arrays(sources);

        let err = LoadPlan::prepare(&raw).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::ArityMismatch);
    }

    #[test]
    fn name_lists_are_stable_across_plans(tokens in category_tokens()) {
        let raw = RawSignalOptions::for_arrays(["M1"]).with_continuous(tokens);
        let first = LoadPlan::prepare(&raw).unwrap();
        let second = LoadPlan::prepare(&raw).unwrap();

        prop_assert_eq!(first.name_lists, second.name_lists);
    }
}

#[test]
fn test_markers_resolve_to_thirty_sorted_labels() {
    let labels = trial_signals::resolve("markers");

    assert_eq!(labels.len(), 30);
    assert!(labels.windows(2).all(|pair| pair[0] < pair[1]));
    for label in &labels {
        assert!(label.ends_with("_x") || label.ends_with("_y") || label.ends_with("_z"));
    }
}
