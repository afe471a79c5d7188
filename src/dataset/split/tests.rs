use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn class_records(label: usize, name: &str, count: usize) -> Vec<SampleRecord> {
    (0..count)
        .map(|i| SampleRecord::new(format!("{name}/{i}.png"), label, name))
        .collect()
}

fn two_class_records() -> Vec<SampleRecord> {
    let mut records = class_records(0, "A", 5);
    records.extend(class_records(1, "B", 2));
    records
}

fn split_seeded(records: &[SampleRecord], shots: usize, seed: u64) -> FewShotSplit {
    let options = SplitOptions {
        shots,
        val_fraction: 0.2,
    };
    split_few_shot(records, &options, &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn count_label(records: &[SampleRecord], label: usize) -> usize {
    records.iter().filter(|r| r.label == label).count()
}

#[test]
fn two_class_example_matches_expected_sizes() {
    let split = split_seeded(&two_class_records(), 3, 7);
    assert_eq!(count_label(&split.train, 0), 3);
    assert_eq!(count_label(&split.train, 1), 2);
    assert_eq!(count_label(&split.val, 0), 1);
    assert_eq!(count_label(&split.test, 0), 1);
    assert_eq!(count_label(&split.val, 1), 0);
    assert_eq!(count_label(&split.test, 1), 0);
}

#[test]
fn partitions_are_disjoint_and_cover_input() {
    let mut records = class_records(0, "A", 23);
    records.extend(class_records(1, "B", 4));
    records.extend(class_records(2, "C", 11));
    let split = split_seeded(&records, 4, 99);
    assert_eq!(split.len(), records.len());
    let mut seen = HashSet::new();
    for record in split.train.iter().chain(&split.val).chain(&split.test) {
        assert!(seen.insert(record.image_path.clone()), "duplicate {record:?}");
    }
    let input: HashSet<_> = records.iter().map(|r| r.image_path.clone()).collect();
    assert_eq!(seen, input);
}

#[test]
fn leftover_pool_sizes_follow_fraction() {
    let records = class_records(0, "A", 4 + 23);
    let split = split_seeded(&records, 4, 1);
    assert_eq!(split.train.len(), 4);
    // floor(23 * 0.2) = 4
    assert_eq!(split.val.len(), 4);
    assert_eq!(split.test.len(), 19);
}

#[test]
fn single_leftover_goes_to_val() {
    let split = split_seeded(&class_records(0, "A", 4), 3, 5);
    assert_eq!(split.train.len(), 3);
    assert_eq!(split.val.len(), 1);
    assert!(split.test.is_empty());
}

#[test]
fn exact_shot_count_leaves_nothing_for_eval() {
    let split = split_seeded(&class_records(0, "A", 3), 3, 5);
    assert_eq!(split.train.len(), 3);
    assert!(split.val.is_empty());
    assert!(split.test.is_empty());
}

#[test]
fn same_seed_gives_same_split() {
    let records = two_class_records();
    assert_eq!(split_seeded(&records, 2, 42), split_seeded(&records, 2, 42));
}

#[test]
fn each_class_is_shuffled_before_taking_shots() {
    let records = class_records(0, "A", 30);
    let scan_order: Vec<SampleRecord> = records[..5].to_vec();
    let train_sets: HashSet<Vec<SampleRecord>> = (0..8)
        .map(|seed| split_seeded(&records, 5, seed).train)
        .collect();
    assert!(train_sets.len() > 1, "every seed picked the same train set");
    assert!(
        train_sets.iter().any(|train| *train != scan_order),
        "train set always equals the first records in scan order"
    );
}

#[test]
fn output_is_grouped_in_label_order() {
    let mut records = class_records(2, "C", 3);
    records.extend(class_records(0, "A", 3));
    records.extend(class_records(1, "B", 3));
    let split = split_seeded(&records, 2, 3);
    let labels: Vec<usize> = split.train.iter().map(|r| r.label).collect();
    assert_eq!(labels, vec![0, 0, 1, 1, 2, 2]);
}

#[test]
fn empty_input_yields_empty_split() {
    let split = split_seeded(&[], 3, 0);
    assert!(split.is_empty());
}

#[test]
fn zero_shots_is_rejected() {
    let options = SplitOptions {
        shots: 0,
        val_fraction: 0.2,
    };
    let err = split_few_shot(&two_class_records(), &options, &mut StdRng::seed_from_u64(0))
        .unwrap_err();
    assert!(matches!(err, SplitError::InvalidArgument { name: "shots", .. }));
}

#[test]
fn out_of_range_fractions_are_rejected() {
    for val_fraction in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
        let options = SplitOptions {
            shots: 1,
            val_fraction,
        };
        let err = split_few_shot(&[], &options, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(
            matches!(err, SplitError::InvalidArgument { name: "val_fraction", .. }),
            "accepted {val_fraction}"
        );
    }
}

#[test]
fn val_count_never_exceeds_pool() {
    let options = SplitOptions {
        shots: 1,
        val_fraction: 0.999_999_999_999_999_9,
    };
    for leftover in 0..50 {
        assert!(options.val_count(leftover) <= leftover);
    }
    assert_eq!(SplitOptions::new(1).val_count(0), 0);
    assert_eq!(SplitOptions::new(1).val_count(2), 1);
    assert_eq!(SplitOptions::new(1).val_count(10), 2);
}

#[test]
fn seeded_rng_is_reproducible() {
    let records = class_records(0, "A", 30);
    let options = SplitOptions::new(5);
    let a = split_few_shot(&records, &options, &mut split_rng(Some(9))).unwrap();
    let b = split_few_shot(&records, &options, &mut split_rng(Some(9))).unwrap();
    assert_eq!(a, b);
    let unseeded = split_few_shot(&records, &options, &mut split_rng(None)).unwrap();
    assert_eq!(unseeded.train.len(), 5);
}
