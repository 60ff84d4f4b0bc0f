//! Property tests for Ribbon filter construction and queries

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ribbon_filter::{FilterOptions, RibbonConfig, RibbonFilter};
use std::collections::HashSet;

fn key_sets() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,16}", 0..300)
}

proptest! {
    #[test]
    fn prop_no_false_negatives(keys in key_sets()) {
        let filter = RibbonFilter::new(&keys).unwrap();
        for key in &keys {
            prop_assert!(filter.might_contain(key), "False negative for {}", key);
        }
    }

    #[test]
    fn prop_distinct_count_and_slots(keys in key_sets()) {
        let filter = RibbonFilter::new(&keys).unwrap();
        let distinct: HashSet<&String> = keys.iter().collect();

        prop_assert_eq!(filter.len(), distinct.len());
        if distinct.is_empty() {
            prop_assert_eq!(filter.num_slots(), 0);
        } else {
            prop_assert!(filter.num_slots() >= distinct.len());
        }
    }

    #[test]
    fn prop_construction_deterministic(keys in key_sets()) {
        let a = RibbonFilter::new(&keys).unwrap();
        let b = RibbonFilter::new(&keys).unwrap();

        prop_assert_eq!(a.seed(), b.seed());
        prop_assert_eq!(a.solution(), b.solution());
    }

    #[test]
    fn prop_duplicates_do_not_change_filter(keys in key_sets()) {
        let mut doubled = keys.clone();
        doubled.extend(keys.iter().cloned());

        let single = RibbonFilter::new(&keys).unwrap();
        let twice = RibbonFilter::new(&doubled).unwrap();

        prop_assert_eq!(single.solution(), twice.solution());
        prop_assert_eq!(single.seed(), twice.seed());
    }

    #[test]
    fn prop_seed_counts_up_from_initial(keys in key_sets(), initial in any::<u32>()) {
        prop_assume!(!keys.is_empty());

        let config = RibbonConfig::default().with_initial_seed(initial);
        let filter = RibbonFilter::with_options(&keys, FilterOptions::default().with_config(config)).unwrap();

        prop_assert!(filter.attempts() >= 1);
        prop_assert_eq!(filter.seed(), initial.wrapping_add(filter.attempts() - 1));
        for key in &keys {
            prop_assert!(filter.might_contain(key));
        }
    }

    #[test]
    fn prop_numeric_items(items in prop::collection::vec(any::<u64>(), 1..300)) {
        let filter = RibbonFilter::new(&items).unwrap();
        for item in &items {
            prop_assert!(filter.might_contain(item));
        }
    }
}

#[test]
fn test_random_false_positive_rate() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let inserted: HashSet<u64> = (0..2000).map(|_| rng.gen()).collect();
    let mut items: Vec<u64> = inserted.iter().copied().collect();
    items.sort_unstable();
    let filter = RibbonFilter::new(&items).unwrap();

    let mut queries = 0usize;
    let mut false_positives = 0usize;
    while queries < 10_000 {
        let probe: u64 = rng.gen();
        if inserted.contains(&probe) {
            continue;
        }
        queries += 1;
        if filter.might_contain(&probe) {
            false_positives += 1;
        }
    }

    // Expected ~0.4%; allow 2%
    let fpr = false_positives as f64 / queries as f64;
    assert!(fpr < 0.02, "FPR too high: {}", fpr);
}

#[test]
fn test_larger_overhead_still_exact_for_members() {
    let items: Vec<String> = (0..5000).map(|i| format!("wide-{}", i)).collect();
    let config = RibbonConfig::default().with_overhead_factor(1.5);
    let filter = RibbonFilter::with_options(&items, FilterOptions::default().with_config(config)).unwrap();

    assert_eq!(filter.num_slots(), 7500);
    assert!(items.iter().all(|item| filter.might_contain(item)));
}
