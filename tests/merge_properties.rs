//! Property tests for the merge engine.
//!
//! Tests verify, over fixed scenarios and seeded random inputs:
//! 1. Totality: output length equals the sum of input lengths
//! 2. Sortedness: output is non-decreasing
//! 3. Multiset equality: output holds exactly the input values
//! 4. Single list pass-through and empty list tolerance
//! 5. Streaming and buffered merges agree, and every streamed prefix is sorted

use nway_merge::engine::{merge, merge_into, MergeEngine, MergeState};
use nway_merge::sink::SequenceSink;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::convert::Infallible;

/// Reference result: concatenate and sort.
fn expected(lists: &[Vec<i64>]) -> Vec<i64> {
    let mut all: Vec<i64> = lists.iter().flatten().copied().collect();
    all.sort();
    all
}

fn is_sorted(values: &[i64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

fn random_lists(rng: &mut SmallRng, k: usize, max_len: usize, range: i64) -> Vec<Vec<i64>> {
    (0..k)
        .map(|_| {
            let len = rng.gen_range(0..=max_len);
            let mut list: Vec<i64> = (0..len).map(|_| rng.gen_range(-range..=range)).collect();
            list.sort();
            list
        })
        .collect()
}

// =============================================================================
// Fixed scenarios
// =============================================================================

#[test]
fn test_scenario_basic() {
    let lists = vec![vec![1, 4, 5], vec![2, 6, 8, 9], vec![0, 3, 7, 10, 11]];
    assert_eq!(merge(&lists), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
}

#[test]
fn test_scenario_negatives_and_duplicates() {
    let lists = vec![vec![-5, -1, 0], vec![-10, 0, 0, 1], vec![5, 10], vec![2, 3, 3]];
    assert_eq!(
        merge(&lists),
        vec![-10, -5, -1, 0, 0, 0, 1, 2, 3, 3, 5, 10]
    );
}

#[test]
fn test_scenario_one_empty_list() {
    let lists = vec![vec![10, 20], vec![], vec![5, 15]];
    assert_eq!(merge(&lists), vec![5, 10, 15, 20]);
}

#[test]
fn test_scenario_single_list() {
    let lists = vec![vec![1, 2, 3, 4, 5]];
    assert_eq!(merge(&lists), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_scenario_all_empty() {
    let lists: Vec<Vec<i64>> = vec![vec![], vec![]];
    assert!(merge(&lists).is_empty());
}

#[test]
fn test_scenario_no_lists() {
    let lists: Vec<Vec<i64>> = Vec::new();
    assert!(merge(&lists).is_empty());
}

// =============================================================================
// Randomized properties
// =============================================================================

#[test]
fn test_random_inputs_match_reference() {
    let mut rng = SmallRng::seed_from_u64(12345);

    for _ in 0..200 {
        let k = rng.gen_range(0..12);
        let lists = random_lists(&mut rng, k, 40, 50);

        let output = merge(&lists);
        let total: usize = lists.iter().map(Vec::len).sum();

        assert_eq!(output.len(), total);
        assert!(is_sorted(&output));
        assert_eq!(output, expected(&lists));
    }
}

#[test]
fn test_single_random_list_passthrough() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..50 {
        let lists = random_lists(&mut rng, 1, 100, 1_000);
        assert_eq!(merge(&lists), lists[0]);
    }
}

#[test]
fn test_extreme_values() {
    let lists = vec![
        vec![i64::MIN, 0, i64::MAX],
        vec![i64::MIN, i64::MIN + 1],
        vec![],
        vec![i64::MAX - 1, i64::MAX],
    ];
    assert_eq!(merge(&lists), expected(&lists));
}

#[test]
fn test_many_lists_few_elements() {
    let lists: Vec<Vec<i64>> = (0..1_000).map(|i| vec![(i % 7) as i64]).collect();
    let output = merge(&lists);
    assert_eq!(output.len(), 1_000);
    assert!(is_sorted(&output));
}

// =============================================================================
// Streaming
// =============================================================================

/// Sink that checks every prefix it observes is sorted.
#[derive(Default)]
struct PrefixChecker {
    seen: Vec<i64>,
    finished: bool,
}

impl SequenceSink<i64> for PrefixChecker {
    type Error = Infallible;

    fn push(&mut self, value: i64) -> Result<(), Infallible> {
        if let Some(&last) = self.seen.last() {
            assert!(last <= value, "{} emitted after {}", value, last);
        }
        self.seen.push(value);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Infallible> {
        self.finished = true;
        Ok(())
    }
}

#[test]
fn test_streaming_matches_buffered() {
    let mut rng = SmallRng::seed_from_u64(99);

    for _ in 0..50 {
        let k = rng.gen_range(1..8);
        let lists = random_lists(&mut rng, k, 30, 20);

        let mut sink = PrefixChecker::default();
        let stats = merge_into(&lists, &mut sink).unwrap();

        assert!(sink.finished);
        assert_eq!(stats.elements, sink.seen.len());
        assert_eq!(sink.seen, merge(&lists));
    }
}

#[test]
fn test_partial_drain_is_prefix() {
    let lists = vec![vec![-5, 0, 5, 10, 15], vec![1, 2, 3], vec![7, 9, 11]];
    let full = merge(&lists);

    for n in 0..=full.len() {
        let mut engine = MergeEngine::new(&lists);
        let prefix: Vec<i64> = engine.by_ref().take(n).collect();
        assert_eq!(prefix, &full[..n]);
        assert_eq!(engine.emitted(), n);
        assert_eq!(engine.len(), full.len() - n);

        let expected_state = if n == full.len() {
            MergeState::Done
        } else if n == 0 {
            MergeState::Seeding
        } else {
            MergeState::Draining
        };
        assert_eq!(engine.state(), expected_state);
    }
}

#[test]
fn test_shared_lists_across_threads() {
    let lists = vec![vec![1, 3, 5], vec![2, 4, 6]];

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| merge(&lists))).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec![1, 2, 3, 4, 5, 6]);
        }
    });
}
