//! Deck and scoring property tests.
//!
//! These tests check the deal invariants over arbitrary grids, palettes and
//! seeds, and that the score never goes down during play.

use memory_match::cards::{face_counts, shuffle, singleton_face, DeckGenerator};
use memory_match::core::{GameRng, GridSize, ScoringRule, Timings};
use memory_match::session::ScoreKeeper;
use proptest::prelude::*;

// =============================================================================
// Deck Generation
// =============================================================================

proptest! {
    /// Every cell gets exactly one face.
    #[test]
    fn prop_deck_fills_grid(
        rows in 1u16..12,
        cols in 1u16..12,
        palette in 1usize..20,
        seed in any::<u64>()
    ) {
        let grid = GridSize::new(rows, cols);
        let faces = DeckGenerator::new(palette).generate(grid, &mut GameRng::new(seed));
        prop_assert_eq!(faces.len(), grid.cells());
    }

    /// All faces come in pairs, except one when the cell count is odd.
    #[test]
    fn prop_deck_parity(
        rows in 1u16..12,
        cols in 1u16..12,
        palette in 1usize..20,
        seed in any::<u64>()
    ) {
        let grid = GridSize::new(rows, cols);
        let faces = DeckGenerator::new(palette).generate(grid, &mut GameRng::new(seed));

        let odd = face_counts(&faces)
            .values()
            .filter(|&&count| count % 2 == 1)
            .count();
        prop_assert_eq!(odd, usize::from(grid.has_singleton()));
        prop_assert_eq!(singleton_face(&faces).is_some(), grid.has_singleton());
    }

    /// Faces never leave the palette.
    #[test]
    fn prop_deck_within_palette(
        rows in 1u16..12,
        cols in 1u16..12,
        palette in 1usize..20,
        seed in any::<u64>()
    ) {
        let grid = GridSize::new(rows, cols);
        let faces = DeckGenerator::new(palette).generate(grid, &mut GameRng::new(seed));
        prop_assert!(faces.iter().all(|face| (face.raw() as usize) < palette));
    }

    /// A palette at least as large as the pair count gives distinct pairs.
    #[test]
    fn prop_large_palette_distinct_pairs(
        rows in 1u16..8,
        cols in 1u16..8,
        seed in any::<u64>()
    ) {
        let grid = GridSize::new(rows, cols);
        let faces = DeckGenerator::new(64).generate(grid, &mut GameRng::new(seed));
        let counts = face_counts(&faces);

        for pair in 0..grid.pairs() {
            let count = counts
                .iter()
                .find(|(face, _)| face.raw() as usize == pair)
                .map_or(0, |(_, &count)| count);
            prop_assert!(count >= 2);
        }
    }

    /// Shuffling keeps every element.
    #[test]
    fn prop_shuffle_is_permutation(
        items in prop::collection::vec(any::<u32>(), 0..64),
        seed in any::<u64>()
    ) {
        let mut shuffled = items.clone();
        shuffle(&mut shuffled, &mut GameRng::new(seed));

        let mut expected = items;
        expected.sort_unstable();
        shuffled.sort_unstable();
        prop_assert_eq!(shuffled, expected);
    }

    /// The same seed deals the same deck.
    #[test]
    fn prop_deal_deterministic(
        rows in 1u16..10,
        cols in 1u16..10,
        seed in any::<u64>()
    ) {
        let grid = GridSize::new(rows, cols);
        let generator = DeckGenerator::new(8);
        let a = generator.generate(grid, &mut GameRng::new(seed));
        let b = generator.generate(grid, &mut GameRng::new(seed));
        prop_assert_eq!(a, b);
    }
}

// =============================================================================
// Scoring
// =============================================================================

/// A step in a scoring run.
#[derive(Clone, Debug)]
enum Step {
    Match,
    Mismatch,
    Wait(f32),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Match),
        Just(Step::Mismatch),
        (0.0f32..4.0).prop_map(Step::Wait),
    ]
}

proptest! {
    /// Score never decreases; moves count every compared pair.
    #[test]
    fn prop_score_monotonic(steps in prop::collection::vec(step_strategy(), 0..64)) {
        let mut keeper = ScoreKeeper::new(ScoringRule::default(), &Timings::default());
        let mut last_score = 0;
        let mut compared = 0;

        for step in steps {
            match step {
                Step::Match => {
                    keeper.record_move();
                    keeper.record_match();
                    compared += 1;
                }
                Step::Mismatch => {
                    keeper.record_move();
                    keeper.record_mismatch();
                    compared += 1;
                    prop_assert_eq!(keeper.combo(), 0);
                }
                Step::Wait(dt) => {
                    keeper.tick(dt);
                }
            }
            prop_assert!(keeper.score() >= last_score);
            last_score = keeper.score();
        }
        prop_assert_eq!(keeper.moves(), compared);
    }

    /// A streak of `n` quick matches scores `n + 5 * n * (n - 1) / 2`.
    #[test]
    fn prop_streak_total(n in 1u32..30) {
        let mut keeper = ScoreKeeper::new(ScoringRule::default(), &Timings::default());
        for _ in 0..n {
            keeper.record_match();
            keeper.tick(0.5);
        }
        prop_assert_eq!(keeper.combo(), n);
        prop_assert_eq!(keeper.score(), n + 5 * n * (n - 1) / 2);
    }
}

/// Test that a 2x2 deal from a one-face palette uses that face throughout.
#[test]
fn test_single_face_palette() {
    let faces = DeckGenerator::new(1).generate(GridSize::new(2, 2), &mut GameRng::new(42));
    assert!(faces.iter().all(|face| face.raw() == 0));
}
