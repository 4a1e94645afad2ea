//! Deck generation.
//!
//! Builds one face per grid cell: a pair for every two cells, plus a lone
//! card when the cell count is odd, then shuffles the lot.

use rustc_hash::FxHashMap;

use crate::core::{FaceId, GameRng, GridSize};

/// Deals paired faces from a palette of `palette_size` distinct faces.
///
/// ## Palette smaller than the pair count
///
/// Pair `i` uses face `i` while `i < palette_size`. Beyond that, faces are
/// drawn at random, so a face may back more than one pair. Counts stay even.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckGenerator {
    palette_size: u32,
}

impl DeckGenerator {
    /// Create a generator for the given palette size.
    ///
    /// Face ids are `u32`; a larger palette is capped at `u32::MAX` faces.
    pub fn new(palette_size: usize) -> Self {
        assert!(palette_size > 0, "Palette must have at least 1 face");
        Self {
            palette_size: u32::try_from(palette_size).unwrap_or(u32::MAX),
        }
    }

    #[must_use]
    pub fn palette_size(&self) -> usize {
        self.palette_size as usize
    }

    /// Generate a shuffled deck with exactly `grid.cells()` faces.
    pub fn generate(&self, grid: GridSize, rng: &mut GameRng) -> Vec<FaceId> {
        let total = grid.cells();
        let mut faces = Vec::with_capacity(total);

        for i in 0..grid.pairs() {
            let face = match u32::try_from(i) {
                Ok(face) if face < self.palette_size => FaceId::new(face),
                _ => self.random_face(rng),
            };
            faces.push(face);
            faces.push(face);
        }

        // Lone card so every cell is filled
        if grid.has_singleton() {
            faces.push(self.random_face(rng));
        }

        shuffle(&mut faces, rng);
        faces
    }

    fn random_face(&self, rng: &mut GameRng) -> FaceId {
        let upper = self.palette_size as usize;
        // below(upper) < palette_size, so the id always fits
        FaceId::new(u32::try_from(rng.below(upper)).unwrap_or(self.palette_size - 1))
    }
}

/// Fisher–Yates shuffle.
///
/// Walks from the last index down to 1, swapping each slot with a uniform
/// index in `[0, i]`.
pub fn shuffle<T>(items: &mut [T], rng: &mut GameRng) {
    for i in (1..items.len()).rev() {
        let j = rng.up_to(i);
        items.swap(i, j);
    }
}

/// How many times each face appears.
#[must_use]
pub fn face_counts(faces: &[FaceId]) -> FxHashMap<FaceId, usize> {
    let mut counts = FxHashMap::default();
    for &face in faces {
        *counts.entry(face).or_insert(0) += 1;
    }
    counts
}

/// The face left without a partner, if any.
///
/// A valid deck has at most one face with an odd count.
#[must_use]
pub fn singleton_face(faces: &[FaceId]) -> Option<FaceId> {
    face_counts(faces)
        .into_iter()
        .find(|&(_, count)| count % 2 == 1)
        .map(|(face, _)| face)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length() {
        let generator = DeckGenerator::new(8);
        let mut rng = GameRng::new(42);

        for (rows, cols) in [(2, 2), (2, 3), (3, 3), (4, 5), (1, 1)] {
            let deck = generator.generate(GridSize::new(rows, cols), &mut rng);
            assert_eq!(deck.len(), rows as usize * cols as usize);
        }
    }

    #[test]
    fn test_generate_uses_palette_in_order() {
        let generator = DeckGenerator::new(8);
        let mut rng = GameRng::new(1);
        let deck = generator.generate(GridSize::new(2, 4), &mut rng);

        let counts = face_counts(&deck);
        assert_eq!(counts.len(), 4);
        for face in 0..4 {
            assert_eq!(counts[&FaceId::new(face)], 2);
        }
    }

    #[test]
    fn test_two_by_two_single_face_palette() {
        let generator = DeckGenerator::new(1);
        let mut rng = GameRng::new(3);
        let deck = generator.generate(GridSize::new(2, 2), &mut rng);

        assert_eq!(deck, vec![FaceId::new(0); 4]);
    }

    #[test]
    fn test_small_palette_stays_even() {
        let generator = DeckGenerator::new(2);
        let mut rng = GameRng::new(11);
        let deck = generator.generate(GridSize::new(4, 4), &mut rng);

        assert_eq!(deck.len(), 16);
        for (face, count) in face_counts(&deck) {
            assert!(face.raw() < 2);
            assert_eq!(count % 2, 0);
        }
        assert_eq!(singleton_face(&deck), None);
    }

    #[test]
    fn test_odd_grid_has_one_singleton() {
        let generator = DeckGenerator::new(16);
        let mut rng = GameRng::new(5);
        let deck = generator.generate(GridSize::new(3, 3), &mut rng);

        let odd: Vec<_> = face_counts(&deck)
            .into_iter()
            .filter(|&(_, count)| count % 2 == 1)
            .collect();
        assert_eq!(odd.len(), 1);
        assert!(singleton_face(&deck).is_some());
    }

    #[test]
    fn test_generate_deterministic_for_seed() {
        let generator = DeckGenerator::new(6);
        let a = generator.generate(GridSize::new(3, 4), &mut GameRng::new(99));
        let b = generator.generate(GridSize::new(3, 4), &mut GameRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=10).collect();
        let original = data.clone();

        shuffle(&mut data, &mut rng);

        // Same elements, different order (very likely)
        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = GameRng::new(0);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![7];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn test_oversized_palette_capped() {
        let generator = DeckGenerator::new(usize::MAX);
        assert_eq!(generator.palette_size(), u32::MAX as usize);

        let deck = generator.generate(GridSize::new(2, 2), &mut GameRng::new(8));
        let counts = face_counts(&deck);
        assert_eq!(counts[&FaceId::new(0)], 2);
        assert_eq!(counts[&FaceId::new(1)], 2);
    }

    #[test]
    #[should_panic(expected = "Palette must have at least 1 face")]
    fn test_empty_palette() {
        DeckGenerator::new(0);
    }
}
