use std::collections::{BinaryHeap, HashMap};

use crate::{color::Rgb, grid::patch::Patch, grid::RgbGrid};

/// a reference patch ranked by its similarity to a target patch
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    /// sum of squared differences to the target
    pub similarity: u64,
    /// position in the reference patch list
    pub index: usize,
}

/// Predicts colors by voting over the most similar reference patches.
pub struct PatchMatcher {
    reference_patches: Vec<Patch>,
    match_count: usize,
}

impl PatchMatcher {
    pub fn new(reference_patches: Vec<Patch>, match_count: usize) -> Self {
        assert!(
            !reference_patches.is_empty(),
            "Patch matching requires at least one reference patch"
        );
        assert!(match_count > 0, "Match count must be at least one");
        Self {
            reference_patches,
            match_count,
        }
    }

    pub fn reference_patches(&self) -> &[Patch] {
        &self.reference_patches
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    /// The `match_count` most similar reference patches, most similar first.
    ///
    /// A later reference only displaces the current worst match if it is strictly more
    /// similar, so among equally similar references the earlier ones are kept.
    pub fn best_matches(&self, target: &Patch) -> Vec<Match> {
        let mut best = BinaryHeap::with_capacity(self.match_count);
        for (index, reference) in self.reference_patches.iter().enumerate() {
            let candidate = Match {
                similarity: target.similarity(reference),
                index,
            };
            if best.len() < self.match_count {
                best.push(candidate);
                continue;
            }
            if let Some(worst) = best.peek() {
                if candidate.similarity < worst.similarity {
                    best.pop();
                    best.push(candidate);
                }
            }
        }
        best.into_sorted_vec()
    }

    /// Color for the center of `target`, voted from the colors `reference_colors` holds at
    /// the centers of the best matching reference patches.
    pub fn predict_color(&self, target: &Patch, reference_colors: &RgbGrid) -> Rgb {
        let ranked_colors: Vec<Rgb> = self
            .best_matches(target)
            .iter()
            .map(|m| {
                let (x, y) = self.reference_patches[m.index].center();
                reference_colors.dot(x, y)
            })
            .collect();
        majority_vote(&ranked_colors).expect("Best matches must not be empty")
    }
}

/// Most frequent color of `ranked_colors`.
///
/// If several colors share the highest count, the one occurring first in
/// `ranked_colors` wins. Returns `None` for an empty slice.
pub fn majority_vote(ranked_colors: &[Rgb]) -> Option<Rgb> {
    let mut counts: HashMap<Rgb, usize> = HashMap::new();
    for color in ranked_colors {
        *counts.entry(*color).or_insert(0) += 1;
    }
    let highest_count = counts.values().copied().max()?;
    ranked_colors
        .iter()
        .find(|color| counts[*color] == highest_count)
        .copied()
}
