use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Item, ProteinItem};

/// Anything that can be drawn from a weighted pool.
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for Item {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl Weighted for ProteinItem {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Pick one candidate with probability proportional to its weight.
///
/// Draws a uniform value in `[0, total_weight)` and walks the candidates
/// in order, subtracting each weight until the draw goes negative. An
/// item's selection probability is therefore `weight / total_weight`.
///
/// Returns `None` for an empty slice. When the total weight is zero the
/// draw never goes negative and the LAST candidate is returned; see
/// DESIGN.md for why this legacy fallback is kept rather than fixed.
pub fn pick_weighted<'a, T, R>(candidates: &[&'a T], rng: &mut R) -> Option<&'a T>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }

    let total_weight: f64 = candidates.iter().map(|c| c.weight()).sum();
    if total_weight <= 0.0 {
        return candidates.last().copied();
    }

    let mut draw = rng.gen_range(0.0..total_weight);
    for candidate in candidates {
        draw -= candidate.weight();
        if draw < 0.0 {
            return Some(candidate);
        }
    }

    // Floating-point edge: the draw can survive the walk at the boundary.
    candidates.last().copied()
}

/// Pick one candidate uniformly at random. Used for cuisine tags, which
/// carry no weights.
pub fn pick_uniform<'a, T, R>(candidates: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    candidates.choose(rng)
}
