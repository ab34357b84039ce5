//! Feasibility-agnostic edit operators on [`Candidate`]s.
//!
//! Both operators may leave a child overfull or under-filled; the caller
//! runs [`Candidate::repair`] afterwards.
//!
//! # Operators
//!
//! - [`mutate`]: drop a few packed items (optionally pack a few others)
//! - [`crossover`]: swap half of each parent's exclusive items

use super::types::Candidate;
use crate::model::ProblemInstance;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

/// Removes `removals` random packed items and packs `additions` random
/// unpacked ones.
///
/// Both samples are drawn without replacement from the parent, so an item
/// removed here is never re-added by the same mutation.
pub fn mutate<R: Rng>(
    instance: &ProblemInstance,
    parent: &Candidate,
    removals: usize,
    additions: usize,
    rng: &mut R,
) -> Candidate {
    let remove = parent.elements().iter().copied().choose_multiple(rng, removals);
    let add = if additions > 0 {
        parent
            .complement()
            .iter()
            .copied()
            .choose_multiple(rng, additions)
    } else {
        Vec::new()
    };

    let mut child = parent.clone();
    child.update(instance, &add, &remove);
    child
}

/// Exchanges half of the items each parent packs and the other does not.
///
/// With `d1 = p1 \ p2` and `d2 = p2 \ p1`, each shuffled and split at its
/// midpoint, the children are:
///
/// - `c1 = shared ∪ d1[..m1] ∪ d2[m2..]`
/// - `c2 = shared ∪ d2[..m2] ∪ d1[m1..]`
///
/// Shared items never move.
pub fn crossover<R: Rng>(
    instance: &ProblemInstance,
    p1: &Candidate,
    p2: &Candidate,
    rng: &mut R,
) -> (Candidate, Candidate) {
    let mut d1: Vec<usize> = p1.elements().difference(p2.elements()).copied().collect();
    let mut d2: Vec<usize> = p2.elements().difference(p1.elements()).copied().collect();
    d1.shuffle(rng);
    d2.shuffle(rng);
    let m1 = d1.len() / 2;
    let m2 = d2.len() / 2;

    let mut c1 = p1.clone();
    c1.update(instance, &d2[m2..], &d1[m1..]);

    let mut c2 = p2.clone();
    c2.update(instance, &d1[m1..], &d2[m2..]);

    (c1, c2)
}
