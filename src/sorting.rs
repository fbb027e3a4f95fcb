//! Domination counting and non-dominated sorting.
//!
//! Individuals are addressed by their index in the slice of fitness vectors
//! handed to these functions, which mirrors population order.

use rayon::prelude::*;

use crate::{
  error::Result,
  score::{Directions, Dominance, ParetoDominance, Score},
};

/// Index of an individual in its population.
pub type Index = usize;

/// Indices of the individuals of one front in ascending order.
pub type Front = Vec<Index>;

/// Domination relations of one individual against the rest of its
/// population.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DominationCount {
  /// Index of the individual.
  pub index: Index,
  /// Indices of individuals dominating this one, ascending.
  pub dominators: Vec<Index>,
  /// Indices of individuals this one dominates, ascending.
  pub dominated: Vec<Index>,
}

impl DominationCount {
  /// Number of individuals dominating this one.
  pub fn count(&self) -> usize {
    self.dominators.len()
  }
}

/// Compares the individual at `index` with every other individual.
///
/// # Errors
///
/// Fails if fitness vectors differ in length.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn count_domination(
  index: Index,
  fitness: &[&[Score]],
  directions: &Directions,
) -> Result<DominationCount> {
  let own = fitness[index];
  let mut dominators = Vec::new();
  let mut dominated = Vec::new();
  for (other_idx, other) in fitness.iter().enumerate() {
    if other_idx == index {
      continue;
    }
    match own.dominance(other, directions)? {
      Dominance::Dominates => dominated.push(other_idx),
      Dominance::Dominated => dominators.push(other_idx),
      Dominance::Neither => {}
    }
  }
  Ok(DominationCount {
    index,
    dominators,
    dominated,
  })
}

/// Counts domination of every individual. Individuals are processed in
/// parallel, results come in population order.
///
/// # Errors
///
/// Fails if fitness vectors differ in length.
pub fn count_dominations(
  fitness: &[&[Score]],
  directions: &Directions,
) -> Result<Vec<DominationCount>> {
  (0..fitness.len())
    .into_par_iter()
    .map(|idx| count_domination(idx, fitness, directions))
    .collect()
}

/// Partitions individuals into fronts, best first, stopping as soon as at
/// least half of them are ranked. Selection never needs more: the merged
/// population is twice the size of the one it is truncated to.
///
/// # Errors
///
/// Fails if fitness vectors differ in length.
pub fn non_dominated_sort(
  fitness: &[&[Score]],
  directions: &Directions,
) -> Result<Vec<Front>> {
  sort_fronts(fitness, directions, (fitness.len() + 1) / 2)
}

/// Partitions every individual into fronts, best first.
///
/// # Errors
///
/// Fails if fitness vectors differ in length.
pub fn sort_all_fronts(
  fitness: &[&[Score]],
  directions: &Directions,
) -> Result<Vec<Front>> {
  sort_fronts(fitness, directions, fitness.len())
}

/// Peels fronts off until at least `limit` individuals are ranked or none
/// remain.
fn sort_fronts(
  fitness: &[&[Score]],
  directions: &Directions,
  limit: usize,
) -> Result<Vec<Front>> {
  let mut remaining = count_dominations(fitness, directions)?;
  let mut fronts: Vec<Front> = Vec::new();
  let mut ranked = 0;

  while !remaining.is_empty() && (ranked < limit || fronts.is_empty()) {
    let (front, mut rest): (Vec<_>, Vec<_>) =
      remaining.into_iter().partition(|c| c.dominators.is_empty());
    // `remaining` keeps population order, so the front is sorted
    let front: Front = front.into_iter().map(|c| c.index).collect();
    if front.is_empty() {
      log::warn!(
        "{} individuals dominate each other in a cycle, leaving them unranked",
        rest.len()
      );
      break;
    }

    for count in rest.iter_mut() {
      count.dominators = sorted_difference(&count.dominators, &front);
    }

    ranked += front.len();
    fronts.push(front);
    remaining = rest;
  }

  Ok(fronts)
}

/// Returns elements of `a` absent from `b`. Both slices must be sorted in
/// ascending order, which lets the difference run in linear time.
pub fn sorted_difference(a: &[Index], b: &[Index]) -> Vec<Index> {
  debug_assert!(a.windows(2).all(|w| w[0] < w[1]), "`a` must be sorted");
  debug_assert!(b.windows(2).all(|w| w[0] < w[1]), "`b` must be sorted");

  let mut difference = Vec::with_capacity(a.len());
  let mut b_iter = b.iter().peekable();
  for &x in a {
    while b_iter.next_if(|&&y| y < x).is_some() {}
    if b_iter.peek() != Some(&&x) {
      difference.push(x);
    }
  }
  difference
}
