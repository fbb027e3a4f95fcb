//! Elitist archive of the non-dominated individuals found during a run.

use std::{collections::HashSet, sync::Arc};

use rand::RngCore;

use crate::{
  error::Result,
  individual::{Individual, Population},
  score::Directions,
  selection::select_last_front,
  sorting::{count_dominations, Index},
};

/// Mutually non-dominated individuals collected across generations, no two
/// of them sharing genes.
///
/// An archive created with [`HallOfFame::with_capacity`] never holds more
/// than that many individuals: whenever an update overflows it, the archive
/// is truncated by crowding distance just like a boundary front is.
#[derive(Clone, Debug)]
pub struct HallOfFame<G> {
  members: Population<G>,
  capacity: Option<usize>,
}

impl<G> Default for HallOfFame<G> {
  fn default() -> Self {
    Self::new()
  }
}

impl<G> HallOfFame<G> {
  /// Creates an unbounded archive.
  pub fn new() -> Self {
    Self {
      members: Population::new(),
      capacity: None,
    }
  }

  /// Creates an archive holding at most `capacity` individuals.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      members: Population::new(),
      capacity: Some(capacity),
    }
  }

  /// Returns the maximum number of members, if any.
  pub fn capacity(&self) -> Option<usize> {
    self.capacity
  }

  /// Returns the number of members.
  pub fn len(&self) -> usize {
    self.members.len()
  }

  /// Returns `true` if the archive is empty.
  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }

  /// Iterates over members in order of admission.
  pub fn iter(&self) -> std::slice::Iter<'_, Arc<Individual<G>>> {
    self.members.iter()
  }

  /// Returns members as a population.
  pub fn members(&self) -> &Population<G> {
    &self.members
  }

  /// Moves members out as a population.
  pub fn into_population(self) -> Population<G> {
    self.members
  }
}

impl<G: PartialEq> HallOfFame<G> {
  /// Admits the individuals of `population` at `first_front`, then drops
  /// every member that is dominated by another one or repeats the genes of
  /// an earlier one.
  ///
  /// # Errors
  ///
  /// Fails if fitness vectors of members differ in length or don't match
  /// `directions`.
  ///
  /// # Panics
  ///
  /// Panics if an index of `first_front` is out of bounds.
  pub fn update(
    &mut self,
    population: &Population<G>,
    first_front: &[Index],
    directions: &Directions,
    rng: &mut dyn RngCore,
  ) -> Result<()> {
    let mut candidates = self.members.individuals().to_vec();
    candidates.extend(
      first_front
        .iter()
        .map(|&idx| Arc::clone(population.get(idx))),
    );

    let mut seen = HashSet::new();
    candidates.retain(|individual| seen.insert(Arc::as_ptr(individual)));

    let candidates = Population::from_individuals(candidates);
    let counts = count_dominations(&candidates.fitness_vectors(), directions)?;
    let mut members: Vec<Arc<Individual<G>>> = Vec::new();
    for count in counts.iter().filter(|c| c.count() == 0) {
      let individual = candidates.get(count.index);
      if !members.iter().any(|m| m.genes() == individual.genes()) {
        members.push(Arc::clone(individual));
      }
    }
    self.members = Population::from_individuals(members);

    if let Some(capacity) = self.capacity {
      self.truncate(capacity, rng)?;
    }
    Ok(())
  }

  fn truncate(&mut self, capacity: usize, rng: &mut dyn RngCore) -> Result<()> {
    if self.members.len() <= capacity {
      return Ok(());
    }
    log::trace!(
      "hall of fame overflows its capacity: {} > {}",
      self.members.len(),
      capacity
    );
    if capacity == 0 {
      self.members = Population::new();
      return Ok(());
    }

    let all: Vec<Index> = (0..self.members.len()).collect();
    let mut kept = select_last_front(&self.members, &all, capacity, rng)?;
    kept.sort_unstable();
    self.members = self.members.subset(&kept);
    Ok(())
  }
}
