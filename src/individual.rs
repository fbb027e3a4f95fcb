//! Individuals, populations and their per-generation ranking metadata.

use std::{collections::HashMap, sync::Arc};

use crate::{
  error::{Error, Result},
  evaluation::Evaluation,
  score::{Fitness, Score},
};

/// An ordered sequence of genes.
pub type Genes<G> = Vec<G>;

/// An immutable candidate solution: its genes and the fitness they scored.
#[derive(Clone, PartialEq, Debug)]
pub struct Individual<G> {
  genes: Genes<G>,
  fitness: Fitness,
}

impl<G> Individual<G> {
  /// Creates an individual from genes and a precomputed fitness.
  ///
  /// # Errors
  ///
  /// Returns [`Error::EmptyGenes`] if `genes` is empty.
  pub fn new(genes: Genes<G>, fitness: Fitness) -> Result<Self> {
    if genes.is_empty() {
      return Err(Error::EmptyGenes);
    }
    Ok(Self { genes, fitness })
  }

  /// Creates an individual by evaluating `genes` with `evaluation`.
  ///
  /// # Errors
  ///
  /// Returns an error if `genes` or the evaluated fitness are empty.
  pub fn evaluate<E: Evaluation<G>>(
    genes: Genes<G>,
    evaluation: &E,
  ) -> Result<Self> {
    let fitness = Fitness::new(evaluation.evaluate(&genes))?;
    Self::new(genes, fitness)
  }

  /// Returns genes of the individual.
  pub fn genes(&self) -> &[G] {
    &self.genes
  }

  /// Returns fitness of the individual.
  pub fn fitness(&self) -> &Fitness {
    &self.fitness
  }

  /// Moves genes and fitness out of the individual.
  pub fn into_parts(self) -> (Genes<G>, Fitness) {
    (self.genes, self.fitness)
  }
}

/// Rank of the front a fitness vector was found in.
///
/// Ranked fronts compare by rank, lower is better. `Unranked` marks distances
/// computed only to truncate a front and is worse than any rank.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum FrontLabel {
  /// Front number, `0` being the best front.
  Ranked(usize),
  /// No rank assigned.
  Unranked,
}

/// Front label and crowding distance of a fitness vector.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Crowding {
  /// Front the fitness vector belongs to.
  pub label: FrontLabel,
  /// Crowding distance, the higher the more isolated.
  pub distance: f64,
}

/// Crowding metadata keyed by fitness vector.
pub type CrowdingMap = HashMap<Fitness, Crowding>;

/// A group of population indices whose individuals share one fitness vector.
#[derive(Clone, PartialEq, Debug)]
pub struct FitnessGroup<'a> {
  /// Shared fitness vector.
  pub fitness: &'a Fitness,
  /// Indices of individuals with this fitness, in ascending order of
  /// appearance.
  pub members: Vec<usize>,
}

/// An ordered collection of individuals plus the crowding metadata of the
/// current generation. Duplicates are allowed.
///
/// Individuals are shared through `Arc`, so the same individual can live in a
/// population, its parent pool and the hall of fame at once.
#[derive(Debug)]
pub struct Population<G> {
  individuals: Vec<Arc<Individual<G>>>,
  crowding: CrowdingMap,
}

impl<G> Default for Population<G> {
  fn default() -> Self {
    Self {
      individuals: Vec::new(),
      crowding: CrowdingMap::new(),
    }
  }
}

impl<G> Clone for Population<G> {
  fn clone(&self) -> Self {
    Self {
      individuals: self.individuals.clone(),
      crowding: self.crowding.clone(),
    }
  }
}

impl<G> FromIterator<Arc<Individual<G>>> for Population<G> {
  fn from_iter<T: IntoIterator<Item = Arc<Individual<G>>>>(iter: T) -> Self {
    Self::from_individuals(iter.into_iter().collect())
  }
}

impl<G> Population<G> {
  /// Creates an empty population.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a population without crowding metadata.
  pub fn from_individuals(individuals: Vec<Arc<Individual<G>>>) -> Self {
    Self {
      individuals,
      crowding: CrowdingMap::new(),
    }
  }

  /// Returns the number of individuals.
  pub fn len(&self) -> usize {
    self.individuals.len()
  }

  /// Returns `true` if there are no individuals.
  pub fn is_empty(&self) -> bool {
    self.individuals.is_empty()
  }

  /// Returns the individual at `idx`.
  ///
  /// # Panics
  ///
  /// Panics if `idx` is out of bounds.
  pub fn get(&self, idx: usize) -> &Arc<Individual<G>> {
    &self.individuals[idx]
  }

  /// Returns all individuals as a slice.
  pub fn individuals(&self) -> &[Arc<Individual<G>>] {
    &self.individuals
  }

  /// Iterates over individuals.
  pub fn iter(&self) -> std::slice::Iter<'_, Arc<Individual<G>>> {
    self.individuals.iter()
  }

  /// Moves individuals out, dropping crowding metadata.
  pub fn into_individuals(self) -> Vec<Arc<Individual<G>>> {
    self.individuals
  }

  /// Concatenates two populations. Crowding metadata is not carried over as
  /// it is only valid for the generation it was computed for.
  pub fn merge(mut self, other: Self) -> Self {
    self.individuals.extend(other.individuals);
    self.crowding.clear();
    self
  }

  /// Creates a population of the individuals at `indices`, in that order.
  pub fn subset(&self, indices: &[usize]) -> Self {
    indices
      .iter()
      .map(|&idx| Arc::clone(&self.individuals[idx]))
      .collect()
  }

  /// Returns fitness scores of every individual in population order.
  pub fn fitness_vectors(&self) -> Vec<&[Score]> {
    self.individuals.iter().map(|i| i.fitness().as_slice()).collect()
  }

  /// Returns crowding metadata.
  pub fn crowding(&self) -> &CrowdingMap {
    &self.crowding
  }

  /// Returns crowding metadata assigned to `fitness`.
  pub fn crowding_of(&self, fitness: &Fitness) -> Option<&Crowding> {
    self.crowding.get(fitness)
  }

  /// Merges `crowding` into this population's metadata, overwriting entries
  /// for fitness vectors already present.
  pub fn assign_crowding(&mut self, crowding: CrowdingMap) {
    self.crowding.extend(crowding);
  }

  /// Groups `indices` by the fitness of their individuals. Groups come in the
  /// order their fitness first appears in `indices`.
  pub fn group_by_fitness(
    &self,
    indices: impl IntoIterator<Item = usize>,
  ) -> Vec<FitnessGroup<'_>> {
    let mut groups: Vec<FitnessGroup> = Vec::new();
    let mut positions: HashMap<&Fitness, usize> = HashMap::new();
    for idx in indices {
      let fitness = self.individuals[idx].fitness();
      match positions.get(fitness) {
        Some(&pos) => groups[pos].members.push(idx),
        None => {
          positions.insert(fitness, groups.len());
          groups.push(FitnessGroup {
            fitness,
            members: vec![idx],
          });
        }
      }
    }
    groups
  }
}
