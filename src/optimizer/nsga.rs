//! Implementation of the NSGA-II genetic algorithm.

use std::{marker::PhantomData, sync::Arc};

use rand::{rngs::StdRng, RngCore, SeedableRng};
use typed_builder::TypedBuilder;

use crate::{
  crowding::crowding_distances,
  error::{Error, Result},
  evaluation::executor::EvaluationExecutor,
  hall_of_fame::HallOfFame,
  individual::{CrowdingMap, FrontLabel, Genes, Individual, Population},
  initialization::{check_alleles, Initialization, RandomAlleles},
  mutation::{Mutation, RandomResetting},
  offspring::{check_probability, generate_offspring, Variation},
  optimizer::Optimizer,
  recombination::{Crossover, SinglePointCrossover},
  score::{Directions, Fitness},
  selection::{select_last_front, tournament_selection},
  sorting::non_dominated_sort,
};

/// Crossover probability used unless configured otherwise.
pub const DEFAULT_CROSSOVER_PROBABILITY: f64 = 0.1;
/// Mutation probability used unless configured otherwise.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.05;

/// The NSGA-II optimizer.
///
/// Every generation the merged population is sorted into fronts and its
/// first front is admitted into the hall of fame. Whole fronts then fill the
/// parent pool while they fit, the front that overflows it is truncated by
/// crowding distance. Parents are drawn from the pool with binary
/// tournaments, varied into offspring, and the offspring are merged with the
/// previous generation to form the next merged population.
///
/// # Examples
/// ```
/// # use nsga::{
/// #   initialization::RandomAlleles,
/// #   mutation::RandomResetting,
/// #   optimizer::{nsga::Nsga2, Optimizer},
/// #   recombination::UniformCrossover,
/// #   score::{Direction, Directions},
/// # };
/// let alleles = vec![(0..=100).collect::<Vec<i32>>(); 2];
/// let (hall_of_fame, population) = Nsga2::builder()
///   .alleles(alleles)
///   .population_size(20)
///   .iterations(10)
///   .directions(Directions::Uniform(Direction::Minimize))
///   .seed(42)
///   .initializer(RandomAlleles)
///   .evaluator(|g: &[i32]| vec![f64::from(g[0]), f64::from(g[1] - g[0])])
///   .crossover(UniformCrossover)
///   .mutation(RandomResetting)
///   .build()
///   .optimize()
///   .unwrap();
/// assert_eq!(population.len(), 20);
/// assert!(!hall_of_fame.is_empty());
/// ```
#[derive(TypedBuilder, Debug)]
pub struct Nsga2<
  G,
  Ini: Initialization<G>,
  Eva: EvaluationExecutor<G, EvaExecStrat>,
  Crs: Crossover<G>,
  Mut: Mutation<G>,
  EvaExecStrat,
> {
  /// Values each gene position can take.
  alleles: Vec<Vec<G>>,
  /// Number of individuals kept every generation.
  population_size: usize,
  /// Number of generations to run.
  iterations: usize,
  #[builder(default = DEFAULT_CROSSOVER_PROBABILITY)]
  crossover_probability: f64,
  #[builder(default = DEFAULT_MUTATION_PROBABILITY)]
  mutation_probability: f64,
  /// Objective directions, every objective is maximized by default.
  #[builder(default)]
  directions: Directions,
  /// Maximum size of the hall of fame, unbounded by default.
  #[builder(default, setter(strip_option))]
  archive_capacity: Option<usize>,
  /// Seed of the random source, drawn from entropy by default.
  #[builder(default, setter(strip_option))]
  seed: Option<u64>,
  initializer: Ini,
  evaluator: Eva,
  crossover: Crs,
  mutation: Mut,
  #[builder(setter(skip), default)]
  _eva_es: PhantomData<EvaExecStrat>,
}

impl<G, Ini, Eva, Crs, Mut, EvaExecStrat> Optimizer<G>
  for Nsga2<G, Ini, Eva, Crs, Mut, EvaExecStrat>
where
  G: Clone + PartialEq,
  Ini: Initialization<G>,
  Eva: EvaluationExecutor<G, EvaExecStrat>,
  Crs: Crossover<G>,
  Mut: Mutation<G>,
{
  fn optimize(self) -> Result<(HallOfFame<G>, Population<G>)> {
    self.validate()?;

    let mut rng = match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    let mut hall_of_fame = match self.archive_capacity {
      Some(capacity) => HallOfFame::with_capacity(capacity),
      None => HallOfFame::new(),
    };
    log::info!(
      "starting NSGA-II: population of {}, {} generations, {} gene positions",
      self.population_size,
      self.iterations,
      self.alleles.len()
    );

    let (mut merged, mut previous) = self.init(&mut rng)?;
    for generation in 0..self.iterations {
      let pool = self.select(&merged, &mut hall_of_fame, &mut rng)?;
      let offspring = self.vary(&pool, &mut rng)?;
      merged = offspring.clone().merge(previous);
      previous = offspring;
      log::debug!(
        "generation {}: hall of fame holds {} individuals",
        generation + 1,
        hall_of_fame.len()
      );
    }

    log::info!(
      "NSGA-II finished with {} individuals in the hall of fame",
      hall_of_fame.len()
    );
    Ok((hall_of_fame, previous))
  }
}

impl<G, Ini, Eva, Crs, Mut, EvaExecStrat>
  Nsga2<G, Ini, Eva, Crs, Mut, EvaExecStrat>
where
  G: Clone + PartialEq,
  Ini: Initialization<G>,
  Eva: EvaluationExecutor<G, EvaExecStrat>,
  Crs: Crossover<G>,
  Mut: Mutation<G>,
{
  fn validate(&self) -> Result<()> {
    if self.population_size == 0 {
      return Err(Error::InvalidPopulationSize);
    }
    check_probability("crossover probability", self.crossover_probability)?;
    check_probability("mutation probability", self.mutation_probability)?;
    check_alleles(&self.alleles)
  }

  /// Creates two random populations. Returns their union and the second one.
  fn init(
    &self,
    rng: &mut dyn RngCore,
  ) -> Result<(Population<G>, Population<G>)> {
    let genes: Vec<Genes<G>> = (0..2 * self.population_size)
      .map(|_| self.initializer.initialize(&self.alleles, rng))
      .collect();
    let scores = self.evaluator.execute_evaluations(&genes);
    assert_eq!(
      scores.len(),
      genes.len(),
      "evaluator must return one fitness vector per gene vector"
    );

    let mut individuals = genes
      .into_iter()
      .zip(scores)
      .map(|(genes, scores)| {
        Individual::new(genes, Fitness::new(scores)?).map(Arc::new)
      })
      .collect::<Result<Vec<_>>>()?;
    let second = Population::from_individuals(
      individuals.split_off(self.population_size),
    );
    let first = Population::from_individuals(individuals);
    Ok((first.merge(second.clone()), second))
  }

  /// Sorts `merged`, updates the hall of fame with its first front and
  /// returns the parent pool with crowding metadata assigned.
  fn select(
    &self,
    merged: &Population<G>,
    hall_of_fame: &mut HallOfFame<G>,
    rng: &mut dyn RngCore,
  ) -> Result<Population<G>> {
    let fitness = merged.fitness_vectors();
    let fronts = non_dominated_sort(&fitness, &self.directions)?;
    if let Some(first_front) = fronts.first() {
      hall_of_fame.update(merged, first_front, &self.directions, rng)?;
    }

    let mut selected = Vec::with_capacity(self.population_size);
    let mut crowding = CrowdingMap::new();
    for (rank, front) in fronts.iter().enumerate() {
      let quota = self.population_size - selected.len();
      if quota == 0 {
        break;
      }
      let label = FrontLabel::Ranked(rank);
      crowding.extend(crowding_distances(merged, front, label));
      if front.len() <= quota {
        selected.extend_from_slice(front);
      } else {
        selected.extend(select_last_front(merged, front, quota, rng)?);
      }
    }
    log::debug!(
      "{} fronts ranked, first of {} individuals, {} selected",
      fronts.len(),
      fronts.first().map_or(0, Vec::len),
      selected.len()
    );

    let mut pool = merged.subset(&selected);
    pool.assign_crowding(crowding);
    Ok(pool)
  }

  /// Draws parents from `pool` and varies them into offspring.
  fn vary(
    &self,
    pool: &Population<G>,
    rng: &mut dyn RngCore,
  ) -> Result<Population<G>> {
    let parents = tournament_selection(pool, rng)?;
    let variation = Variation {
      alleles: &self.alleles,
      crossover_probability: self.crossover_probability,
      mutation_probability: self.mutation_probability,
      crossover: &self.crossover,
      mutation: &self.mutation,
    };
    generate_offspring(&parents, &variation, &self.evaluator, rng)
  }
}

/// Runs NSGA-II with random initialization, [`SinglePointCrossover`],
/// [`RandomResetting`] mutation and default probabilities, maximizing every
/// objective. Returns the hall of fame and the last generated population.
///
/// # Errors
///
/// Fails if the configuration is invalid or `evaluator` breaks its contract.
///
/// # Examples
/// ```
/// # use nsga::optimizer::nsga::run;
/// let alleles = vec![vec![0u8, 1]; 8];
/// // count of ones against count of zeros
/// let evaluate = |g: &[u8]| {
///   let ones = g.iter().filter(|&&b| b == 1).count() as f64;
///   vec![ones, g.len() as f64 - ones]
/// };
/// let (hall_of_fame, population) = run(alleles, evaluate, 16, 20).unwrap();
/// assert_eq!(population.len(), 16);
/// ```
pub fn run<G, Eva, EvaExecStrat>(
  alleles: Vec<Vec<G>>,
  evaluator: Eva,
  population_size: usize,
  iterations: usize,
) -> Result<(HallOfFame<G>, Population<G>)>
where
  G: Clone + PartialEq,
  Eva: EvaluationExecutor<G, EvaExecStrat>,
{
  run_with(
    alleles,
    evaluator,
    population_size,
    iterations,
    DEFAULT_CROSSOVER_PROBABILITY,
    DEFAULT_MUTATION_PROBABILITY,
    SinglePointCrossover,
    RandomResetting,
  )
}

/// Same as [`run`] with explicit probabilities and variation operators.
///
/// # Errors
///
/// Fails if the configuration is invalid or an operator breaks its contract.
#[allow(clippy::too_many_arguments)]
pub fn run_with<G, Eva, Crs, Mut, EvaExecStrat>(
  alleles: Vec<Vec<G>>,
  evaluator: Eva,
  population_size: usize,
  iterations: usize,
  crossover_probability: f64,
  mutation_probability: f64,
  crossover: Crs,
  mutation: Mut,
) -> Result<(HallOfFame<G>, Population<G>)>
where
  G: Clone + PartialEq,
  Eva: EvaluationExecutor<G, EvaExecStrat>,
  Crs: Crossover<G>,
  Mut: Mutation<G>,
{
  Nsga2::builder()
    .alleles(alleles)
    .population_size(population_size)
    .iterations(iterations)
    .crossover_probability(crossover_probability)
    .mutation_probability(mutation_probability)
    .initializer(RandomAlleles)
    .evaluator(evaluator)
    .crossover(crossover)
    .mutation(mutation)
    .build()
    .optimize()
}
