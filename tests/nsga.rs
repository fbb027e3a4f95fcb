use std::collections::HashSet;

use nsga::{
  evaluation::Evaluation,
  hall_of_fame::HallOfFame,
  initialization::RandomAlleles,
  mutation::RandomResetting,
  operator::{ParBatch, ParEach},
  optimizer::{
    nsga::{run, Nsga2},
    Optimizer,
  },
  recombination::{SinglePointCrossover, UniformCrossover},
  score::{Direction, Directions, ParetoDominance, Score},
};
use rand::{Rng, RngCore};

// Binh and Korn function over an integer grid, both objectives minimized
fn binh_korn(genes: &[i32]) -> Vec<Score> {
  let (x, y) = (f64::from(genes[0]), f64::from(genes[1]));
  vec![
    4.0 * x.powi(2) + 4.0 * y.powi(2),
    (x - 5.0).powi(2) + (y - 5.0).powi(2),
  ]
}

fn alleles() -> Vec<Vec<i32>> {
  vec![(0..=50).collect(), (0..=30).collect()]
}

fn minimize() -> Directions {
  Directions::Uniform(Direction::Minimize)
}

fn assert_pareto_archive(
  hall_of_fame: &HallOfFame<i32>,
  directions: &Directions,
) {
  assert!(!hall_of_fame.is_empty());
  for a in hall_of_fame.iter() {
    for b in hall_of_fame.iter() {
      assert_eq!(
        a.fitness().dominance(b.fitness(), directions).unwrap().signum(),
        0
      );
    }
  }
  let genes: HashSet<_> =
    hall_of_fame.iter().map(|i| i.genes().to_vec()).collect();
  assert_eq!(genes.len(), hall_of_fame.len());
}

#[test]
fn test_hall_of_fame_is_pareto_archive() {
  let (hall_of_fame, population) = Nsga2::builder()
    .alleles(alleles())
    .population_size(40)
    .iterations(30)
    .crossover_probability(0.5)
    .mutation_probability(0.3)
    .directions(minimize())
    .seed(7)
    .initializer(RandomAlleles)
    .evaluator(binh_korn)
    .crossover(UniformCrossover)
    .mutation(RandomResetting)
    .build()
    .optimize()
    .unwrap();
  assert_eq!(population.len(), 40);
  assert_pareto_archive(&hall_of_fame, &minimize());
}

#[test]
fn test_seeded_runs_are_reproducible() {
  let optimize = || {
    let (hall_of_fame, population) = Nsga2::builder()
      .alleles(alleles())
      .population_size(30)
      .iterations(20)
      .crossover_probability(0.7)
      .mutation_probability(0.2)
      .directions(minimize())
      .seed(2024)
      .initializer(RandomAlleles)
      .evaluator(binh_korn.par_each())
      .crossover(SinglePointCrossover)
      .mutation(RandomResetting)
      .build()
      .optimize()
      .unwrap();
    (
      hall_of_fame
        .iter()
        .map(|i| i.genes().to_vec())
        .collect::<Vec<_>>(),
      population
        .iter()
        .map(|i| i.genes().to_vec())
        .collect::<Vec<_>>(),
    )
  };
  assert_eq!(optimize(), optimize());
}

#[test]
fn test_archive_capacity_is_respected() {
  let (hall_of_fame, _) = Nsga2::builder()
    .alleles(alleles())
    .population_size(40)
    .iterations(25)
    .crossover_probability(0.5)
    .mutation_probability(0.5)
    .directions(minimize())
    .archive_capacity(5)
    .seed(3)
    .initializer(RandomAlleles)
    .evaluator(binh_korn.par_batch())
    .crossover(UniformCrossover)
    .mutation(RandomResetting)
    .build()
    .optimize()
    .unwrap();
  assert!(hall_of_fame.len() <= 5);
  assert_eq!(hall_of_fame.capacity(), Some(5));
  assert_pareto_archive(&hall_of_fame, &minimize());
}

#[test]
fn test_custom_operators() {
  let initializer =
    |alleles: &[Vec<i32>], rng: &mut dyn RngCore| -> Vec<i32> {
      alleles
        .iter()
        .map(|values| values[rng.gen_range(0..values.len())])
        .collect()
    };
  // averages both parents
  let crossover = |a: &[i32], b: &[i32], _: &mut dyn RngCore| -> Vec<i32> {
    a.iter().zip(b).map(|(x, y)| (x + y) / 2).collect()
  };
  // steps one gene up or down, staying within the domain
  let mutation = |genes: &[i32], alleles: &[Vec<i32>], rng: &mut dyn RngCore| {
    let mut genes = genes.to_vec();
    let idx = rng.gen_range(0..genes.len());
    let step = if rng.gen_bool(0.5) { 1 } else { -1 };
    let values = &alleles[idx];
    genes[idx] = (genes[idx] + step).clamp(values[0], values[values.len() - 1]);
    genes
  };
  // scores the whole batch at once
  let evaluator = |genes: &[Vec<i32>]| -> Vec<Vec<Score>> {
    genes.iter().map(|g| binh_korn(g)).collect()
  };

  let (hall_of_fame, population) = Nsga2::builder()
    .alleles(alleles())
    .population_size(24)
    .iterations(15)
    .crossover_probability(0.9)
    .mutation_probability(0.9)
    .directions(Directions::PerObjective(vec![
      Direction::Minimize,
      Direction::Minimize,
    ]))
    .seed(11)
    .initializer(initializer)
    .evaluator(evaluator)
    .crossover(crossover)
    .mutation(mutation)
    .build()
    .optimize()
    .unwrap();
  assert_eq!(population.len(), 24);
  assert!(population
    .iter()
    .all(|i| i.fitness().as_slice() == binh_korn(i.genes()).as_slice()));
  assert_pareto_archive(&hall_of_fame, &minimize());
}

#[test]
fn test_run_with_defaults() {
  // maximizes ones in the first half and zeros in the second one
  let evaluate = |g: &[u8]| {
    let (head, tail) = g.split_at(g.len() / 2);
    let ones = |s: &[u8]| s.iter().filter(|&&b| b == 1).count() as Score;
    vec![ones(head), tail.len() as Score - ones(tail)]
  };
  assert_eq!(evaluate.evaluate(&[1, 0, 1, 0]), vec![1.0, 1.0]);

  let (hall_of_fame, population) =
    run(vec![vec![0, 1]; 10], evaluate, 20, 30).unwrap();
  assert_eq!(population.len(), 20);
  assert!(!hall_of_fame.is_empty());
  for a in hall_of_fame.iter() {
    for b in hall_of_fame.iter() {
      assert_eq!(
        a.fitness()
          .dominance(b.fitness(), &Directions::default())
          .unwrap()
          .signum(),
        0
      );
    }
  }
}
