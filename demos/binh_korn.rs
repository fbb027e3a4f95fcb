//! Binh and Korn function solution using NSGA-II.

use std::{fs::File, io::Write, path::Path};

use nsga::{
  initialization::RandomAlleles,
  operator::ParEach,
  optimizer::{nsga::Nsga2, Optimizer},
  recombination::UniformCrossover,
  score::{Direction, Directions},
};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

fn main() {
  env_logger::init();

  // `x` lies between 0 and 5, `y` between 0 and 3, in steps of 0.01
  let alleles: Vec<Vec<f64>> = [500, 300]
    .into_iter()
    .map(|max| (0..=max).map(|i| f64::from(i) / 100.0).collect())
    .collect();

  // objective functions `f1(x, y) = 4x^2 + 4y^2` and
  // `f2(x, y) = (x - 5)^2 + (y - 5)^2`, both minimized
  let evaluation = |g: &[f64]| {
    let (x, y) = (g[0], g[1]);
    vec![
      4.0 * x.powi(2) + 4.0 * y.powi(2),
      (x - 5.0).powi(2) + (y - 5.0).powi(2),
    ]
  };

  // shift one gene by a value from normal distribution, staying within the
  // bounds of its allele domain
  let normal = Normal::new(0.0, 0.5).unwrap(); // which comes from 'rand_distr'
  let mutation = |genes: &[f64], alleles: &[Vec<f64>], rng: &mut dyn RngCore| {
    let mut genes = genes.to_vec();
    let idx = rng.gen_range(0..genes.len());
    let (min, max) = (alleles[idx][0], alleles[idx][alleles[idx].len() - 1]);
    genes[idx] = (genes[idx] + normal.sample(rng)).clamp(min, max);
    genes
  };

  let optimizer = Nsga2::builder()
    .alleles(alleles)
    .population_size(100)
    .iterations(100)
    .crossover_probability(0.6)
    .mutation_probability(0.3)
    .directions(Directions::Uniform(Direction::Minimize))
    .archive_capacity(200)
    .seed(42)
    .initializer(RandomAlleles)
    // `evaluation` will be executed concurrently for each new gene vector
    .evaluator(evaluation.par_each())
    .crossover(UniformCrossover)
    .mutation(mutation)
    .build();

  // upon termination optimizer returns the best individuals it has found
  let (hall_of_fame, _) = optimizer.optimize().unwrap();

  // write the hall of fame to demos/binh_korn.csv
  let _ = File::create(Path::new(file!()).with_file_name("binh_korn.csv"))
    .unwrap()
    .write_all(
      hall_of_fame
        .iter()
        .map(|i| format!("{} {}", i.fitness()[0], i.fitness()[1]))
        .collect::<Vec<_>>()
        .join("\n")
        .as_bytes(),
    );

  // and print the first 10 of them
  println!("   x   |   y   ");
  for individual in hall_of_fame.iter().take(10) {
    let genes = individual.genes();
    println!("{:.4} | {:.4}", genes[0], genes[1]);
  }
  println!("  ...  |  ...  ");
}
