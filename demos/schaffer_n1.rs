//! Schaffer's Problem No.1 solution using NSGA-II.

use std::{fs::File, io::Write, path::Path};

use nsga::{
  mutation::RandomResetting,
  operator::ParBatch,
  optimizer::nsga::run_with,
};
use rand::{seq::IteratorRandom, Rng, RngCore};

fn main() {
  env_logger::init();

  // `x` lies between -100 and 100 in steps of 0.01
  let alleles: Vec<Vec<f64>> =
    vec![(-10_000..=10_000).map(|i| f64::from(i) / 100.0).collect()];
  // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`, negated as
  // every objective is maximized by default
  let evaluation = |g: &[f64]| vec![-g[0].powi(2), -(g[0] - 2.0).powi(2)];
  // for each pair of parents `x` and `y` create an offspring
  // `o = x + r * (y - x)` where `r` is a random value between -1 and 2
  let crossover = |x: &[f64], y: &[f64], rng: &mut dyn RngCore| {
    let r = rng.gen_range(-1.0..2.0);
    vec![(x[0] + r * (y[0] - x[0])).clamp(-100.0, 100.0)]
  };

  // `evaluation` is executed concurrently for each batch of new genes
  let (hall_of_fame, population) = run_with(
    alleles,
    evaluation.par_batch(),
    100,
    100,
    0.9,
    0.1,
    crossover,
    RandomResetting,
  )
  .unwrap();

  // write the hall of fame to demos/schaffer_n1.csv
  let _ = File::create(Path::new(file!()).with_file_name("schaffer_n1.csv"))
    .unwrap()
    .write_all(
      hall_of_fame
        .iter()
        .map(|i| format!("{} {}", -i.fitness()[0], -i.fitness()[1]))
        .collect::<Vec<_>>()
        .join("\n")
        .as_bytes(),
    );

  // print 10 random individuals of the last population
  println!("{} pareto optimal solutions found", hall_of_fame.len());
  for individual in population
    .iter()
    .choose_multiple(&mut rand::thread_rng(), 10)
  {
    println!("{:.4}", individual.genes()[0]);
  }
  println!("  ...  ");
}
