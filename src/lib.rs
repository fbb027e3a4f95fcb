//! **NSGA** is the selection engine of the NSGA-II multi-objective genetic
//! algorithm. Given a population of candidate solutions scored on several
//! competing objectives, it ranks, diversifies and truncates the population
//! generation after generation, so that survivors move toward the Pareto
//! optimal trade-off surface while staying spread across objectives.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! # Workflow
//!
//! An individual is an immutable pair of a gene vector and the fitness vector
//! it scored, one [`Score`] per objective. Individuals are shared through
//! `Arc`, so the same individual can live in a population, a parent pool and
//! the hall of fame at once. Each generation [`Nsga2`]:
//! 1. **Sorts** the merged population into fronts of mutually non-dominated
//!    individuals, stopping as soon as half of it is ranked
//! 2. **Archives** the first front in the [`HallOfFame`], which keeps only
//!    mutually non-dominated individuals with distinct genes
//! 3. **Selects** whole fronts into the parent pool while they fit and
//!    truncates the overflowing one by [crowding distance]
//! 4. **Varies** parents drawn by binary tournaments over distinct fitness
//!    vectors with crossover and mutation
//! 5. **Merges** the offspring with the previous generation
//!
//! After a fixed number of generations the optimizer returns the hall of
//! fame and the last generated population.
//!
//! # Operators
//!
//! Genes are a `Vec<G>` of any `G: Clone + PartialEq`, and the allele domain
//! lists the values each gene position can take. The engine never inspects
//! genes itself: four operators, each represented with a trait implemented
//! by closures, do.
//!
//! | Operator                | Trait                    | Closure                                               | Default                  |
//! |:------------------------|:------------------------:|:-----------------------------------------------------:|:------------------------:|
//! | **Initialization**      | [`Initialization`]       | `Fn(&[Vec<G>], &mut dyn RngCore) -> Vec<G>`           | [`RandomAlleles`]        |
//! | **Evaluation**          | [`Evaluation`]           | `Fn(&[G]) -> Vec<f64>`                                | -                        |
//! | **Batch evaluation**    | [`Evaluator`]            | `Fn(&[Vec<G>]) -> Vec<Vec<f64>>`                      | -                        |
//! | **Crossover**           | [`Crossover`]            | `Fn(&[G], &[G], &mut dyn RngCore) -> Vec<G>`          | [`SinglePointCrossover`] |
//! | **Mutation**            | [`Mutation`]             | `Fn(&[G], &[Vec<G>], &mut dyn RngCore) -> Vec<G>`     | [`RandomResetting`]      |
//!
//! Operators receive the random source of the run, so a run with a fixed seed
//! is reproducible as long as the evaluation is deterministic.
//!
//! Note that this highly generic implementation leads to unreadable compiler
//! error messages that appear not at closure definition, but at creation of
//! an optimizer. If you are struggling with a closure, implement a trait
//! directly instead.
//!
//! # Parallelization
//!
//! Domination counting and crowding distance run on [rayon] on their own.
//! Evaluation, usually the most expensive part, is parallelized by calling
//! [`par_each()`] or [`par_batch()`] on an [`Evaluation`]. This cheap
//! conversion only wraps the operator into a struct, tagging it, so the
//! optimizer will evaluate new genes in parallel one by one or in batches of
//! equal size. Both the operator and genes must be `Sync`.
//! ```
//! # use nsga::operator::ParBatch;
//! let evaluation = |g: &[f64]| vec![g[0], -g[0]];
//! let evaluation = evaluation.par_batch();
//! ```
//!
//! Random decisions are always made on the calling thread in a fixed order,
//! so parallelization never changes the outcome of a seeded run.
//!
//! # Logging
//!
//! The crate logs through the [log] facade: run start and end at `info`,
//! every generation at `debug`, front truncation at `trace`. Install any
//! logger, such as `env_logger`, to see it.
//!
//! # Example
//!
//! Here's a solution for the textbook *Schaffer's Problem No.1*, minimizing
//! `x^2` and `(x - 2)^2` over integer `x` in `[-100, 100]` with the
//! [`run`] entry point. As [`run`] maximizes, objectives are negated.
//! ```
//! use nsga::optimizer::nsga::run;
//!
//! let alleles = vec![(-100..=100).collect::<Vec<i32>>()];
//! let evaluate = |g: &[i32]| {
//!   let x = f64::from(g[0]);
//!   vec![-x.powi(2), -(x - 2.0).powi(2)]
//! };
//! let (hall_of_fame, population) = run(alleles, evaluate, 50, 50).unwrap();
//! assert_eq!(population.len(), 50);
//! // Pareto optimal solutions lie between 0 and 2
//! for individual in hall_of_fame.iter() {
//!   println!("{:?} {:?}", individual.genes(), individual.fitness());
//! }
//! ```
//!
//! You can find more examples in the *demos* folder in the root of the
//! project.
//!
//! [`Score`]: crate::score::Score
//! [`Nsga2`]: crate::optimizer::nsga::Nsga2
//! [`run`]: crate::optimizer::nsga::run
//! [`HallOfFame`]: crate::hall_of_fame::HallOfFame
//! [`Initialization`]: crate::initialization::Initialization
//! [`RandomAlleles`]: crate::initialization::RandomAlleles
//! [`Evaluation`]: crate::evaluation::Evaluation
//! [`Evaluator`]: crate::evaluation::Evaluator
//! [`Crossover`]: crate::recombination::Crossover
//! [`SinglePointCrossover`]: crate::recombination::SinglePointCrossover
//! [`Mutation`]: crate::mutation::Mutation
//! [`RandomResetting`]: crate::mutation::RandomResetting
//! [`par_each()`]: crate::operator::ParEach::par_each
//! [`par_batch()`]: crate::operator::ParBatch::par_batch
//! [crowding distance]: crate::crowding
//! [rayon]: https://docs.rs/rayon
//! [log]: https://docs.rs/log

#![warn(missing_docs)]

pub mod crowding;
pub mod error;
pub mod evaluation;
mod execution;
pub mod hall_of_fame;
pub mod individual;
pub mod initialization;
pub mod mutation;
pub mod offspring;
pub mod operator;
pub mod optimizer;
pub mod recombination;
pub mod score;
pub mod selection;
pub mod sorting;

pub use error::{Error, Result};
