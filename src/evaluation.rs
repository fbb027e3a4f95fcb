//! Fitness evaluation operators and utilities.

use executor::EvaluationExecutor;
use rayon::prelude::*;

use crate::{
  execution::strategy::*,
  individual::Genes,
  operator::{ParBatch, ParBatchOperator, ParEach, ParEachOperator},
  score::Score,
};

/// An operator that evaluates a gene vector, returning one score per
/// objective. Every call in a run must return the same number of scores.
///
/// The evaluation must be deterministic for seeded runs to be reproducible.
/// A panicking evaluation aborts the run.
///
/// Can be applied in parallel to each gene vector or to batches of them by
/// converting it into a parallelized operator with `par_each()` or
/// `par_batch()` methods.
///
/// # Examples
/// ```
/// # use nsga::operator::*;
/// let e = |g: &[f64]| vec![g[0], -g[0] * g[0]]; // two objectives
/// let e = e.par_each();
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Evaluation<G> {
  /// Returns fitness scores of given genes.
  fn evaluate(&self, genes: &[G]) -> Vec<Score>;
}

impl<G, F> Evaluation<G> for F
where
  F: Fn(&[G]) -> Vec<Score>,
{
  fn evaluate(&self, genes: &[G]) -> Vec<Score> {
    self(genes)
  }
}

impl<G, E> ParEach<G> for E
where
  G: Sync,
  E: Evaluation<G> + Sync,
{
}

impl<G, E> ParBatch<G> for E
where
  G: Sync,
  E: Evaluation<G> + Sync,
{
}

/// An operator that evaluates a batch of gene vectors at once.
///
/// # Panics
///
/// Doesn't panic itself but will cause panic during optimization if it
/// returns a different number of fitness vectors than it was given genes.
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Evaluator<G> {
  /// Returns fitness scores of each gene vector, in the same order.
  fn evaluate(&self, genes: &[Genes<G>]) -> Vec<Vec<Score>>;
}

impl<G, F> Evaluator<G> for F
where
  F: Fn(&[Genes<G>]) -> Vec<Vec<Score>>,
{
  fn evaluate(&self, genes: &[Genes<G>]) -> Vec<Vec<Score>> {
    self(genes)
  }
}

/// This private module prevents exposing the `Executor` to a user.
pub(crate) mod executor {
  use crate::{individual::Genes, score::Score};

  /// An internal evaluation executor.
  pub trait EvaluationExecutor<G, ExecutionStrategy> {
    /// Executes evaluations optionally parallelizing operator's application.
    /// Results come in the order of `genes`.
    fn execute_evaluations(&self, genes: &[Genes<G>]) -> Vec<Vec<Score>>;
  }
}

impl<G, E> EvaluationExecutor<G, CustomExecutionStrategy> for E
where
  E: Evaluator<G>,
{
  fn execute_evaluations(&self, genes: &[Genes<G>]) -> Vec<Vec<Score>> {
    self.evaluate(genes)
  }
}

impl<G, E> EvaluationExecutor<G, SequentialExecutionStrategy> for E
where
  E: Evaluation<G>,
{
  fn execute_evaluations(&self, genes: &[Genes<G>]) -> Vec<Vec<Score>> {
    genes.iter().map(|g| self.evaluate(g)).collect()
  }
}

impl<G, E> EvaluationExecutor<G, ParallelEachExecutionStrategy>
  for ParEachOperator<G, E>
where
  G: Sync,
  E: Evaluation<G> + Sync,
{
  fn execute_evaluations(&self, genes: &[Genes<G>]) -> Vec<Vec<Score>> {
    genes
      .par_iter()
      .map(|g| self.operator().evaluate(g))
      .collect()
  }
}

impl<G, E> EvaluationExecutor<G, ParallelBatchExecutionStrategy>
  for ParBatchOperator<G, E>
where
  G: Sync,
  E: Evaluation<G> + Sync,
{
  fn execute_evaluations(&self, genes: &[Genes<G>]) -> Vec<Vec<Score>> {
    let chunk_size = (genes.len() / rayon::current_num_threads()).max(1);
    genes
      .par_chunks(chunk_size)
      .flat_map_iter(|chunk| chunk.iter().map(|g| self.operator().evaluate(g)))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  type Gene = f64;

  fn takes_evaluator<ES, E: EvaluationExecutor<Gene, ES>>(
    e: &E,
  ) -> Vec<Vec<Score>> {
    e.execute_evaluations(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
  }

  #[test]
  fn test_evaluation_from_closure() {
    let evaluation = |g: &[Gene]| vec![g[0], g[1] * 2.0];
    let expected = vec![vec![1.0, 4.0], vec![3.0, 8.0], vec![5.0, 12.0]];
    assert_eq!(takes_evaluator(&evaluation), expected);
    assert_eq!(takes_evaluator(&evaluation.par_each()), expected);
    assert_eq!(takes_evaluator(&evaluation.par_batch()), expected);
  }

  #[test]
  fn test_evaluator_from_closure() {
    let evaluator = |genes: &[Genes<Gene>]| -> Vec<Vec<Score>> {
      genes.iter().map(|g| vec![g.iter().sum()]).collect()
    };
    assert_eq!(
      takes_evaluator(&evaluator),
      vec![vec![3.0], vec![7.0], vec![11.0]]
    );
  }

  #[test]
  fn test_custom_evaluation() {
    struct CustomEvaluation {}
    impl<G> Evaluation<G> for CustomEvaluation {
      fn evaluate(&self, genes: &[G]) -> Vec<Score> {
        vec![genes.len() as Score]
      }
    }

    let evaluation = CustomEvaluation {};
    assert_eq!(takes_evaluator(&evaluation)[0], vec![2.0]);
    assert_eq!(takes_evaluator(&evaluation.par_each())[2], vec![2.0]);
  }
}
