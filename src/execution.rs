//! Execution strategies of operators.

/// Markers that tell executors how to apply an operator.
pub mod strategy {
  /// The operator handles the whole batch of gene vectors itself.
  pub enum CustomExecutionStrategy {}

  /// The operator is applied to each gene vector in order, on the calling
  /// thread.
  pub enum SequentialExecutionStrategy {}

  /// The operator is applied to each gene vector in parallel.
  pub enum ParallelEachExecutionStrategy {}

  /// The operator is applied to batches of gene vectors in parallel, one
  /// batch per available thread.
  pub enum ParallelBatchExecutionStrategy {}
}
