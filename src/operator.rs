//! Parallelization wrappers for evaluation operators.

use std::marker::PhantomData;

/// An operator tagged to be applied in parallel to **each** gene vector.
pub struct ParEachOperator<G, O> {
  operator: O,
  _genes: PhantomData<G>,
}

impl<G, O> ParEachOperator<G, O> {
  pub(crate) fn operator(&self) -> &O {
    &self.operator
  }
}

/// An operator tagged to be applied in parallel to **batches** of gene
/// vectors.
pub struct ParBatchOperator<G, O> {
  operator: O,
  _genes: PhantomData<G>,
}

impl<G, O> ParBatchOperator<G, O> {
  pub(crate) fn operator(&self) -> &O {
    &self.operator
  }
}

/// Converts an operator into one applied in parallel to each gene vector.
pub trait ParEach<G>: Sized {
  /// Wraps the operator so that the optimizer applies it in parallel to
  /// **each** gene vector it evaluates.
  ///
  /// **Parallelization is implemented with [rayon]. As a result, for simple
  /// functions, parallelization may only decrease performance because of
  /// additional overhead introduced. Benchmark if in doubt.**
  fn par_each(self) -> ParEachOperator<G, Self> {
    ParEachOperator {
      operator: self,
      _genes: PhantomData,
    }
  }
}

/// Converts an operator into one applied in parallel to batches of gene
/// vectors.
pub trait ParBatch<G>: Sized {
  /// Wraps the operator so that the optimizer applies it in parallel to
  /// **batches** of gene vectors, one batch per available thread.
  ///
  /// **Parallelization is implemented with [rayon]. As a result, for simple
  /// functions, parallelization may only decrease performance because of
  /// additional overhead introduced. Benchmark if in doubt.**
  fn par_batch(self) -> ParBatchOperator<G, Self> {
    ParBatchOperator {
      operator: self,
      _genes: PhantomData,
    }
  }
}
