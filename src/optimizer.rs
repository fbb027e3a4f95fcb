//! Abstract optimizer.

use crate::{error::Result, hall_of_fame::HallOfFame, individual::Population};

pub mod nsga;

/// Represents an abstract optimizer.
pub trait Optimizer<G>: Sized {
  /// Runs `Optimizer` until the termination condition is met, then returns
  /// the best individuals it has found and the last generated population.
  ///
  /// # Errors
  ///
  /// Fails on the first contract violation detected during the run.
  fn optimize(self) -> Result<(HallOfFame<G>, Population<G>)>;
}
