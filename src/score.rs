//! Fitness scores, objective directions and Pareto dominance.

use std::{
  hash::{Hash, Hasher},
  ops::Deref,
};

use crate::error::{Error, Result};

/// An alias for a single objective score.
pub type Score = f64;

/// Ordering predicate of a single objective.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Direction {
  /// Greater values are better.
  #[default]
  Maximize,
  /// Smaller values are better.
  Minimize,
}

impl Direction {
  /// Returns `true` if `a` is strictly better than `b`. `NaN` is never
  /// better than anything, nor is anything better than `NaN`.
  pub fn is_better(self, a: Score, b: Score) -> bool {
    match self {
      Direction::Maximize => a > b,
      Direction::Minimize => a < b,
    }
  }
}

/// Directions of all objectives of a run.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Directions {
  /// The same direction applies to every objective.
  Uniform(Direction),
  /// One direction per objective.
  PerObjective(Vec<Direction>),
}

impl Default for Directions {
  fn default() -> Self {
    Directions::Uniform(Direction::Maximize)
  }
}

impl Directions {
  /// Returns the direction of objective `idx`.
  pub fn direction(&self, idx: usize) -> Direction {
    match self {
      Directions::Uniform(d) => *d,
      Directions::PerObjective(ds) => ds[idx],
    }
  }

  /// Checks that these directions can describe fitness vectors of
  /// `objective_num` objectives.
  pub fn check(&self, objective_num: usize) -> Result<()> {
    match self {
      Directions::PerObjective(ds) if ds.len() != objective_num => {
        Err(Error::ObjectiveCountMismatch {
          expected: ds.len(),
          got: objective_num,
        })
      }
      _ => Ok(()),
    }
  }
}

/// Outcome of a pairwise dominance comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dominance {
  /// The first vector dominates the second one.
  Dominates,
  /// The second vector dominates the first one.
  Dominated,
  /// Neither vector dominates the other, including equal vectors.
  Neither,
}

impl Dominance {
  /// Swaps the roles of the compared vectors.
  pub fn reverse(self) -> Self {
    match self {
      Dominance::Dominates => Dominance::Dominated,
      Dominance::Dominated => Dominance::Dominates,
      Dominance::Neither => Dominance::Neither,
    }
  }

  /// `1` if the first vector dominates, `-1` if the second one does,
  /// otherwise `0`.
  pub fn signum(self) -> i8 {
    match self {
      Dominance::Dominates => 1,
      Dominance::Dominated => -1,
      Dominance::Neither => 0,
    }
  }
}

/// Describes pareto dominance for slices of `Score`s.
pub trait ParetoDominance {
  /// Compares `self` against `other`. `self` dominates `other` if it is
  /// strictly better in at least one objective and worse in none.
  ///
  /// # Errors
  ///
  /// Returns [`Error::ObjectiveCountMismatch`] if the vectors, or the
  /// vectors and `directions`, differ in length.
  fn dominance(
    &self,
    other: &Self,
    directions: &Directions,
  ) -> Result<Dominance>;
}

impl ParetoDominance for [Score] {
  fn dominance(
    &self,
    other: &Self,
    directions: &Directions,
  ) -> Result<Dominance> {
    if self.len() != other.len() {
      return Err(Error::ObjectiveCountMismatch {
        expected: self.len(),
        got: other.len(),
      });
    }
    directions.check(self.len())?;

    let mut self_better = false;
    let mut other_better = false;
    for (idx, (a, b)) in self.iter().zip(other).enumerate() {
      let direction = directions.direction(idx);
      self_better |= direction.is_better(*a, *b);
      other_better |= direction.is_better(*b, *a);
      if self_better && other_better {
        return Ok(Dominance::Neither);
      }
    }

    Ok(match (self_better, other_better) {
      (true, false) => Dominance::Dominates,
      (false, true) => Dominance::Dominated,
      _ => Dominance::Neither,
    })
  }
}

/// A fitness vector: one score per objective.
///
/// Fitness vectors are compared and hashed by the exact bit pattern of their
/// scores (with `0.0 == -0.0` and all `NaN`s equal), so they can key maps.
/// Individuals with equal fitness collapse into one entry of such a map.
#[derive(Clone, Debug)]
pub struct Fitness(Vec<Score>);

impl Fitness {
  /// Creates a fitness vector.
  ///
  /// # Errors
  ///
  /// Returns [`Error::EmptyFitness`] if `scores` is empty.
  pub fn new(scores: Vec<Score>) -> Result<Self> {
    if scores.is_empty() {
      return Err(Error::EmptyFitness);
    }
    Ok(Self(scores))
  }

  /// Returns scores as a slice.
  pub fn as_slice(&self) -> &[Score] {
    &self.0
  }

  /// Moves scores out.
  pub fn into_inner(self) -> Vec<Score> {
    self.0
  }

  fn bits(&self) -> impl Iterator<Item = u64> + '_ {
    self.0.iter().map(|s| {
      if *s == 0.0 {
        0
      } else if s.is_nan() {
        Score::NAN.to_bits()
      } else {
        s.to_bits()
      }
    })
  }
}

impl Deref for Fitness {
  type Target = [Score];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl PartialEq for Fitness {
  fn eq(&self, other: &Self) -> bool {
    self.0.len() == other.0.len() && self.bits().eq(other.bits())
  }
}

impl Eq for Fitness {}

impl Hash for Fitness {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.0.len().hash(state);
    self.bits().for_each(|b| b.hash(state));
  }
}

impl TryFrom<Vec<Score>> for Fitness {
  type Error = Error;

  fn try_from(scores: Vec<Score>) -> Result<Self> {
    Fitness::new(scores)
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use proptest::prelude::*;

  use super::*;

  fn max() -> Directions {
    Directions::default()
  }

  #[test]
  fn test_pareto_dominance() {
    let d = max();
    assert_eq!(
      [1.0, 2.0, 3.0].dominance(&[1.0, 2.0, 3.0], &d),
      Ok(Dominance::Neither)
    );
    assert_eq!(
      [1.0, 2.0, 3.0].dominance(&[3.0, 2.0, 1.0], &d),
      Ok(Dominance::Neither)
    );
    assert_eq!(
      [10.0, 2.0, 3.0].dominance(&[1.0, 2.0, 3.0], &d),
      Ok(Dominance::Dominates)
    );
    assert_eq!(
      [1.0, 2.0, 3.0].dominance(&[1.0, 2.0, 30.0], &d),
      Ok(Dominance::Dominated)
    );
    assert_eq!(
      [-1.0, -2.0].dominance(&[-1.0, -3.0], &d),
      Ok(Dominance::Dominates)
    );
  }

  #[test]
  fn test_minimizing_dominance() {
    let d = Directions::Uniform(Direction::Minimize);
    assert_eq!(
      [1.0, 2.0].dominance(&[1.0, 3.0], &d),
      Ok(Dominance::Dominates)
    );
    let d = Directions::PerObjective(vec![
      Direction::Maximize,
      Direction::Minimize,
    ]);
    assert_eq!(
      [2.0, 1.0].dominance(&[1.0, 3.0], &d),
      Ok(Dominance::Dominates)
    );
    assert_eq!(
      [2.0, 4.0].dominance(&[1.0, 3.0], &d),
      Ok(Dominance::Neither)
    );
  }

  #[test]
  fn test_length_mismatch() {
    assert_eq!(
      [1.0, 2.0].dominance(&[1.0], &max()),
      Err(Error::ObjectiveCountMismatch {
        expected: 2,
        got: 1
      })
    );
    let d = Directions::PerObjective(vec![Direction::Minimize]);
    assert!([1.0, 2.0].dominance(&[1.0, 3.0], &d).is_err());
  }

  #[test]
  fn test_nan_is_never_better() {
    assert_eq!(
      [Score::NAN, 1.0].dominance(&[0.0, 1.0], &max()),
      Ok(Dominance::Neither)
    );
    assert_eq!(
      [Score::NAN, 2.0].dominance(&[0.0, 1.0], &max()),
      Ok(Dominance::Dominates)
    );
  }

  #[test]
  fn test_fitness_as_key() {
    let a = Fitness::new(vec![0.0, 1.0]).unwrap();
    let b = Fitness::new(vec![-0.0, 1.0]).unwrap();
    let c = Fitness::new(vec![Score::NAN, 1.0]).unwrap();
    let d = Fitness::new(vec![Score::NAN, 1.0]).unwrap();
    assert_eq!(a, b);
    assert_eq!(c, d);
    assert_ne!(a, c);
    let set: HashSet<_> = [a, b, c, d].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert_eq!(Fitness::new(vec![]), Err(Error::EmptyFitness));
  }

  fn scores(len: usize) -> impl Strategy<Value = Vec<Score>> {
    prop::collection::vec(-10i32..10, len)
      .prop_map(|v| v.into_iter().map(Score::from).collect())
  }

  proptest! {
    #[test]
    fn dominance_is_irreflexive(a in scores(3)) {
      prop_assert_eq!(a.dominance(&a, &max()), Ok(Dominance::Neither));
    }

    #[test]
    fn dominance_is_antisymmetric(a in scores(3), b in scores(3)) {
      let ab = a.dominance(&b, &max()).unwrap();
      let ba = b.dominance(&a, &max()).unwrap();
      prop_assert_eq!(ab, ba.reverse());
      prop_assert_eq!(ab.signum(), -ba.signum());
    }
  }
}
