//! Error type of the crate.

/// A specialized `Result` for this crate's operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Contract violations detected while ranking, selecting or varying a
/// population. Each of them means the API was misused, so an optimizer stops
/// at the first one and hands it to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
  /// Two fitness vectors (or a fitness vector and the objective directions)
  /// have different lengths.
  #[error("objective count mismatch: expected {expected}, got {got}")]
  ObjectiveCountMismatch {
    /// Length of the first vector.
    expected: usize,
    /// Length of the second vector.
    got: usize,
  },

  /// An individual was created from an empty gene vector.
  #[error("gene vector cannot be empty")]
  EmptyGenes,

  /// An individual was created with an empty fitness vector.
  #[error("fitness vector cannot be empty")]
  EmptyFitness,

  /// A selector was asked for more (or fewer) candidates than it has.
  #[error("quota {quota} is out of range (0, {available}]")]
  QuotaOutOfRange {
    /// Requested number of candidates.
    quota: usize,
    /// Number of candidates available.
    available: usize,
  },

  /// A probability lies outside of `[0, 1]`.
  #[error("{name} must be within [0, 1] (received {value})")]
  InvalidProbability {
    /// Name of the probability parameter.
    name: &'static str,
    /// Offending value.
    value: f64,
  },

  /// Population size must be greater than zero.
  #[error("population size must be greater than zero")]
  InvalidPopulationSize,

  /// Allele domain is empty or has a gene position with no values.
  #[error("allele domain is empty at gene position {position}")]
  EmptyAlleles {
    /// First gene position without values.
    position: usize,
  },

  /// A selected individual has no rank and crowding distance assigned.
  #[error("no crowding distance assigned to fitness {0:?}")]
  MissingCrowding(Vec<f64>),
}
