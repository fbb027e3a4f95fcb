//! Initialization of gene vectors.

use rand::{Rng, RngCore};

use crate::{
  error::{Error, Result},
  individual::Genes,
};

/// An operator that creates one valid gene vector out of the allele domain,
/// that is out of the list of values each gene position can take.
///
/// # Examples
/// ```
/// # use nsga::initialization::Initialization;
/// # use rand::RngCore;
/// // picks the first value of each position
/// let i = |alleles: &[Vec<u8>], _: &mut dyn RngCore| {
///   alleles.iter().map(|values| values[0]).collect::<Vec<_>>()
/// };
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Initialization<G> {
  /// Returns a new gene vector.
  fn initialize(&self, alleles: &[Vec<G>], rng: &mut dyn RngCore) -> Genes<G>;
}

impl<G, F> Initialization<G> for F
where
  F: Fn(&[Vec<G>], &mut dyn RngCore) -> Genes<G>,
{
  fn initialize(&self, alleles: &[Vec<G>], rng: &mut dyn RngCore) -> Genes<G> {
    self(alleles, rng)
  }
}

/// Draws every gene uniformly at random from the values of its position.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomAlleles;

impl<G: Clone> Initialization<G> for RandomAlleles {
  fn initialize(&self, alleles: &[Vec<G>], rng: &mut dyn RngCore) -> Genes<G> {
    alleles
      .iter()
      .map(|values| values[rng.gen_range(0..values.len())].clone())
      .collect()
  }
}

/// Checks that the allele domain has at least one position and every
/// position has at least one value.
///
/// # Errors
///
/// Returns [`Error::EmptyAlleles`] with the first offending position.
pub fn check_alleles<G>(alleles: &[Vec<G>]) -> Result<()> {
  if alleles.is_empty() {
    return Err(Error::EmptyAlleles { position: 0 });
  }
  match alleles.iter().position(Vec::is_empty) {
    Some(position) => Err(Error::EmptyAlleles { position }),
    None => Ok(()),
  }
}
